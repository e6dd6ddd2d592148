//! Pipeline throughput benchmarks over generated timesheet datasets.

use breaktime_engine::config::BreakConfig;
use breaktime_engine::models::{Dataset, TimesheetRecord};
use breaktime_engine::pipeline::run_pipeline;
use breaktime_engine::progress::NoopSink;
use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Builds a dataset of `providers` providers working `days` days each, with
/// a work entry, a short break and a lunch per provider-day.
fn generate_dataset(providers: usize, days: u32) -> Dataset {
    let base = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    let mut records = Vec::with_capacity(providers * days as usize * 3);

    for provider in 0..providers {
        let provider_id = (provider + 1).to_string();
        let provider_name = format!("Provider {provider_id}");
        for day in 0..days {
            let date = base + Duration::days(i64::from(day));
            let hours = Decimal::new(50 + (provider as i64 + i64::from(day)) % 70, 1);

            records.push(TimesheetRecord {
                provider_id: provider_id.clone(),
                provider_name: provider_name.clone(),
                date_of_service: date,
                procedure_code: "Work".to_string(),
                hours_worked: hours,
                drive_time_minutes: Decimal::from(15),
                session_start: None,
                session_end: None,
            });
            records.push(TimesheetRecord {
                provider_id: provider_id.clone(),
                provider_name: provider_name.clone(),
                date_of_service: date,
                procedure_code: "10 Minute Break".to_string(),
                hours_worked: Decimal::new(17, 2),
                drive_time_minutes: Decimal::ZERO,
                session_start: None,
                session_end: None,
            });
            records.push(TimesheetRecord {
                provider_id: provider_id.clone(),
                provider_name: provider_name.clone(),
                date_of_service: date,
                procedure_code: "Lunch Break".to_string(),
                hours_worked: Decimal::new(5, 1),
                drive_time_minutes: Decimal::ZERO,
                session_start: None,
                session_end: None,
            });
        }
    }

    Dataset {
        records,
        has_timing_data: false,
        timing_parse_failures: 0,
    }
}

fn bench_pipeline(c: &mut Criterion) {
    let config = BreakConfig::default();
    let mut group = c.benchmark_group("run_pipeline");

    for (providers, days) in [(10, 5), (50, 20), (200, 20)] {
        let dataset = generate_dataset(providers, days);
        let records = dataset.records.len();
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{records}_records")),
            &dataset,
            |b, dataset| {
                b.iter(|| {
                    run_pipeline(
                        black_box(dataset),
                        black_box(&config),
                        Uuid::new_v4(),
                        &NoopSink,
                    )
                    .unwrap()
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
