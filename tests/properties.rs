//! Property tests for the calculation invariants.

use breaktime_engine::calculation::{
    aggregate_work_hours, build_daily_rows, build_provider_summaries, required_break_minutes,
};
use breaktime_engine::config::BreakConfig;
use breaktime_engine::models::{Compliance, TimesheetRecord};
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

fn hours_strategy() -> impl Strategy<Value = Decimal> {
    // 0.00 to 24.00 hours in centihour steps.
    (0i64..=2400).prop_map(|centihours| Decimal::new(centihours, 2))
}

fn record_strategy() -> impl Strategy<Value = TimesheetRecord> {
    (
        1u8..=4,
        0u8..=27,
        prop_oneof![
            Just("Work".to_string()),
            Just("Therapy".to_string()),
            Just("10 Minute Break".to_string()),
            Just("Lunch Break".to_string()),
            Just("Sick Leave".to_string()),
        ],
        hours_strategy(),
    )
        .prop_map(|(provider, day_offset, procedure_code, hours_worked)| {
            let base = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
            TimesheetRecord {
                provider_id: provider.to_string(),
                provider_name: format!("Provider {provider}"),
                date_of_service: base + chrono::Duration::days(i64::from(day_offset)),
                procedure_code,
                hours_worked,
                drive_time_minutes: Decimal::ZERO,
                session_start: None,
                session_end: None,
            }
        })
}

proptest! {
    #[test]
    fn required_minutes_monotone_in_hours(
        a in hours_strategy(),
        b in hours_strategy(),
    ) {
        let config = BreakConfig::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(
            required_break_minutes(lo, &config) <= required_break_minutes(hi, &config)
        );
    }

    #[test]
    fn required_minutes_is_one_of_the_configured_durations(h in hours_strategy()) {
        let config = BreakConfig::default();
        let required = required_break_minutes(h, &config);
        prop_assert!([0, config.duration_1, config.duration_2, config.duration_3]
            .contains(&required));
    }

    #[test]
    fn hours_fields_always_pair_with_minutes(
        records in prop::collection::vec(record_strategy(), 1..30),
    ) {
        let config = BreakConfig::default();
        let groups = aggregate_work_hours(&records, &config);
        let daily = build_daily_rows(&records, &groups, &config);

        for row in &daily {
            let sixty = Decimal::from(60);
            prop_assert_eq!(
                row.required_break_hours,
                Decimal::from(row.required_break_minutes) / sixty
            );
            prop_assert_eq!(
                row.actual_break_hours,
                Decimal::from(row.actual_break_minutes) / sixty
            );
            prop_assert_eq!(
                row.lunch_break_hours,
                Decimal::from(row.lunch_break_minutes) / sixty
            );
            prop_assert!(row.break_deficit_minutes >= 0);
        }
    }

    #[test]
    fn provider_summaries_are_additive_over_daily_rows(
        records in prop::collection::vec(record_strategy(), 1..30),
    ) {
        let config = BreakConfig::default();
        let groups = aggregate_work_hours(&records, &config);
        let daily = build_daily_rows(&records, &groups, &config);
        let summaries = build_provider_summaries(&daily);

        for summary in &summaries {
            let rows: Vec<_> = daily
                .iter()
                .filter(|r| r.provider_id == summary.provider_id)
                .collect();

            let deficit: i64 = rows.iter().map(|r| r.break_deficit_minutes).sum();
            let required: i64 = rows.iter().map(|r| r.required_break_minutes).sum();
            let actual: i64 = rows.iter().map(|r| r.actual_break_minutes).sum();

            prop_assert_eq!(summary.break_deficit_minutes, deficit);
            prop_assert_eq!(summary.required_break_minutes, required);
            prop_assert_eq!(summary.actual_break_minutes, actual);
            prop_assert_eq!(summary.timesheet_count, rows.len());
            prop_assert_eq!(
                summary.compliance,
                Compliance::from_deficit(deficit)
            );
        }
    }
}
