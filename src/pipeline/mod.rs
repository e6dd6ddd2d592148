//! The compliance pipeline.
//!
//! Runs the full computation for one dataset: audit, work-hour aggregation,
//! daily compliance rows and both summary tiers. The run is single-threaded
//! and deterministic; identical inputs produce identical outputs. Progress
//! milestones are reported through a [`ProgressSink`] and every step emits a
//! structured log line.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::audit::audit_break_entries;
use crate::calculation::{
    aggregate_work_hours, build_daily_rows, build_provider_date_summaries,
    build_provider_summaries,
};
use crate::config::{BreakConfig, ConfigStore, resolve_break_config};
use crate::error::{EngineError, EngineResult};
use crate::ingest::read_records_from_path;
use crate::models::{
    AuditFinding, DailyComplianceRow, Dataset, ProviderDateSummary, ProviderSummary, RunSummary,
};
use crate::progress::ProgressSink;

/// Everything one pipeline run produces.
///
/// # Example
///
/// ```
/// use breaktime_engine::config::BreakConfig;
/// use breaktime_engine::models::{Dataset, TimesheetRecord};
/// use breaktime_engine::pipeline::run_pipeline;
/// use breaktime_engine::progress::NoopSink;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
/// use uuid::Uuid;
///
/// let dataset = Dataset {
///     records: vec![TimesheetRecord {
///         provider_id: "1".to_string(),
///         provider_name: "Jane Doe".to_string(),
///         date_of_service: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///         procedure_code: "Work".to_string(),
///         hours_worked: Decimal::from_str("5.0").unwrap(),
///         drive_time_minutes: Decimal::ZERO,
///         session_start: None,
///         session_end: None,
///     }],
///     has_timing_data: false,
///     timing_parse_failures: 0,
/// };
///
/// let report = run_pipeline(
///     &dataset,
///     &BreakConfig::default(),
///     Uuid::new_v4(),
///     &NoopSink,
/// )?;
/// assert_eq!(report.daily[0].required_break_minutes, 10);
/// # Ok::<(), breaktime_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// One compliance row per (provider, date) group.
    pub daily: Vec<DailyComplianceRow>,
    /// Daily rows summed by (provider, date).
    pub provider_date: Vec<ProviderDateSummary>,
    /// Daily rows summed by provider across all dates.
    pub provider: Vec<ProviderSummary>,
    /// Audit findings in discovery order.
    pub findings: Vec<AuditFinding>,
    /// Run-level statistics.
    pub summary: RunSummary,
}

/// Runs the compliance pipeline over a validated dataset.
///
/// On success the sink receives `on_complete` with the run summary; on any
/// fatal error it receives `on_error` and no partial outputs exist.
pub fn run_pipeline(
    dataset: &Dataset,
    config: &BreakConfig,
    task_id: Uuid,
    sink: &dyn ProgressSink,
) -> EngineResult<PipelineReport> {
    match execute(dataset, config, task_id, sink) {
        Ok(report) => {
            sink.on_complete(task_id, &report.summary);
            info!(%task_id, records = report.summary.total_records, "pipeline complete");
            Ok(report)
        }
        Err(e) => {
            let message = e.to_string();
            error!(%task_id, error = %message, "pipeline failed");
            sink.on_error(task_id, &message);
            Err(e)
        }
    }
}

fn execute(
    dataset: &Dataset,
    config: &BreakConfig,
    task_id: Uuid,
    sink: &dyn ProgressSink,
) -> EngineResult<PipelineReport> {
    sink.on_progress(task_id, 10, "Validating dataset");
    if dataset.records.is_empty() {
        return Err(EngineError::EmptyDataset);
    }
    info!(
        %task_id,
        records = dataset.total_records(),
        providers = dataset.total_providers(),
        "dataset validated"
    );

    sink.on_progress(task_id, 30, "Running audit checks");
    let findings = audit_break_entries(dataset);
    info!(%task_id, findings = findings.len(), "audit complete");

    sink.on_progress(task_id, 50, "Aggregating work hours");
    let groups = aggregate_work_hours(&dataset.records, config);

    sink.on_progress(task_id, 70, "Calculating break compliance");
    let daily = build_daily_rows(&dataset.records, &groups, config);

    sink.on_progress(task_id, 90, "Building summary reports");
    let provider_date = build_provider_date_summaries(&daily);
    let provider = build_provider_summaries(&daily);

    let summary = RunSummary {
        total_records: dataset.total_records(),
        total_providers: dataset.total_providers(),
        date_range: dataset.date_range().unwrap_or_default(),
        audit_issue_count: findings.len(),
        has_timing_data: dataset.has_timing_data,
    };

    Ok(PipelineReport {
        daily,
        provider_date,
        provider,
        findings,
        summary,
    })
}

/// Reads a timesheet CSV, resolves configuration and runs the pipeline.
///
/// Ingest and configuration failures are reported through the sink the same
/// way pipeline failures are.
pub fn process_file(
    path: impl AsRef<Path>,
    store: &ConfigStore,
    task_id: Uuid,
    sink: &dyn ProgressSink,
) -> EngineResult<PipelineReport> {
    sink.on_progress(task_id, 5, "Reading input file");
    let dataset = match read_records_from_path(path) {
        Ok(dataset) => dataset,
        Err(e) => {
            let message = e.to_string();
            error!(%task_id, error = %message, "ingest failed");
            sink.on_error(task_id, &message);
            return Err(e);
        }
    };

    let config = match resolve_break_config(store) {
        Ok(config) => config,
        Err(e) => {
            let message = e.to_string();
            error!(%task_id, error = %message, "configuration invalid");
            sink.on_error(task_id, &message);
            return Err(e);
        }
    };

    run_pipeline(&dataset, &config, task_id, sink)
}
