//! CSV writers for the four report artifacts.
//!
//! Every writer maps its record type to columns explicitly and always emits
//! the header row, even for an empty artifact. Dates render as mm/dd/yyyy
//! and hours render straight from [`Decimal`] so no float drift sneaks into
//! the output.

use std::io::Write;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditFinding, DailyComplianceRow, ProviderDateSummary, ProviderSummary};

/// Header of the audit artifact. Fixed even when there are zero findings.
const AUDIT_HEADER: [&str; 6] = [
    "Type",
    "ProviderId",
    "ProviderName",
    "DateOfService",
    "Issue",
    "Severity",
];

/// Writes the daily compliance artifact.
pub fn write_daily_rows<W: Write>(writer: W, rows: &[DailyComplianceRow]) -> EngineResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    write_record(
        &mut csv_writer,
        &[
            "ProviderId",
            "ProviderFullName",
            "DateOfService",
            "TimeWorkedInHours",
            "DriveTimeHours",
            "RequiredBreakMinutes",
            "RequiredBreakHours",
            "ActualBreakMinutes",
            "ActualBreakHours",
            "LunchBreakMinutes",
            "LunchBreakHours",
            "BreakDeficitMinutes",
            "BreakCompliance",
        ],
    )?;

    for row in rows {
        write_record(
            &mut csv_writer,
            &[
                &row.provider_id,
                &row.provider_name,
                &format_date(row.date_of_service),
                &decimal(row.work_hours),
                &decimal(row.drive_time_hours),
                &row.required_break_minutes.to_string(),
                &decimal(row.required_break_hours),
                &row.actual_break_minutes.to_string(),
                &decimal(row.actual_break_hours),
                &row.lunch_break_minutes.to_string(),
                &decimal(row.lunch_break_hours),
                &row.break_deficit_minutes.to_string(),
                &row.compliance.to_string(),
            ],
        )?;
    }

    flush(csv_writer)
}

/// Writes the provider-date summary artifact.
pub fn write_provider_date_summaries<W: Write>(
    writer: W,
    summaries: &[ProviderDateSummary],
) -> EngineResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    write_record(
        &mut csv_writer,
        &[
            "ProviderId",
            "ProviderFullName",
            "DateOfService",
            "TimeWorkedInHours",
            "RequiredBreakMinutes",
            "RequiredBreakHours",
            "ActualBreakMinutes",
            "ActualBreakHours",
            "LunchBreakMinutes",
            "LunchBreakHours",
            "BreakDeficitMinutes",
            "BreakCompliance",
        ],
    )?;

    for summary in summaries {
        write_record(
            &mut csv_writer,
            &[
                &summary.provider_id,
                &summary.provider_name,
                &format_date(summary.date_of_service),
                &decimal(summary.work_hours),
                &summary.required_break_minutes.to_string(),
                &decimal(summary.required_break_hours),
                &summary.actual_break_minutes.to_string(),
                &decimal(summary.actual_break_hours),
                &summary.lunch_break_minutes.to_string(),
                &decimal(summary.lunch_break_hours),
                &summary.break_deficit_minutes.to_string(),
                &summary.compliance.to_string(),
            ],
        )?;
    }

    flush(csv_writer)
}

/// Writes the per-provider summary artifact.
pub fn write_provider_summaries<W: Write>(
    writer: W,
    summaries: &[ProviderSummary],
) -> EngineResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    write_record(
        &mut csv_writer,
        &[
            "ProviderId",
            "ProviderFullName",
            "TimeWorkedInHours",
            "RequiredBreakMinutes",
            "RequiredBreakHours",
            "ActualBreakMinutes",
            "ActualBreakHours",
            "LunchBreakMinutes",
            "LunchBreakHours",
            "BreakDeficitMinutes",
            "BreakDeficitHours",
            "Timesheet Count",
            "OverallCompliance",
        ],
    )?;

    for summary in summaries {
        write_record(
            &mut csv_writer,
            &[
                &summary.provider_id,
                &summary.provider_name,
                &decimal(summary.work_hours),
                &summary.required_break_minutes.to_string(),
                &decimal(summary.required_break_hours),
                &summary.actual_break_minutes.to_string(),
                &decimal(summary.actual_break_hours),
                &summary.lunch_break_minutes.to_string(),
                &decimal(summary.lunch_break_hours),
                &summary.break_deficit_minutes.to_string(),
                &decimal(summary.break_deficit_hours),
                &summary.timesheet_count.to_string(),
                &summary.compliance.to_string(),
            ],
        )?;
    }

    flush(csv_writer)
}

/// Writes the audit artifact.
///
/// System-level findings carry "N/A" in the date column.
pub fn write_audit_findings<W: Write>(writer: W, findings: &[AuditFinding]) -> EngineResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    write_record(&mut csv_writer, &AUDIT_HEADER)?;

    for finding in findings {
        let date = finding
            .date_of_service
            .map(format_date)
            .unwrap_or_else(|| "N/A".to_string());
        write_record(
            &mut csv_writer,
            &[
                &finding.finding_type,
                &finding.provider_id,
                &finding.provider_name,
                &date,
                &finding.issue,
                &finding.severity.to_string(),
            ],
        )?;
    }

    flush(csv_writer)
}

fn write_record<W: Write, S: AsRef<[u8]>>(
    csv_writer: &mut csv::Writer<W>,
    fields: &[S],
) -> EngineResult<()> {
    csv_writer
        .write_record(fields)
        .map_err(|e| EngineError::CsvWrite {
            message: e.to_string(),
        })
}

fn flush<W: Write>(mut csv_writer: csv::Writer<W>) -> EngineResult<()> {
    csv_writer.flush().map_err(|e| EngineError::CsvWrite {
        message: e.to_string(),
    })
}

fn format_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

fn decimal(value: Decimal) -> String {
    value.to_string()
}
