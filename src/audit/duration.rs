//! Duration-sanity checks on break entries.
//!
//! The tolerance windows here are deliberately fixed minute ranges keyed by
//! the entry's declared break type. They are independent of the configurable
//! break thresholds; changing them would alter observable audit output.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use crate::models::{AuditFinding, Severity, TimesheetRecord};

use super::grouping::provider_date_order;

/// Checks every break entry's recorded duration against its tolerance window.
///
/// Short-break entries longer than 30 minutes or shorter than 6 minutes are
/// flagged; lunch entries longer than 120 minutes or shorter than 15 minutes
/// are flagged. Over-window findings are Medium severity, under-window Low.
/// Entries are visited grouped by provider then date, in first-appearance
/// order, so output is deterministic.
pub fn duration_findings(records: &[TimesheetRecord]) -> Vec<AuditFinding> {
    let mut findings = Vec::new();

    let break_indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_break())
        .map(|(i, _)| i)
        .collect();

    for (_, _, indices) in provider_date_order(records, &break_indices) {
        for index in indices {
            let record = &records[index];
            let minutes = record.hours_worked * Decimal::from(60);

            if record.is_short_break() {
                if minutes > Decimal::from(30) {
                    findings.push(duration_finding(
                        record,
                        "Suspicious Break Duration",
                        format!(
                            "10 Minute Break recorded as {} hours ({} minutes)",
                            two_dp(record.hours_worked),
                            whole(minutes)
                        ),
                        Severity::Medium,
                    ));
                } else if minutes < Decimal::from(6) {
                    findings.push(duration_finding(
                        record,
                        "Short Break Duration",
                        format!(
                            "10 Minute Break recorded as only {} hours ({} minutes)",
                            two_dp(record.hours_worked),
                            whole(minutes)
                        ),
                        Severity::Low,
                    ));
                }
            } else if record.is_lunch_break() {
                if minutes > Decimal::from(120) {
                    findings.push(duration_finding(
                        record,
                        "Long Lunch Duration",
                        format!(
                            "Lunch Break recorded as {} hours ({} minutes)",
                            two_dp(record.hours_worked),
                            whole(minutes)
                        ),
                        Severity::Medium,
                    ));
                } else if minutes < Decimal::from(15) {
                    findings.push(duration_finding(
                        record,
                        "Short Lunch Duration",
                        format!(
                            "Lunch Break recorded as only {} hours ({} minutes)",
                            two_dp(record.hours_worked),
                            whole(minutes)
                        ),
                        Severity::Low,
                    ));
                }
            }
        }
    }

    findings
}

fn duration_finding(
    record: &TimesheetRecord,
    finding_type: &str,
    issue: String,
    severity: Severity,
) -> AuditFinding {
    AuditFinding {
        finding_type: finding_type.to_string(),
        provider_id: record.provider_id.clone(),
        provider_name: record.provider_name.clone(),
        date_of_service: Some(record.date_of_service),
        issue,
        severity,
    }
}

fn two_dp(value: Decimal) -> String {
    format!("{value:.2}")
}

fn whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
