//! Position/timing checks on break entries.
//!
//! Classifies each break's position relative to the day's work sessions
//! using the optional session start/end timestamps.

use chrono::{Duration, NaiveDateTime};

use crate::models::{AuditFinding, Severity, TimesheetRecord};

use super::grouping::provider_date_order;

/// Breaks starting or ending within this many seconds of another break are
/// back-to-back.
const BACK_TO_BACK_WINDOW_SECS: i64 = 300;

/// A work-to-break gap longer than this many minutes is flagged.
const LONG_GAP_MINUTES: i64 = 60;

/// Classifies break positions against work sessions per (provider, date).
///
/// Only records carrying a full session interval participate; rows whose
/// timestamps failed to parse are skipped individually. For each break:
///
/// - intersecting any work interval is High ("Overlapping Break and Work");
/// - no work before or after is Medium ("Isolated Break Entry");
/// - work before but none after is Low ("Break at End of Day");
/// - another break ending within five minutes of this one's start (or vice
///   versa) is Medium ("Back-to-Back Breaks");
/// - independently of the classes above, a gap of more than an hour since
///   the previous work session adds a Low "Long Gap Before Break" finding.
pub fn timing_findings(records: &[TimesheetRecord]) -> Vec<AuditFinding> {
    let mut findings = Vec::new();

    let timed: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.session_interval().is_some())
        .map(|(i, _)| i)
        .collect();

    for (_, _, mut indices) in provider_date_order(records, &timed) {
        indices.sort_by_key(|&i| records[i].session_start);

        let work: Vec<(NaiveDateTime, NaiveDateTime)> = indices
            .iter()
            .filter(|&&i| !records[i].is_break())
            .filter_map(|&i| records[i].session_interval())
            .collect();
        let breaks: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| records[i].is_break())
            .collect();

        for &break_index in &breaks {
            let record = &records[break_index];
            let Some((break_start, break_end)) = record.session_interval() else {
                continue;
            };

            let overlapping = work
                .iter()
                .any(|&(start, end)| start < break_end && end > break_start);
            let work_before: Vec<NaiveDateTime> = work
                .iter()
                .filter(|&&(_, end)| end <= break_start)
                .map(|&(_, end)| end)
                .collect();
            let has_work_after = work.iter().any(|&(start, _)| start >= break_end);

            if overlapping {
                findings.push(positional_finding(
                    record,
                    "Overlapping Break and Work",
                    format!(
                        "{} overlaps with work session ({})",
                        record.procedure_code,
                        window(break_start, break_end)
                    ),
                    Severity::High,
                ));
            } else if work_before.is_empty() && !has_work_after {
                findings.push(positional_finding(
                    record,
                    "Isolated Break Entry",
                    format!(
                        "{} appears isolated from work sessions ({})",
                        record.procedure_code,
                        window(break_start, break_end)
                    ),
                    Severity::Medium,
                ));
            } else if !has_work_after {
                findings.push(positional_finding(
                    record,
                    "Break at End of Day",
                    format!(
                        "{} occurs at end of work day ({})",
                        record.procedure_code,
                        window(break_start, break_end)
                    ),
                    Severity::Low,
                ));
            } else if is_back_to_back(records, &breaks, break_index, break_start, break_end) {
                findings.push(positional_finding(
                    record,
                    "Back-to-Back Breaks",
                    format!(
                        "{} occurs immediately after another break ({})",
                        record.procedure_code,
                        window(break_start, break_end)
                    ),
                    Severity::Medium,
                ));
            }

            // A record can produce both a positional finding and a gap
            // finding.
            if let Some(last_work_end) = work_before.iter().max() {
                let gap = break_start - *last_work_end;
                if gap > Duration::minutes(LONG_GAP_MINUTES) {
                    findings.push(positional_finding(
                        record,
                        "Long Gap Before Break",
                        format!(
                            "{} has {} minute gap from previous work session",
                            record.procedure_code,
                            gap.num_minutes()
                        ),
                        Severity::Low,
                    ));
                }
            }
        }
    }

    findings
}

fn is_back_to_back(
    records: &[TimesheetRecord],
    break_indices: &[usize],
    current: usize,
    break_start: NaiveDateTime,
    break_end: NaiveDateTime,
) -> bool {
    break_indices
        .iter()
        .filter(|&&i| i != current)
        .filter_map(|&i| records[i].session_interval())
        .any(|(other_start, other_end)| {
            (other_end - break_start).num_seconds().abs() < BACK_TO_BACK_WINDOW_SECS
                || (break_end - other_start).num_seconds().abs() < BACK_TO_BACK_WINDOW_SECS
        })
}

fn positional_finding(
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

fn window(start: NaiveDateTime, end: NaiveDateTime) -> String {
    format!("{} - {}", start.format("%H:%M"), end.format("%H:%M"))
}
