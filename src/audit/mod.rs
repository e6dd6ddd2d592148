//! Two-pass audit engine for break entries.
//!
//! The audit runs three passes over a dataset and concatenates their
//! findings in a fixed order:
//!
//! 1. duration checks ([`duration_findings`]),
//! 2. timing/position checks ([`timing_findings`]), when session
//!    timestamps are available,
//! 3. cross-record ratio checks comparing break time against work time.
//!
//! Findings never alter compliance results; the audit is a read-only pass
//! producing review material alongside the reports.

mod duration;
mod grouping;
mod timing;

pub use duration::duration_findings;
pub use timing::timing_findings;

use rust_decimal::Decimal;

use crate::models::{AuditFinding, Dataset, Severity, TimesheetRecord};

use grouping::provider_date_order;

/// Runs all audit passes over the dataset.
///
/// The timing pass only runs when the input carried timing columns. If
/// timestamps were present but none survived parsing, a single system-level
/// "Timing Analysis Error" finding stands in for the pass instead of failing
/// the run.
pub fn audit_break_entries(dataset: &Dataset) -> Vec<AuditFinding> {
    let mut findings = duration_findings(&dataset.records);

    if dataset.has_timing_data {
        if dataset.has_parseable_timing() {
            findings.extend(timing_findings(&dataset.records));
        } else if dataset.timing_parse_failures > 0 {
            findings.push(AuditFinding::timing_analysis_error(
                "session timestamps present but none could be parsed",
            ));
        }
    }

    findings.extend(cross_record_findings(&dataset.records));
    findings
}

/// Compares each provider-day's total break time against its work time.
///
/// Break time above 30% of work time is High severity; any break time on a
/// day with under two work hours is Medium. Both findings can apply to the
/// same day.
pub fn cross_record_findings(records: &[TimesheetRecord]) -> Vec<AuditFinding> {
    let mut findings = Vec::new();
    let all_indices: Vec<usize> = (0..records.len()).collect();

    for (provider_id, date, indices) in provider_date_order(records, &all_indices) {
        let work_hours: Decimal = indices
            .iter()
            .filter(|&&i| !records[i].is_break())
            .map(|&i| records[i].hours_worked)
            .sum();
        let break_hours: Decimal = indices
            .iter()
            .filter(|&&i| records[i].is_break())
            .map(|&i| records[i].hours_worked)
            .sum();
        let provider_name = records[indices[0]].provider_name.clone();

        // Breaks above 30% of the day's work time are flagged.
        let ratio_limit = Decimal::new(3, 1);
        if work_hours > Decimal::ZERO && break_hours > work_hours * ratio_limit {
            let percentage = break_hours / work_hours * Decimal::from(100);
            findings.push(AuditFinding {
                finding_type: "Excessive Break Time".to_string(),
                provider_id: provider_id.clone(),
                provider_name: provider_name.clone(),
                date_of_service: Some(date),
                issue: format!(
                    "Break time ({break_hours:.2}h) is {percentage:.1}% of work time ({work_hours:.2}h)"
                ),
                severity: Severity::High,
            });
        }

        if work_hours < Decimal::from(2) && break_hours > Decimal::ZERO {
            findings.push(AuditFinding {
                finding_type: "Low Work Hours with Breaks".to_string(),
                provider_id,
                provider_name,
                date_of_service: Some(date),
                issue: format!(
                    "Only {work_hours:.2} work hours but {break_hours:.2} break hours recorded"
                ),
                severity: Severity::Medium,
            });
        }
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_record(provider_id: &str, code: &str, hours: &str) -> TimesheetRecord {
        TimesheetRecord {
            provider_id: provider_id.to_string(),
            provider_name: format!("Provider {provider_id}"),
            date_of_service: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            procedure_code: code.to_string(),
            hours_worked: dec(hours),
            drive_time_minutes: Decimal::ZERO,
            session_start: None,
            session_end: None,
        }
    }

    fn untimed_dataset(records: Vec<TimesheetRecord>) -> Dataset {
        Dataset {
            records,
            has_timing_data: false,
            timing_parse_failures: 0,
        }
    }

    #[test]
    fn test_excessive_break_time_flagged_high() {
        let records = vec![
            make_record("1", "Work", "5.0"),
            make_record("1", "Lunch Break", "2.0"),
        ];
        let findings = cross_record_findings(&records);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].finding_type, "Excessive Break Time");
        assert_eq!(findings[0].severity, Severity::High);
        assert_eq!(
            findings[0].issue,
            "Break time (2.00h) is 40.0% of work time (5.00h)"
        );
    }

    #[test]
    fn test_issue_strings_padded_at_whole_numbers() {
        // Whole-number hours and percentages still render with fixed
        // decimal places.
        let records = vec![
            make_record("1", "Work", "1"),
            make_record("1", "Lunch Break", "2"),
        ];
        let findings = cross_record_findings(&records);

        assert_eq!(
            findings[0].issue,
            "Break time (2.00h) is 200.0% of work time (1.00h)"
        );
        assert_eq!(
            findings[1].issue,
            "Only 1.00 work hours but 2.00 break hours recorded"
        );
    }

    #[test]
    fn test_break_ratio_at_limit_not_flagged() {
        let records = vec![
            make_record("1", "Work", "5.0"),
            make_record("1", "Lunch Break", "1.5"),
        ];
        assert!(cross_record_findings(&records).is_empty());
    }

    #[test]
    fn test_low_work_hours_with_breaks_flagged_medium() {
        let records = vec![
            make_record("1", "Work", "1.5"),
            make_record("1", "10 Minute Break", "0.17"),
        ];
        let findings = cross_record_findings(&records);

        let low = findings
            .iter()
            .find(|f| f.finding_type == "Low Work Hours with Breaks")
            .unwrap();
        assert_eq!(low.severity, Severity::Medium);
        assert_eq!(
            low.issue,
            "Only 1.50 work hours but 0.17 break hours recorded"
        );
    }

    #[test]
    fn test_breaks_without_work_skip_ratio_check() {
        // Zero work hours: the ratio is undefined, but the low-hours check
        // still fires.
        let records = vec![make_record("1", "Lunch Break", "0.5")];
        let findings = cross_record_findings(&records);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].finding_type, "Low Work Hours with Breaks");
    }

    #[test]
    fn test_both_cross_record_findings_can_coexist() {
        let records = vec![
            make_record("1", "Work", "1.0"),
            make_record("1", "Lunch Break", "0.5"),
        ];
        let findings = cross_record_findings(&records);

        let types: Vec<&str> = findings.iter().map(|f| f.finding_type.as_str()).collect();
        assert_eq!(
            types,
            vec!["Excessive Break Time", "Low Work Hours with Breaks"]
        );
    }

    #[test]
    fn test_audit_order_is_duration_then_timing_then_cross_record() {
        let ts = |time: &str| {
            NaiveDateTime::parse_from_str(&format!("2026-01-15 {time}"), "%Y-%m-%d %H:%M:%S").ok()
        };

        let mut work = make_record("1", "Work", "5.0");
        work.session_start = ts("09:00:00");
        work.session_end = ts("17:00:00");
        let mut lunch = make_record("1", "Lunch Break", "2.5");
        lunch.session_start = ts("12:00:00");
        lunch.session_end = ts("14:30:00");

        let dataset = Dataset {
            records: vec![work, lunch],
            has_timing_data: true,
            timing_parse_failures: 0,
        };
        let findings = audit_break_entries(&dataset);

        let types: Vec<&str> = findings.iter().map(|f| f.finding_type.as_str()).collect();
        assert_eq!(
            types,
            vec![
                "Long Lunch Duration",
                "Overlapping Break and Work",
                "Excessive Break Time",
            ]
        );
    }

    #[test]
    fn test_timing_pass_skipped_without_timing_columns() {
        let dataset = untimed_dataset(vec![
            make_record("1", "Work", "8.0"),
            make_record("1", "10 Minute Break", "0.17"),
        ]);
        assert!(audit_break_entries(&dataset).is_empty());
    }

    #[test]
    fn test_unparseable_timing_degrades_to_system_finding() {
        let dataset = Dataset {
            records: vec![
                make_record("1", "Work", "8.0"),
                make_record("1", "10 Minute Break", "0.17"),
            ],
            has_timing_data: true,
            timing_parse_failures: 2,
        };
        let findings = audit_break_entries(&dataset);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].finding_type, "Timing Analysis Error");
        assert_eq!(findings[0].provider_id, "N/A");
        assert_eq!(findings[0].severity, Severity::Low);
    }

    #[test]
    fn test_timing_columns_without_values_produce_nothing() {
        // Columns present but every row blank: no failures, no error finding.
        let dataset = Dataset {
            records: vec![make_record("1", "Work", "8.0")],
            has_timing_data: true,
            timing_parse_failures: 0,
        };
        assert!(audit_break_entries(&dataset).is_empty());
    }
}
