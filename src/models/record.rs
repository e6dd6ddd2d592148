//! Timesheet record model and the in-memory dataset wrapper.
//!
//! This module defines the [`TimesheetRecord`] struct representing a single
//! validated input row and the [`Dataset`] owning one pipeline run's records.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Procedure code identifying a short (ten minute) break entry.
pub const SHORT_BREAK_CODE: &str = "10 Minute Break";

/// Procedure code identifying a lunch break entry.
pub const LUNCH_BREAK_CODE: &str = "Lunch Break";

/// A single timesheet entry for one provider on one date.
///
/// Records are immutable once read from input. A record belongs to exactly
/// one (provider, date) group.
///
/// # Example
///
/// ```
/// use breaktime_engine::models::TimesheetRecord;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let record = TimesheetRecord {
///     provider_id: "1".to_string(),
///     provider_name: "Jane Doe".to_string(),
///     date_of_service: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     procedure_code: "Work".to_string(),
///     hours_worked: Decimal::from_str("5.0").unwrap(),
///     drive_time_minutes: Decimal::ZERO,
///     session_start: None,
///     session_end: None,
/// };
/// assert!(!record.is_break());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimesheetRecord {
    /// The provider's identifier.
    pub provider_id: String,
    /// The provider's full name ("First Last").
    pub provider_name: String,
    /// The calendar date of service (no time component).
    pub date_of_service: NaiveDate,
    /// The activity tag for this entry (work task, break, lunch, leave, ...).
    pub procedure_code: String,
    /// Hours recorded against this entry (non-negative).
    pub hours_worked: Decimal,
    /// Drive time in minutes (non-negative, defaults to 0).
    #[serde(default)]
    pub drive_time_minutes: Decimal,
    /// Session start timestamp, when timing columns are present and parseable.
    #[serde(default)]
    pub session_start: Option<NaiveDateTime>,
    /// Session end timestamp, when timing columns are present and parseable.
    #[serde(default)]
    pub session_end: Option<NaiveDateTime>,
}

impl TimesheetRecord {
    /// Returns true if this entry is a short break.
    pub fn is_short_break(&self) -> bool {
        self.procedure_code == SHORT_BREAK_CODE
    }

    /// Returns true if this entry is a lunch break.
    pub fn is_lunch_break(&self) -> bool {
        self.procedure_code == LUNCH_BREAK_CODE
    }

    /// Returns true if this entry is either known break type.
    pub fn is_break(&self) -> bool {
        self.is_short_break() || self.is_lunch_break()
    }

    /// Returns the session interval when both timestamps are present.
    pub fn session_interval(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match (self.session_start, self.session_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

/// One pipeline run's validated records plus ingest-level metadata.
///
/// A dataset is exclusively owned by its run; no shared mutable state exists
/// between concurrent runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// The validated timesheet records, in input order.
    pub records: Vec<TimesheetRecord>,
    /// Whether both `DateTimeFrom` and `DateTimeTo` columns were present.
    pub has_timing_data: bool,
    /// Number of rows whose timing values were present but unparseable.
    pub timing_parse_failures: usize,
}

impl Dataset {
    /// Total number of input rows.
    pub fn total_records(&self) -> usize {
        self.records.len()
    }

    /// Number of distinct provider identifiers in the dataset.
    pub fn total_providers(&self) -> usize {
        self.records
            .iter()
            .map(|r| r.provider_id.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    /// The service date range as "mm/dd/yyyy to mm/dd/yyyy".
    ///
    /// Returns `None` for an empty dataset.
    pub fn date_range(&self) -> Option<String> {
        let min = self.records.iter().map(|r| r.date_of_service).min()?;
        let max = self.records.iter().map(|r| r.date_of_service).max()?;
        Some(format!(
            "{} to {}",
            min.format("%m/%d/%Y"),
            max.format("%m/%d/%Y")
        ))
    }

    /// Returns true when at least one record carries a full session interval.
    pub fn has_parseable_timing(&self) -> bool {
        self.records.iter().any(|r| r.session_interval().is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_record(provider_id: &str, date: &str, code: &str, hours: &str) -> TimesheetRecord {
        TimesheetRecord {
            provider_id: provider_id.to_string(),
            provider_name: "Jane Doe".to_string(),
            date_of_service: NaiveDate::from_str(date).unwrap(),
            procedure_code: code.to_string(),
            hours_worked: dec(hours),
            drive_time_minutes: Decimal::ZERO,
            session_start: None,
            session_end: None,
        }
    }

    #[test]
    fn test_break_code_classification() {
        assert!(make_record("1", "2026-01-15", SHORT_BREAK_CODE, "0.17").is_short_break());
        assert!(make_record("1", "2026-01-15", LUNCH_BREAK_CODE, "0.5").is_lunch_break());
        assert!(make_record("1", "2026-01-15", LUNCH_BREAK_CODE, "0.5").is_break());
        assert!(!make_record("1", "2026-01-15", "Work", "8.0").is_break());
    }

    #[test]
    fn test_session_interval_requires_both_timestamps() {
        let mut record = make_record("1", "2026-01-15", "Work", "8.0");
        assert!(record.session_interval().is_none());

        record.session_start =
            NaiveDateTime::parse_from_str("2026-01-15 09:00:00", "%Y-%m-%d %H:%M:%S").ok();
        assert!(record.session_interval().is_none());

        record.session_end =
            NaiveDateTime::parse_from_str("2026-01-15 17:00:00", "%Y-%m-%d %H:%M:%S").ok();
        assert!(record.session_interval().is_some());
    }

    #[test]
    fn test_total_providers_counts_distinct_ids() {
        let dataset = Dataset {
            records: vec![
                make_record("1", "2026-01-15", "Work", "8.0"),
                make_record("1", "2026-01-16", "Work", "8.0"),
                make_record("2", "2026-01-15", "Work", "6.0"),
            ],
            has_timing_data: false,
            timing_parse_failures: 0,
        };
        assert_eq!(dataset.total_records(), 3);
        assert_eq!(dataset.total_providers(), 2);
    }

    #[test]
    fn test_date_range_formats_mm_dd_yyyy() {
        let dataset = Dataset {
            records: vec![
                make_record("1", "2026-01-16", "Work", "8.0"),
                make_record("1", "2026-01-02", "Work", "8.0"),
            ],
            has_timing_data: false,
            timing_parse_failures: 0,
        };
        assert_eq!(
            dataset.date_range().unwrap(),
            "01/02/2026 to 01/16/2026"
        );
    }

    #[test]
    fn test_date_range_empty_dataset() {
        let dataset = Dataset {
            records: vec![],
            has_timing_data: false,
            timing_parse_failures: 0,
        };
        assert!(dataset.date_range().is_none());
    }

    #[test]
    fn test_record_serialization_round_trip() {
        let record = make_record("1", "2026-01-15", "Work", "8.0");
        let json = serde_json::to_string(&record).unwrap();
        let deserialized: TimesheetRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }
}
