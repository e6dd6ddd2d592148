//! Actual-break extraction from a provider's day of records.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;

use crate::models::TimesheetRecord;

/// Actual break minutes taken on one provider-day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BreakMinutes {
    /// Minutes recorded against short-break entries.
    pub total: i64,
    /// Minutes recorded against lunch-break entries.
    pub lunch: i64,
}

/// Sums the break minutes actually taken across a day's records.
///
/// Records tagged with the short-break code contribute to `total`; records
/// tagged with the lunch-break code contribute to `lunch`. Each sum is
/// converted from hours and rounded half-up to the nearest whole minute.
/// Records with any other code are ignored here.
///
/// # Example
///
/// ```
/// use breaktime_engine::calculation::actual_breaks;
///
/// let minutes = actual_breaks(&[]);
/// assert_eq!((minutes.total, minutes.lunch), (0, 0));
/// ```
pub fn actual_breaks<'a>(
    day_records: impl IntoIterator<Item = &'a TimesheetRecord>,
) -> BreakMinutes {
    let mut short_hours = Decimal::ZERO;
    let mut lunch_hours = Decimal::ZERO;

    for record in day_records {
        if record.is_short_break() {
            short_hours += record.hours_worked;
        } else if record.is_lunch_break() {
            lunch_hours += record.hours_worked;
        }
    }

    BreakMinutes {
        total: to_rounded_minutes(short_hours),
        lunch: to_rounded_minutes(lunch_hours),
    }
}

/// Converts an hour total to whole minutes, rounding .5 up.
fn to_rounded_minutes(hours: Decimal) -> i64 {
    (hours * Decimal::from(60))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_record(code: &str, hours: &str) -> TimesheetRecord {
        TimesheetRecord {
            provider_id: "1".to_string(),
            provider_name: "Jane Doe".to_string(),
            date_of_service: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            procedure_code: code.to_string(),
            hours_worked: dec(hours),
            drive_time_minutes: Decimal::ZERO,
            session_start: None,
            session_end: None,
        }
    }

    #[test]
    fn test_no_break_records_returns_zero() {
        let records = vec![make_record("Work", "8.0"), make_record("Lead BT", "1.0")];
        assert_eq!(actual_breaks(&records), BreakMinutes::default());
    }

    #[test]
    fn test_short_breaks_summed_separately_from_lunch() {
        let records = vec![
            make_record("Work", "7.0"),
            make_record("10 Minute Break", "0.17"),
            make_record("10 Minute Break", "0.17"),
            make_record("Lunch Break", "0.5"),
        ];

        let minutes = actual_breaks(&records);
        // 0.34h = 20.4 min rounds to 20; lunch 0.5h = 30 min
        assert_eq!(minutes.total, 20);
        assert_eq!(minutes.lunch, 30);
    }

    #[test]
    fn test_rounding_is_half_up() {
        // 0.175h * 60 = 10.5 minutes, rounds up to 11
        let records = vec![make_record("10 Minute Break", "0.175")];
        assert_eq!(actual_breaks(&records).total, 11);

        // 0.1708h * 60 = 10.248 minutes, rounds down to 10
        let records = vec![make_record("10 Minute Break", "0.1708")];
        assert_eq!(actual_breaks(&records).total, 10);
    }

    #[test]
    fn test_sum_rounded_once_not_per_record() {
        // Two 0.1375h breaks: each is 8.25 min, summed 16.5 min -> 17.
        // Per-record rounding would give 8 + 8 = 16.
        let records = vec![
            make_record("10 Minute Break", "0.1375"),
            make_record("10 Minute Break", "0.1375"),
        ];
        assert_eq!(actual_breaks(&records).total, 17);
    }

    #[test]
    fn test_unrecognized_codes_ignored() {
        let records = vec![
            make_record("Coffee Break", "0.25"),
            make_record("Lunch Break", "0.75"),
        ];

        let minutes = actual_breaks(&records);
        assert_eq!(minutes.total, 0);
        assert_eq!(minutes.lunch, 45);
    }
}
