//! Report row models for the three compliance report tiers.
//!
//! All "hours" fields are derived from their paired "minutes" fields by
//! dividing by 60 so the two never drift apart through rounding.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Break compliance status for a work period.
///
/// # Example
///
/// ```
/// use breaktime_engine::models::Compliance;
///
/// assert_eq!(Compliance::from_deficit(0), Compliance::Compliant);
/// assert_eq!(Compliance::from_deficit(10).to_string(), "Non-Compliant");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compliance {
    /// Actual break minutes met or exceeded the requirement.
    Compliant,
    /// A break-time deficit remains.
    #[serde(rename = "Non-Compliant")]
    NonCompliant,
}

impl Compliance {
    /// Derives the status from a deficit in minutes.
    pub fn from_deficit(deficit_minutes: i64) -> Self {
        if deficit_minutes == 0 {
            Compliance::Compliant
        } else {
            Compliance::NonCompliant
        }
    }
}

impl std::fmt::Display for Compliance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Compliance::Compliant => write!(f, "Compliant"),
            Compliance::NonCompliant => write!(f, "Non-Compliant"),
        }
    }
}

/// Converts a minute total to its paired hours field.
pub(crate) fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::from(minutes) / Decimal::from(60)
}

/// Per (provider, date) compliance result.
///
/// Created by the report builder and never mutated afterwards; higher-level
/// summaries are built by summing these rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyComplianceRow {
    /// The provider's identifier.
    pub provider_id: String,
    /// The provider's full name.
    pub provider_name: String,
    /// The date of service.
    pub date_of_service: NaiveDate,
    /// Work hours after excluded codes are removed.
    pub work_hours: Decimal,
    /// Drive time converted to hours.
    pub drive_time_hours: Decimal,
    /// Required break minutes derived from the rule engine.
    pub required_break_minutes: i64,
    /// Required break hours (minutes / 60).
    pub required_break_hours: Decimal,
    /// Actual short-break minutes taken.
    pub actual_break_minutes: i64,
    /// Actual short-break hours (minutes / 60).
    pub actual_break_hours: Decimal,
    /// Lunch break minutes taken.
    pub lunch_break_minutes: i64,
    /// Lunch break hours (minutes / 60).
    pub lunch_break_hours: Decimal,
    /// Deficit minutes: max(0, required - actual).
    pub break_deficit_minutes: i64,
    /// Compliance status, Compliant iff the deficit is zero.
    pub compliance: Compliance,
}

/// Daily rows summed by (provider, date).
///
/// Compliance is recomputed from the summed deficit, not re-derived from
/// summed hours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderDateSummary {
    /// The provider's identifier.
    pub provider_id: String,
    /// The provider's full name.
    pub provider_name: String,
    /// The date of service.
    pub date_of_service: NaiveDate,
    /// Summed work hours.
    pub work_hours: Decimal,
    /// Summed required break minutes.
    pub required_break_minutes: i64,
    /// Required break hours (minutes / 60).
    pub required_break_hours: Decimal,
    /// Summed actual break minutes.
    pub actual_break_minutes: i64,
    /// Actual break hours (minutes / 60).
    pub actual_break_hours: Decimal,
    /// Summed lunch break minutes.
    pub lunch_break_minutes: i64,
    /// Lunch break hours (minutes / 60).
    pub lunch_break_hours: Decimal,
    /// Summed deficit minutes.
    pub break_deficit_minutes: i64,
    /// Compliance recomputed from the summed deficit.
    pub compliance: Compliance,
}

/// Daily rows summed by provider across all dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderSummary {
    /// The provider's identifier.
    pub provider_id: String,
    /// The provider's full name.
    pub provider_name: String,
    /// Summed work hours across all dates.
    pub work_hours: Decimal,
    /// Summed required break minutes.
    pub required_break_minutes: i64,
    /// Required break hours (minutes / 60).
    pub required_break_hours: Decimal,
    /// Summed actual break minutes.
    pub actual_break_minutes: i64,
    /// Actual break hours (minutes / 60).
    pub actual_break_hours: Decimal,
    /// Summed lunch break minutes.
    pub lunch_break_minutes: i64,
    /// Lunch break hours (minutes / 60).
    pub lunch_break_hours: Decimal,
    /// Summed deficit minutes.
    pub break_deficit_minutes: i64,
    /// Deficit hours (minutes / 60).
    pub break_deficit_hours: Decimal,
    /// Number of daily rows contributing to this summary.
    pub timesheet_count: usize,
    /// Overall compliance recomputed from the summed deficit.
    pub compliance: Compliance,
}

/// Headline numbers for one completed pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Total input rows processed.
    pub total_records: usize,
    /// Distinct providers in the input.
    pub total_providers: usize,
    /// Service date range as "mm/dd/yyyy to mm/dd/yyyy".
    pub date_range: String,
    /// Number of audit findings emitted.
    pub audit_issue_count: usize,
    /// Whether the timing audit ran (both timestamp columns present).
    pub has_timing_data: bool,
}
