//! Work-hour aggregation grouped by provider and date.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::BreakConfig;
use crate::models::TimesheetRecord;

/// Aggregated work time for one (provider, date) group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkHourGroup {
    /// The provider's identifier.
    pub provider_id: String,
    /// The provider's full name.
    pub provider_name: String,
    /// The date of service.
    pub date_of_service: NaiveDate,
    /// Summed hours over non-excluded rows.
    pub work_hours: Decimal,
    /// Summed drive time over non-excluded rows, converted to hours.
    pub drive_time_hours: Decimal,
}

impl WorkHourGroup {
    /// Hours counted toward the break requirement.
    ///
    /// Drive time is added only when the configuration enables it.
    pub fn billable_hours(&self, include_drive_time: bool) -> Decimal {
        if include_drive_time {
            self.work_hours + self.drive_time_hours
        } else {
            self.work_hours
        }
    }
}

/// Groups records by (provider, date) and sums work and drive time.
///
/// Excluded codes are removed before summing `hours_worked`. Every distinct
/// (provider_id, provider_name, date) triple present in the input produces a
/// group, even when all of its rows are excluded (such a group legitimately
/// shows zero hours). Groups are returned in sorted-key order so iteration
/// is deterministic.
///
/// # Example
///
/// ```
/// use breaktime_engine::calculation::aggregate_work_hours;
/// use breaktime_engine::config::BreakConfig;
///
/// let groups = aggregate_work_hours(&[], &BreakConfig::default());
/// assert!(groups.is_empty());
/// ```
pub fn aggregate_work_hours(
    records: &[TimesheetRecord],
    config: &BreakConfig,
) -> Vec<WorkHourGroup> {
    let mut groups: BTreeMap<(String, String, NaiveDate), (Decimal, Decimal)> = BTreeMap::new();

    for record in records {
        let key = (
            record.provider_id.clone(),
            record.provider_name.clone(),
            record.date_of_service,
        );
        let entry = groups.entry(key).or_insert((Decimal::ZERO, Decimal::ZERO));

        if !config.is_excluded(&record.procedure_code) {
            entry.0 += record.hours_worked;
            entry.1 += record.drive_time_minutes;
        }
    }

    groups
        .into_iter()
        .map(
            |((provider_id, provider_name, date_of_service), (work_hours, drive_minutes))| {
                WorkHourGroup {
                    provider_id,
                    provider_name,
                    date_of_service,
                    work_hours,
                    drive_time_hours: drive_minutes / Decimal::from(60),
                }
            },
        )
        .collect()
}
