//! Builds the three compliance report tiers from aggregated work hours.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::BreakConfig;
use crate::models::{
    Compliance, DailyComplianceRow, ProviderDateSummary, ProviderSummary, TimesheetRecord,
    minutes_to_hours,
};

use super::actual_breaks::actual_breaks;
use super::break_rules::required_break_minutes;
use super::work_hours::WorkHourGroup;

/// Builds one [`DailyComplianceRow`] per (provider, date) group.
///
/// The rule engine runs over the group's billable hours, the extractor runs
/// over the full provider-day record set (break rows included), and the
/// deficit is `max(0, required - actual)`. All hours fields are derived from
/// their minutes fields by dividing by 60.
pub fn build_daily_rows(
    records: &[TimesheetRecord],
    groups: &[WorkHourGroup],
    config: &BreakConfig,
) -> Vec<DailyComplianceRow> {
    groups
        .iter()
        .map(|group| {
            let day_records = records.iter().filter(|r| {
                r.provider_id == group.provider_id && r.date_of_service == group.date_of_service
            });
            let breaks = actual_breaks(day_records);

            let required =
                required_break_minutes(group.billable_hours(config.include_drive_time), config);
            let deficit = (required - breaks.total).max(0);

            DailyComplianceRow {
                provider_id: group.provider_id.clone(),
                provider_name: group.provider_name.clone(),
                date_of_service: group.date_of_service,
                work_hours: group.work_hours,
                drive_time_hours: group.drive_time_hours,
                required_break_minutes: required,
                required_break_hours: minutes_to_hours(required),
                actual_break_minutes: breaks.total,
                actual_break_hours: minutes_to_hours(breaks.total),
                lunch_break_minutes: breaks.lunch,
                lunch_break_hours: minutes_to_hours(breaks.lunch),
                break_deficit_minutes: deficit,
                compliance: Compliance::from_deficit(deficit),
            }
        })
        .collect()
}

/// Sums daily rows by (provider, date).
///
/// Compliance is recomputed from the summed deficit rather than re-derived
/// from summed hours.
pub fn build_provider_date_summaries(daily: &[DailyComplianceRow]) -> Vec<ProviderDateSummary> {
    let mut sums: BTreeMap<(String, String, NaiveDate), MinuteSums> = BTreeMap::new();

    for row in daily {
        let key = (
            row.provider_id.clone(),
            row.provider_name.clone(),
            row.date_of_service,
        );
        sums.entry(key).or_default().add(row);
    }

    sums.into_iter()
        .map(
            |((provider_id, provider_name, date_of_service), totals)| ProviderDateSummary {
                provider_id,
                provider_name,
                date_of_service,
                work_hours: totals.work_hours,
                required_break_minutes: totals.required,
                required_break_hours: minutes_to_hours(totals.required),
                actual_break_minutes: totals.actual,
                actual_break_hours: minutes_to_hours(totals.actual),
                lunch_break_minutes: totals.lunch,
                lunch_break_hours: minutes_to_hours(totals.lunch),
                break_deficit_minutes: totals.deficit,
                compliance: Compliance::from_deficit(totals.deficit),
            },
        )
        .collect()
}

/// Sums daily rows by provider across all dates.
///
/// `timesheet_count` is the number of daily rows contributing to the
/// summary; overall compliance is recomputed from the summed deficit.
pub fn build_provider_summaries(daily: &[DailyComplianceRow]) -> Vec<ProviderSummary> {
    let mut sums: BTreeMap<(String, String), MinuteSums> = BTreeMap::new();

    for row in daily {
        let key = (row.provider_id.clone(), row.provider_name.clone());
        sums.entry(key).or_default().add(row);
    }

    sums.into_iter()
        .map(|((provider_id, provider_name), totals)| ProviderSummary {
            provider_id,
            provider_name,
            work_hours: totals.work_hours,
            required_break_minutes: totals.required,
            required_break_hours: minutes_to_hours(totals.required),
            actual_break_minutes: totals.actual,
            actual_break_hours: minutes_to_hours(totals.actual),
            lunch_break_minutes: totals.lunch,
            lunch_break_hours: minutes_to_hours(totals.lunch),
            break_deficit_minutes: totals.deficit,
            break_deficit_hours: minutes_to_hours(totals.deficit),
            timesheet_count: totals.rows,
            compliance: Compliance::from_deficit(totals.deficit),
        })
        .collect()
}

/// Running minute/hour sums for one summary group.
#[derive(Debug, Default)]
struct MinuteSums {
    work_hours: Decimal,
    required: i64,
    actual: i64,
    lunch: i64,
    deficit: i64,
    rows: usize,
}

impl MinuteSums {
    fn add(&mut self, row: &DailyComplianceRow) {
        self.work_hours += row.work_hours;
        self.required += row.required_break_minutes;
        self.actual += row.actual_break_minutes;
        self.lunch += row.lunch_break_minutes;
        self.deficit += row.break_deficit_minutes;
        self.rows += 1;
    }
}
