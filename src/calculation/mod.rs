//! Calculation logic for the Break-Time Compliance Engine.
//!
//! This module contains the break-duration rule engine, the actual-break
//! extractor, the per-provider/per-day work-hour aggregator, and the report
//! builder that joins them into the three compliance report tiers.

mod actual_breaks;
mod break_rules;
mod report_builder;
mod work_hours;

pub use actual_breaks::{BreakMinutes, actual_breaks};
pub use break_rules::required_break_minutes;
pub use report_builder::{
    build_daily_rows, build_provider_date_summaries, build_provider_summaries,
};
pub use work_hours::{WorkHourGroup, aggregate_work_hours};
