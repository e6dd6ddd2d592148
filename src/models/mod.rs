//! Core data models for the Break-Time Compliance Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod finding;
mod record;
mod report;

pub use finding::{AuditFinding, Severity};
pub use record::{Dataset, LUNCH_BREAK_CODE, SHORT_BREAK_CODE, TimesheetRecord};
pub use report::{
    Compliance, DailyComplianceRow, ProviderDateSummary, ProviderSummary, RunSummary,
};
pub(crate) use report::minutes_to_hours;
