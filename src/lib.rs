//! Break-Time Compliance Engine
//!
//! This crate ingests per-provider timesheet records and computes statutory
//! break-time compliance: required break minutes per work day, actual break
//! minutes taken, and deficits, together with a data-quality audit that flags
//! suspicious or mispositioned break entries.

#![warn(missing_docs)]

pub mod audit;
pub mod calculation;
pub mod config;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod progress;
