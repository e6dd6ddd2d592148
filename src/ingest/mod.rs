//! CSV ingestion and schema validation.
//!
//! Reads timesheet rows, validates the required columns, and produces a
//! [`Dataset`] ready for the pipeline. Required-column problems abort the
//! run; optional columns (drive time, session timestamps) degrade to
//! defaults instead.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{Dataset, TimesheetRecord};

/// Columns every input file must carry.
const REQUIRED_COLUMNS: [&str; 6] = [
    "ProviderId",
    "ProviderFirstName",
    "ProviderLastName",
    "DateOfService",
    "TimeWorkedInHours",
    "ProcedureCode",
];

/// Date formats accepted for `DateOfService`, tried in order. Datetime
/// values are accepted too; the time component is dropped.
const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%Y-%m-%d", "%m-%d-%Y"];

/// Timestamp formats accepted for `DateTimeFrom`/`DateTimeTo`.
const DATETIME_FORMATS: [&str; 6] = [
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Reads and validates a timesheet CSV from a file path.
///
/// # Example
///
/// ```no_run
/// use breaktime_engine::ingest::read_records_from_path;
///
/// let dataset = read_records_from_path("timesheets.csv")?;
/// println!("{} records", dataset.total_records());
/// # Ok::<(), breaktime_engine::error::EngineError>(())
/// ```
pub fn read_records_from_path(path: impl AsRef<Path>) -> EngineResult<Dataset> {
    let file = File::open(path.as_ref()).map_err(|e| EngineError::CsvRead {
        message: format!("{}: {e}", path.as_ref().display()),
    })?;
    read_records(file)
}

/// Reads and validates a timesheet CSV from any reader.
///
/// Fatal conditions, in check order: missing required columns, zero data
/// rows, blank `ProviderId`, non-numeric `TimeWorkedInHours`, unparseable
/// `DateOfService`. Optional columns never abort: bad drive-time values
/// become 0 and bad timestamps become `None` (counted on the dataset).
pub fn read_records<R: Read>(reader: R) -> EngineResult<Dataset> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| EngineError::CsvRead {
            message: e.to_string(),
        })?
        .clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| column(name).is_none())
        .collect();
    if !missing.is_empty() {
        return Err(EngineError::MissingColumns {
            columns: missing.join(", "),
        });
    }

    // Presence of required columns was checked above.
    let required = |name: &str| column(name).unwrap_or(usize::MAX);
    let provider_id_col = required("ProviderId");
    let first_name_col = required("ProviderFirstName");
    let last_name_col = required("ProviderLastName");
    let date_col = required("DateOfService");
    let hours_col = required("TimeWorkedInHours");
    let code_col = required("ProcedureCode");

    let drive_time_col = column("DriveTimeMinutes");
    let start_col = column("DateTimeFrom");
    let end_col = column("DateTimeTo");
    let has_timing_data = start_col.is_some() && end_col.is_some();

    let mut records = Vec::new();
    let mut timing_parse_failures = 0usize;

    for (index, row) in csv_reader.records().enumerate() {
        let row = row.map_err(|e| EngineError::CsvRead {
            message: e.to_string(),
        })?;
        let row_number = index + 1;
        let field = |col: usize| row.get(col).unwrap_or("").trim();

        let provider_id = field(provider_id_col);
        if provider_id.is_empty() {
            return Err(EngineError::MissingValue {
                column: "ProviderId".to_string(),
                row: row_number,
            });
        }

        let hours_raw = field(hours_col);
        let hours_worked =
            Decimal::from_str(hours_raw).map_err(|_| EngineError::InvalidNumeric {
                column: "TimeWorkedInHours".to_string(),
                row: row_number,
                value: hours_raw.to_string(),
            })?;

        let date_raw = field(date_col);
        let date_of_service = parse_date(date_raw).ok_or_else(|| EngineError::InvalidDate {
            column: "DateOfService".to_string(),
            row: row_number,
            value: date_raw.to_string(),
        })?;

        let drive_time_minutes = drive_time_col
            .map(|col| parse_drive_time(field(col)))
            .unwrap_or(Decimal::ZERO);

        // (value, failed) per timestamp field; a row counts as one parse
        // failure no matter how many of its fields are bad.
        let parse_timestamp = |col: Option<usize>| -> (Option<NaiveDateTime>, bool) {
            let Some(col) = col else {
                return (None, false);
            };
            let raw = field(col);
            if raw.is_empty() {
                return (None, false);
            }
            match parse_datetime(raw) {
                Some(timestamp) => (Some(timestamp), false),
                None => {
                    debug!(row = row_number, value = raw, "unparseable session timestamp");
                    (None, true)
                }
            }
        };
        let (session_start, start_failed) = parse_timestamp(start_col);
        let (session_end, end_failed) = parse_timestamp(end_col);
        if start_failed || end_failed {
            timing_parse_failures += 1;
        }

        records.push(TimesheetRecord {
            provider_id: provider_id.to_string(),
            provider_name: format!("{} {}", field(first_name_col), field(last_name_col)),
            date_of_service,
            procedure_code: field(code_col).to_string(),
            hours_worked,
            drive_time_minutes,
            session_start,
            session_end,
        });
    }

    if records.is_empty() {
        return Err(EngineError::EmptyDataset);
    }

    debug!(
        records = records.len(),
        has_timing_data, timing_parse_failures, "dataset ingested"
    );

    Ok(Dataset {
        records,
        has_timing_data,
        timing_parse_failures,
    })
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    // Accept datetime values too, keeping only the date.
    parse_datetime(value).map(|dt| dt.date())
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    for format in DATETIME_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, format) {
            return Some(timestamp);
        }
    }
    None
}

/// Drive time degrades instead of aborting: blank or non-numeric values
/// become 0, negatives are clamped to 0.
fn parse_drive_time(value: &str) -> Decimal {
    if value.is_empty() {
        return Decimal::ZERO;
    }
    match Decimal::from_str(value) {
        Ok(minutes) if minutes > Decimal::ZERO => minutes,
        _ => Decimal::ZERO,
    }
}
