//! Error types for the Break-Time Compliance Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while ingesting timesheet data,
//! resolving configuration, and running the compliance pipeline.

use thiserror::Error;

/// The main error type for the Break-Time Compliance Engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application. Validation
/// errors are fatal for a pipeline run: the run aborts before any output is
/// written and the caller is responsible for surfacing the message.
///
/// # Example
///
/// ```
/// use breaktime_engine::error::EngineError;
///
/// let error = EngineError::MissingColumns {
///     columns: "ProviderId, ProcedureCode".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Missing required columns: ProviderId, ProcedureCode"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// One or more required input columns are missing from the dataset.
    #[error("Missing required columns: {columns}")]
    MissingColumns {
        /// Comma-separated list of the missing column names.
        columns: String,
    },

    /// The input dataset contains no data rows.
    #[error("The input dataset is empty")]
    EmptyDataset,

    /// A required column contains an empty value.
    #[error("Column '{column}' contains an empty value at row {row}")]
    MissingValue {
        /// The column with the empty value.
        column: String,
        /// The 1-based data row number.
        row: usize,
    },

    /// A numeric column contains a value that could not be parsed.
    #[error("Column '{column}' contains non-numeric value '{value}' at row {row}")]
    InvalidNumeric {
        /// The column with the bad value.
        column: String,
        /// The 1-based data row number.
        row: usize,
        /// The raw value that failed to parse.
        value: String,
    },

    /// A date column contains a value that could not be parsed.
    #[error("Column '{column}' contains unparseable date '{value}' at row {row}")]
    InvalidDate {
        /// The column with the bad value.
        column: String,
        /// The 1-based data row number.
        row: usize,
        /// The raw value that failed to parse.
        value: String,
    },

    /// The input CSV could not be read.
    #[error("Failed to read input CSV: {message}")]
    CsvRead {
        /// A description of the read failure.
        message: String,
    },

    /// A report artifact could not be written.
    #[error("Failed to write report CSV: {message}")]
    CsvWrite {
        /// A description of the write failure.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Resolved configuration values violate an engine invariant.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the invalid configuration.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_columns_displays_names() {
        let error = EngineError::MissingColumns {
            columns: "DateOfService, ProcedureCode".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Missing required columns: DateOfService, ProcedureCode"
        );
    }

    #[test]
    fn test_empty_dataset_display() {
        assert_eq!(
            EngineError::EmptyDataset.to_string(),
            "The input dataset is empty"
        );
    }

    #[test]
    fn test_missing_value_displays_column_and_row() {
        let error = EngineError::MissingValue {
            column: "ProviderId".to_string(),
            row: 3,
        };
        assert_eq!(
            error.to_string(),
            "Column 'ProviderId' contains an empty value at row 3"
        );
    }

    #[test]
    fn test_invalid_numeric_displays_value() {
        let error = EngineError::InvalidNumeric {
            column: "TimeWorkedInHours".to_string(),
            row: 7,
            value: "eight".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Column 'TimeWorkedInHours' contains non-numeric value 'eight' at row 7"
        );
    }

    #[test]
    fn test_invalid_date_displays_value() {
        let error = EngineError::InvalidDate {
            column: "DateOfService".to_string(),
            row: 2,
            value: "not-a-date".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Column 'DateOfService' contains unparseable date 'not-a-date' at row 2"
        );
    }

    #[test]
    fn test_invalid_config_displays_message() {
        let error = EngineError::InvalidConfig {
            message: "break thresholds must be strictly increasing".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration: break thresholds must be strictly increasing"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_empty_dataset() -> EngineResult<()> {
            Err(EngineError::EmptyDataset)
        }

        fn propagates_error() -> EngineResult<()> {
            returns_empty_dataset()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
