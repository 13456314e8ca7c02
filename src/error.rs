//! Error types for the payroll ledger engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the engine can report. Run-level errors are returned to
//! the caller; employee-level and pay-code-level errors are absorbed by the
//! employee processor and surface only as warnings on the batch.

use thiserror::Error;

/// The main error type for the payroll ledger engine.
///
/// # Example
///
/// ```
/// use payroll_ledger::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/columns.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/columns.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
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

    /// A column bound in the configuration is absent from an input table.
    #[error("Column '{column}' not found in {table} table")]
    ColumnNotFound {
        /// The table that was inspected (e.g. "employee", "rules").
        table: String,
        /// The bound column name that is missing.
        column: String,
    },

    /// A required employee identity field is absent or cannot be cast.
    #[error("Missing employee identity field '{field}': {message}")]
    MissingIdentity {
        /// The identity field that could not be resolved.
        field: String,
        /// A description of what went wrong.
        message: String,
    },

    /// A pay-code value could not be coerced to a representable amount.
    #[error("Value '{value}' for pay-code '{pay_code}' cannot be converted to an amount")]
    ValueConversion {
        /// The pay-code whose value failed conversion.
        pay_code: String,
        /// The offending value, rendered as text.
        value: String,
    },

    /// More than one distinct payroll period was found in a single run.
    #[error("Multiple periods found; expected only one: {}", periods.join(", "))]
    AmbiguousPeriod {
        /// The distinct periods that were found.
        periods: Vec<String>,
    },

    /// A summed ledger amount exceeded the decimal range.
    #[error("Amount overflow while totalling {context}")]
    AmountOverflow {
        /// What was being totalled.
        context: String,
    },

    /// A raw payroll record could not be flattened into a table row.
    #[error("Invalid payroll record: {message}")]
    InvalidRecord {
        /// A description of what made the record invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
