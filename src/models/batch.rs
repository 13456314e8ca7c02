//! Ledger batch models.
//!
//! This module contains the [`LedgerBatch`] type and its associated
//! structures that capture the output of one engine run: the detailed and
//! grouped tables, run totals, and the warnings for everything that was
//! absorbed along the way.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ledger_line::{DetailedLedgerLine, GroupedLedgerLine};

/// Identifies the kind of condition a warning reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningCode {
    /// An employee was skipped because an identity field was unusable.
    MissingIdentity,
    /// A pay-code was skipped because its value was not a usable amount.
    ValueConversion,
    /// A grouped bucket mixed debit and credit contributions.
    InconsistentAccountType,
}

/// A condition that was absorbed rather than failing the run.
///
/// Warnings never stand in for rows; an affected employee or pay-code is
/// simply absent from the output.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::{LedgerWarning, WarningCode};
///
/// let warning = LedgerWarning::for_pay_code(
///     WarningCode::ValueConversion,
///     "Value 'n/a' for pay-code 'P1' cannot be converted to an amount",
///     7,
///     "P1",
/// );
/// assert_eq!(warning.employee_id, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerWarning {
    /// The kind of condition.
    pub code: WarningCode,
    /// Human-readable description.
    pub message: String,
    /// The affected employee, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<i64>,
    /// The affected pay-code, when applicable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pay_code: Option<String>,
}

impl LedgerWarning {
    /// Creates a warning not tied to an employee.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            employee_id: None,
            pay_code: None,
        }
    }

    /// Creates a warning for one pay-code of one employee.
    pub fn for_pay_code(
        code: WarningCode,
        message: impl Into<String>,
        employee_id: i64,
        pay_code: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            employee_id: Some(employee_id),
            pay_code: Some(pay_code.into()),
        }
    }
}

/// Aggregated totals for a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Employees that contributed to the run (including those with no lines).
    pub employees_processed: usize,
    /// Employees skipped for missing identity.
    pub employees_skipped: usize,
    /// Number of detailed lines.
    pub detailed_lines: usize,
    /// Number of grouped lines.
    pub grouped_lines: usize,
    /// Sum of all detailed amounts; equals the sum of all grouped amounts.
    pub net_amount: Decimal,
}

/// The complete output of one engine run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerBatch {
    /// Unique identifier for this run.
    pub run_id: Uuid,
    /// When the run was performed.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that performed the run.
    pub engine_version: String,
    /// Process types the rule catalog was filtered by.
    pub process_types: Vec<String>,
    /// The detailed ledger table.
    pub detailed: Vec<DetailedLedgerLine>,
    /// The grouped ledger table.
    pub grouped: Vec<GroupedLedgerLine>,
    /// Run totals.
    pub totals: LedgerTotals,
    /// Absorbed conditions.
    pub warnings: Vec<LedgerWarning>,
}

impl LedgerBatch {
    /// Returns the warnings of a given kind.
    pub fn warnings_of(&self, code: WarningCode) -> impl Iterator<Item = &LedgerWarning> {
        self.warnings.iter().filter(move |w| w.code == code)
    }
}
