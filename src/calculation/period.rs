//! Period and process-type extraction.
//!
//! A payroll period cell reads like `"2025-01 REGULAR"`; the configured
//! whitespace token (the second by default) names the process type the rule
//! catalog is filtered by. A run covers exactly one process type.

use crate::error::{EngineError, EngineResult};
use crate::models::Table;

/// Returns the process type of the employee table.
///
/// Collects the distinct non-null values of token `token` of the period
/// column, in first-seen order. Rows whose period is null or too short
/// contribute nothing.
///
/// # Errors
///
/// Returns [`EngineError::AmbiguousPeriod`] when more than one distinct
/// value is found.
///
/// # Example
///
/// ```
/// use payroll_ledger::calculation::resolve_process_types;
/// use payroll_ledger::models::{CellValue, Record, Table};
///
/// let table = Table::from_records(vec![
///     Record::new().with("period", CellValue::text("2025-01 REGULAR")),
///     Record::new().with("period", CellValue::text("2025-01 REGULAR")),
/// ]);
///
/// assert_eq!(resolve_process_types(&table, "period", 1).unwrap(), vec!["REGULAR".to_string()]);
/// ```
pub fn resolve_process_types(
    table: &Table,
    period_column: &str,
    token: usize,
) -> EngineResult<Vec<String>> {
    let mut found: Vec<String> = Vec::new();

    for row in table.rows() {
        let Some(period) = row.resolve::<String>(period_column) else {
            continue;
        };
        let Some(value) = period.split_whitespace().nth(token) else {
            continue;
        };
        if !found.iter().any(|f| f == value) {
            found.push(value.to_string());
        }
    }

    if found.len() > 1 {
        return Err(EngineError::AmbiguousPeriod { periods: found });
    }

    Ok(found)
}
