//! Cell values and typed value resolution.
//!
//! Input tables are rectangular but loosely typed: a cell may hold text, a
//! number, a boolean or nothing at all. [`CellValue`] captures that, and the
//! [`FromCell`] trait converts a cell into the typed value a caller needs.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/// A single cell of an input table.
///
/// Deserializes untagged from JSON: `null`, booleans, strings and numbers map
/// to the matching variant. Strings are never reinterpreted as numbers at
/// deserialization time; conversion happens on resolution.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::CellValue;
///
/// let cell: CellValue = serde_json::from_str("1250.50").unwrap();
/// assert!(matches!(cell, CellValue::Number(_)));
///
/// let cell: CellValue = serde_json::from_str("null").unwrap();
/// assert!(cell.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Absent or null cell.
    #[default]
    Null,
    /// Boolean cell.
    Bool(bool),
    /// Text cell.
    Text(String),
    /// Numeric cell.
    Number(Decimal),
}

impl CellValue {
    /// Creates a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    /// Creates a numeric cell.
    pub fn number(value: impl Into<Decimal>) -> Self {
        CellValue::Number(value.into())
    }

    /// Returns true if the cell holds no value.
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Renders the cell as text. Numbers are normalized, so `100.00`
    /// renders as `"100"`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Null => None,
            CellValue::Bool(b) => Some(b.to_string()),
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(d) => Some(d.normalize().to_string()),
        }
    }

    /// Coerces the cell to a decimal, parsing text when necessary.
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            CellValue::Number(d) => Some(*d),
            CellValue::Text(s) => parse_decimal(s),
            CellValue::Null | CellValue::Bool(_) => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_text() {
            Some(text) => write!(f, "{}", text),
            None => Ok(()),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<Decimal> for CellValue {
    fn from(value: Decimal) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(Decimal::from(value))
    }
}

impl From<i32> for CellValue {
    fn from(value: i32) -> Self {
        CellValue::Number(Decimal::from(value))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(CellValue::Null)
    }
}

/// Parses text as a decimal, accepting plain and scientific notation.
pub(crate) fn parse_decimal(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .ok()
}

/// Conversion from a [`CellValue`] into a typed value.
///
/// Returns `None` when the cell is null or cannot be represented as `Self`.
pub trait FromCell: Sized {
    /// Converts the cell, or returns `None`.
    fn from_cell(cell: &CellValue) -> Option<Self>;
}

impl FromCell for String {
    fn from_cell(cell: &CellValue) -> Option<Self> {
        cell.as_text()
    }
}

impl FromCell for Decimal {
    fn from_cell(cell: &CellValue) -> Option<Self> {
        cell.as_decimal()
    }
}

impl FromCell for i64 {
    fn from_cell(cell: &CellValue) -> Option<Self> {
        match cell {
            CellValue::Number(d) => d.trunc().to_i64(),
            CellValue::Text(s) => s.trim().parse().ok(),
            CellValue::Null | CellValue::Bool(_) => None,
        }
    }
}

impl FromCell for CellValue {
    fn from_cell(cell: &CellValue) -> Option<Self> {
        if cell.is_null() {
            None
        } else {
            Some(cell.clone())
        }
    }
}
