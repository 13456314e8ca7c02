//! Table rows and rectangular tables.
//!
//! The employee table and every catalog arrive as a [`Table`] of
//! [`Record`]s keyed by column name. Typed access goes through
//! [`Record::resolve`] and friends.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::value::{CellValue, FromCell};

static NULL_CELL: CellValue = CellValue::Null;

/// One row of an input table.
///
/// A column that is absent from the row reads as [`CellValue::Null`].
///
/// # Example
///
/// ```
/// use payroll_ledger::models::{CellValue, Record};
///
/// let record = Record::new()
///     .with("EE ID", CellValue::from(1042))
///     .with("Pay group", CellValue::text("PG01"));
///
/// assert_eq!(record.resolve::<i64>("EE ID"), Some(1042));
/// assert_eq!(record.resolve_or("Missing", "fallback".to_string()), "fallback");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    cells: BTreeMap<String, CellValue>,
}

impl Record {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Inserts or replaces a cell.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.insert(column.into(), value.into());
    }

    /// Returns the cell for a column, or null when the column is absent.
    pub fn get(&self, column: &str) -> &CellValue {
        self.cells.get(column).unwrap_or(&NULL_CELL)
    }

    /// Returns true if the row carries the column (even when null).
    pub fn contains(&self, column: &str) -> bool {
        self.cells.contains_key(column)
    }

    /// Iterates over `(column, cell)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates mutably over the cells.
    pub(crate) fn cells_mut(&mut self) -> impl Iterator<Item = &mut CellValue> {
        self.cells.values_mut()
    }

    /// Removes a column from the row.
    pub(crate) fn remove(&mut self, column: &str) {
        self.cells.remove(column);
    }

    /// Resolves a typed value from a column.
    pub fn resolve<T: FromCell>(&self, column: &str) -> Option<T> {
        T::from_cell(self.get(column))
    }

    /// Resolves a typed value, falling back to `default` when absent or
    /// not convertible.
    pub fn resolve_or<T: FromCell>(&self, column: &str, default: T) -> T {
        self.resolve(column).unwrap_or(default)
    }

    /// Resolves a required identity value.
    ///
    /// Returns [`EngineError::MissingIdentity`] naming `field` when the
    /// column is absent, null or not castable.
    pub fn require<T: FromCell>(&self, column: &str, field: &str) -> EngineResult<T> {
        let cell = self.get(column);
        T::from_cell(cell).ok_or_else(|| EngineError::MissingIdentity {
            field: field.to_string(),
            message: if cell.is_null() {
                format!("column '{}' is absent or null", column)
            } else {
                format!("value '{}' in column '{}' cannot be cast", cell, column)
            },
        })
    }
}

impl<K: Into<String>> FromIterator<(K, CellValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, CellValue)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// A rectangular table: a header plus rows.
///
/// The header is the union of the columns carried by the rows, in
/// first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Record>", into = "Vec<Record>")]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    /// Builds a table from its rows.
    pub fn from_records(rows: Vec<Record>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for (column, _) in row.iter() {
                if !columns.iter().any(|c| c == column) {
                    columns.push(column.to_string());
                }
            }
        }
        Self { columns, rows }
    }

    /// Returns the header.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Returns the rows.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true if the header carries the column.
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Ensures every bound column is present in the header.
    ///
    /// `table` names the table in the resulting [`EngineError::ColumnNotFound`].
    pub fn require_columns(&self, table: &str, columns: &[&str]) -> EngineResult<()> {
        match columns.iter().find(|c| !self.has_column(c)) {
            Some(missing) => Err(EngineError::ColumnNotFound {
                table: table.to_string(),
                column: missing.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Drops columns that are null in every row.
    pub(crate) fn drop_null_columns(&mut self) {
        let empty: Vec<String> = self
            .columns
            .iter()
            .filter(|c| self.rows.iter().all(|r| r.get(c).is_null()))
            .cloned()
            .collect();

        for column in &empty {
            for row in &mut self.rows {
                row.remove(column);
            }
        }
        self.columns.retain(|c| !empty.contains(c));
    }
}

impl From<Vec<Record>> for Table {
    fn from(rows: Vec<Record>) -> Self {
        Self::from_records(rows)
    }
}

impl From<Table> for Vec<Record> {
    fn from(table: Table) -> Self {
        table.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_absent_column_reads_null() {
        let record = Record::new().with("a", CellValue::text("x"));
        assert!(record.get("b").is_null());
        assert!(!record.contains("b"));
    }

    #[test]
    fn test_resolve_or_uses_default_on_null() {
        let record = Record::new().with("pay_group", CellValue::Null);
        assert_eq!(
            record.resolve_or("pay_group", "Paygroup not found".to_string()),
            "Paygroup not found"
        );
    }

    #[test]
    fn test_require_reports_absent_column() {
        let record = Record::new();
        match record.require::<String>("period", "period") {
            Err(EngineError::MissingIdentity { field, message }) => {
                assert_eq!(field, "period");
                assert!(message.contains("absent or null"));
            }
            _ => panic!("Expected MissingIdentity error"),
        }
    }

    #[test]
    fn test_require_reports_uncastable_value() {
        let record = Record::new().with("id", CellValue::text("E1"));
        match record.require::<i64>("id", "employee_id") {
            Err(EngineError::MissingIdentity { field, message }) => {
                assert_eq!(field, "employee_id");
                assert!(message.contains("'E1'"));
            }
            _ => panic!("Expected MissingIdentity error"),
        }
    }

    #[test]
    fn test_table_header_is_union_of_rows() {
        let table = Table::from_records(vec![
            Record::new().with("a", CellValue::from(1)),
            Record::new().with("b", CellValue::from(2)),
        ]);
        assert_eq!(table.columns(), &["a".to_string(), "b".to_string()]);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_require_columns_names_missing_column() {
        let table = Table::from_records(vec![Record::new().with("a", CellValue::from(1))]);
        assert!(table.require_columns("rules", &["a"]).is_ok());

        match table.require_columns("rules", &["a", "Petal Code"]) {
            Err(EngineError::ColumnNotFound { table, column }) => {
                assert_eq!(table, "rules");
                assert_eq!(column, "Petal Code");
            }
            _ => panic!("Expected ColumnNotFound error"),
        }
    }

    #[test]
    fn test_drop_null_columns() {
        let mut table = Table::from_records(vec![
            Record::new()
                .with("keep", CellValue::Number(dec("1")))
                .with("gone", CellValue::Null),
            Record::new().with("gone", CellValue::Null),
        ]);
        table.drop_null_columns();

        assert_eq!(table.columns(), &["keep".to_string()]);
        assert!(!table.rows()[0].contains("gone"));
    }

    #[test]
    fn test_table_deserializes_from_json_array() {
        let table: Table = serde_json::from_str(r#"[{"id": 1, "name": "Ana"}, {"id": 2}]"#).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.has_column("name"));
        assert!(table.rows()[1].get("name").is_null());
    }
}
