//! Payroll record intake.
//!
//! Raw payroll records arrive as JSON objects that carry their pay-codes in a
//! nested components array. This module flattens them into the rectangular
//! employee [`Table`] the engine runs on.

use serde_json::{Map, Value};

use crate::config::IntakeSettings;
use crate::error::{EngineError, EngineResult};
use crate::models::{CellValue, Record, Table, parse_decimal};

/// Flattens raw payroll records into an employee table.
///
/// For each record:
/// - the components array (`paycomponents` by default) becomes one column per
///   component code holding its value, plus a `YTD_{code}` column holding its
///   year-to-date value; components without a code are ignored;
/// - a nested object becomes one `{key}__{subkey}` column per entry;
/// - any other value is copied as is.
///
/// Cells are then normalized: text is trimmed, and numeric zero, empty text
/// and `"NaN"` become null. Columns null in every row are dropped.
///
/// # Errors
///
/// Returns [`EngineError::InvalidRecord`] when a record is not a JSON object
/// or holds a number that cannot be represented as a decimal.
///
/// # Example
///
/// ```
/// use payroll_ledger::config::IntakeSettings;
/// use payroll_ledger::intake::flatten_records;
/// use payroll_ledger::models::CellValue;
/// use serde_json::json;
///
/// let raw = vec![json!({
///     "employee": 7,
///     "paycomponents": [{ "code": "P1", "value": 1000, "ytdvalue": 12000 }]
/// })];
///
/// let table = flatten_records(&raw, &IntakeSettings::default()).unwrap();
/// assert_eq!(table.rows()[0].get("P1"), &CellValue::from(1000));
/// assert_eq!(table.rows()[0].get("YTD_P1"), &CellValue::from(12000));
/// ```
pub fn flatten_records(records: &[Value], settings: &IntakeSettings) -> EngineResult<Table> {
    let rows = records
        .iter()
        .enumerate()
        .map(|(index, record)| match record {
            Value::Object(fields) => flatten_record(fields, settings),
            other => Err(EngineError::InvalidRecord {
                message: format!("record {} is not an object: {}", index, other),
            }),
        })
        .collect::<EngineResult<Vec<Record>>>()?;

    let mut table = Table::from_records(rows);
    table.drop_null_columns();
    Ok(table)
}

fn flatten_record(fields: &Map<String, Value>, settings: &IntakeSettings) -> EngineResult<Record> {
    let mut record = Record::new();

    for (key, value) in fields {
        match value {
            Value::Array(components) if *key == settings.components_key => {
                for component in components {
                    let Some(code) = component.get(&settings.code_field).and_then(code_text) else {
                        continue;
                    };
                    let current = component.get(&settings.value_field).unwrap_or(&Value::Null);
                    let ytd = component.get(&settings.ytd_field).unwrap_or(&Value::Null);

                    record.insert(format!("{}{}", settings.ytd_prefix, code), to_cell(ytd)?);
                    record.insert(code, to_cell(current)?);
                }
            }
            Value::Object(nested) => {
                for (subkey, subvalue) in nested {
                    record.insert(
                        format!("{}{}{}", key, settings.nested_separator, subkey),
                        to_cell(subvalue)?,
                    );
                }
            }
            other => record.insert(key.as_str(), to_cell(other)?),
        }
    }

    for cell in record.cells_mut() {
        normalize(cell);
    }
    Ok(record)
}

/// A component code may be written as text or as a number.
fn code_text(code: &Value) -> Option<String> {
    match code {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn to_cell(value: &Value) -> EngineResult<CellValue> {
    Ok(match value {
        Value::Null => CellValue::Null,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => {
            let decimal = parse_decimal(&n.to_string()).ok_or_else(|| EngineError::InvalidRecord {
                message: format!("number {} cannot be represented as a decimal", n),
            })?;
            CellValue::Number(decimal)
        }
        Value::String(s) => CellValue::Text(s.clone()),
        Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
    })
}

fn normalize(cell: &mut CellValue) {
    let blank = match cell {
        CellValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.len() != text.len() {
                *text = trimmed.to_string();
            }
            text.is_empty() || text.as_str() == "NaN"
        }
        CellValue::Number(n) => n.is_zero(),
        CellValue::Null | CellValue::Bool(_) => false,
    };
    if blank {
        *cell = CellValue::Null;
    }
}
