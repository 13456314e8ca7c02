//! Employee record model.
//!
//! An [`EmployeeRecord`] is the typed view of one employee-table row: a
//! fixed identity header plus the open set of pay-code values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{EmployeeColumns, IdentityDefaults};
use crate::error::EngineResult;

use super::record::Record;
use super::value::CellValue;

/// Identity fields stamped on every ledger line of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeIdentity {
    /// Payroll period.
    pub period: String,
    /// Legal entity.
    pub entity: String,
    /// Pay group.
    pub pay_group: String,
    /// Work agreement.
    pub work_agreement: String,
    /// Integer employee id.
    pub employee_id: i64,
    /// Employee name.
    pub employee_name: String,
}

/// One employee's payroll row, typed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Identity header.
    pub identity: EmployeeIdentity,
    /// Non-null pay-code values keyed by pay-code, base columns excluded.
    pub pay_codes: BTreeMap<String, CellValue>,
}

impl EmployeeRecord {
    /// Builds the typed record from an employee-table row.
    ///
    /// Period, entity and employee id are required; pay group, work
    /// agreement and name fall back to `defaults`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::EngineError::MissingIdentity`] when a required
    /// field is absent or the employee id is not an integer.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_ledger::config::{EmployeeColumns, IdentityDefaults};
    /// use payroll_ledger::models::{CellValue, EmployeeRecord, Record};
    ///
    /// let columns = EmployeeColumns {
    ///     period: "period".to_string(),
    ///     entity: "entity".to_string(),
    ///     company: "company".to_string(),
    ///     pay_group: "pay_group".to_string(),
    ///     work_agreement: "agreement".to_string(),
    ///     employee_name: "name".to_string(),
    ///     employee_id: "id".to_string(),
    ///     excluded: vec![],
    /// };
    /// let row = Record::new()
    ///     .with("period", CellValue::text("2025-01 REGULAR"))
    ///     .with("entity", CellValue::text("MX01"))
    ///     .with("id", CellValue::from(7))
    ///     .with("P1", CellValue::from(1000));
    ///
    /// let employee = EmployeeRecord::from_record(&row, &columns, &IdentityDefaults::default()).unwrap();
    /// assert_eq!(employee.identity.employee_id, 7);
    /// assert_eq!(employee.identity.pay_group, "Paygroup not found");
    /// assert!(employee.pay_codes.contains_key("P1"));
    /// ```
    pub fn from_record(
        record: &Record,
        columns: &EmployeeColumns,
        defaults: &IdentityDefaults,
    ) -> EngineResult<Self> {
        let identity = EmployeeIdentity {
            period: record.require(&columns.period, "period")?,
            entity: record.require(&columns.entity, "entity")?,
            pay_group: record.resolve_or(&columns.pay_group, defaults.pay_group.clone()),
            work_agreement: record
                .resolve_or(&columns.work_agreement, defaults.work_agreement.clone()),
            employee_id: record.require(&columns.employee_id, "employee_id")?,
            employee_name: record
                .resolve_or(&columns.employee_name, defaults.employee_name.clone()),
        };

        let pay_codes = record
            .iter()
            .filter(|(column, value)| !columns.is_base_column(column) && !value.is_null())
            .map(|(column, value)| (column.to_string(), value.clone()))
            .collect();

        Ok(Self {
            identity,
            pay_codes,
        })
    }
}
