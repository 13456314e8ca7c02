//! Core data models for the payroll ledger engine.
//!
//! This module contains the input table types, typed catalogs, and the
//! detailed and grouped ledger output rows.

mod batch;
mod catalog;
mod employee;
mod ledger_line;
mod record;
mod value;

pub use batch::{LedgerBatch, LedgerTotals, LedgerWarning, WarningCode};
pub use catalog::{
    AccountingType, CatalogRule, CatalogTables, Catalogs, CostCenterEntry, LevelSpec,
    RecipientEntry,
};
pub use employee::{EmployeeIdentity, EmployeeRecord};
pub use ledger_line::{
    AccountSide, AmountLine, CostCenterAllocation, DetailedLedgerLine, GroupedLedgerLine,
    LevelValues,
};
pub use record::{Record, Table};
pub use value::{CellValue, FromCell};

pub(crate) use value::parse_decimal;
