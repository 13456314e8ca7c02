//! Ledger generation logic for the payroll ledger engine.
//!
//! This module contains all the steps that turn payroll records into ledger
//! entries: catalog filtering by company and process type, rule matching,
//! cost-center proration, signed amount calculation with third-party
//! fan-out, detailed line assembly, per-employee processing, and grouping
//! of detailed lines into the grouped ledger.

mod amount;
mod catalog_filter;
mod cost_center;
mod employee_process;
mod grouping;
mod levels;
mod period;
mod row_builder;
mod rule_matcher;

pub use amount::calculate_amounts;
pub use catalog_filter::{company_list, filter_catalog, pivot_key};
pub use cost_center::{CostCenterAllocations, allocate_cost_centers};
pub use employee_process::{EmployeeLedgerResult, LedgerContext, process_employee};
pub use grouping::{GroupingResult, group_ledger_lines};
pub use levels::resolve_levels;
pub use period::resolve_process_types;
pub use row_builder::build_detailed_line;
pub use rule_matcher::RuleIndex;
