//! Configuration loading and management for the payroll ledger engine.
//!
//! This module loads column bindings and behaviour switches from YAML
//! files. Column names for the employee table and every catalog are
//! configuration, never literals inside the calculation code.
//!
//! # Example
//!
//! ```no_run
//! use payroll_ledger::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Employee id column: {}", config.config().columns().employee.employee_id);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    ColumnBindings, CostCenterColumns, EmployeeColumns, EngineConfig, EngineSettings,
    IdentityDefaults, IntakeSettings, LevelColumns, RecipientColumns, RuleColumns,
};
