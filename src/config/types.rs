//! Configuration types for ledger generation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files. Every business-specific
//! header name lives here as data; the calculation code only ever sees
//! these bindings.

use serde::Deserialize;

/// Column bindings for the employee table.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeColumns {
    /// Column holding the payroll period (and process type token).
    pub period: String,
    /// Column holding the legal entity stamped on every ledger line.
    pub entity: String,
    /// Column holding the company the rule catalog is filtered by.
    pub company: String,
    /// Column holding the pay group.
    pub pay_group: String,
    /// Column holding the work agreement.
    pub work_agreement: String,
    /// Column holding the employee name.
    pub employee_name: String,
    /// Column holding the integer employee id.
    pub employee_id: String,
    /// Base columns that are never treated as pay-codes.
    #[serde(default)]
    pub excluded: Vec<String>,
}

impl EmployeeColumns {
    /// Returns true if the column is an identity column or in the excluded set.
    pub fn is_base_column(&self, column: &str) -> bool {
        [
            &self.period,
            &self.entity,
            &self.company,
            &self.pay_group,
            &self.work_agreement,
            &self.employee_name,
            &self.employee_id,
        ]
        .iter()
        .any(|c| c.as_str() == column)
            || self.excluded.iter().any(|c| c == column)
    }
}

/// Column bindings for the primary rule catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleColumns {
    /// Key column matched against pay-codes.
    pub pay_code: String,
    /// Accounting-type tag column (`D-`, `C+`, `P+`, `N+`, ...).
    pub accounting_type: String,
    /// Debit account column.
    pub debit_account: String,
    /// Credit account column.
    pub credit_account: String,
    /// Client code column.
    pub client_code: String,
    /// Free-text column carried into the client description.
    pub field_text: String,
    /// Ledger-file tag column.
    pub ledger_file: String,
    /// Item-text column.
    pub item_text: String,
    /// Company column used by the catalog filter.
    pub company: String,
    /// Process-type column used by the catalog filter.
    pub process_type: String,
}

/// Column bindings for the cost-center catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct CostCenterColumns {
    /// Column holding the employee id the allocation belongs to.
    pub allocation_id: String,
    /// Column holding the cost center.
    pub cost_center: String,
    /// Column holding the allocation percentage (0-100 scale).
    pub percentage: String,
}

/// Column bindings for the third-party recipient catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipientColumns {
    /// Column holding the employee id.
    pub employee_id: String,
    /// Column holding the recipient type.
    pub recipient_type: String,
    /// Column holding the recipient description.
    pub description: String,
    /// Column holding the recipient credit account.
    pub credit_account: String,
}

/// Column bindings for the level-specification catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelColumns {
    /// Column holding the specification name.
    pub specification: String,
    /// Column holding the specification value.
    pub value: String,
    /// Specification names for levels 1 through 4, in order.
    pub names: [String; 4],
}

/// All column bindings, as read from `columns.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnBindings {
    /// Employee table bindings.
    pub employee: EmployeeColumns,
    /// Primary rule catalog bindings.
    pub rules: RuleColumns,
    /// Cost-center catalog bindings.
    pub cost_centers: CostCenterColumns,
    /// Recipient catalog bindings.
    pub recipients: RecipientColumns,
    /// Level-specification catalog bindings.
    pub levels: LevelColumns,
}

/// Fallback values for optional employee identity fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityDefaults {
    /// Used when the pay group is absent.
    pub pay_group: String,
    /// Used when the work agreement is absent.
    pub work_agreement: String,
    /// Used when the employee name is absent.
    pub employee_name: String,
}

impl Default for IdentityDefaults {
    fn default() -> Self {
        Self {
            pay_group: "Paygroup not found".to_string(),
            work_agreement: "Work agreement not found".to_string(),
            employee_name: String::new(),
        }
    }
}

/// Shape of raw payroll JSON records consumed by the intake step.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IntakeSettings {
    /// Key of the array holding pay components.
    pub components_key: String,
    /// Field of a component holding its pay-code.
    pub code_field: String,
    /// Field of a component holding its period value.
    pub value_field: String,
    /// Field of a component holding its year-to-date value.
    pub ytd_field: String,
    /// Prefix for year-to-date columns.
    pub ytd_prefix: String,
    /// Separator joining a nested object's key and sub-key.
    pub nested_separator: String,
}

impl Default for IntakeSettings {
    fn default() -> Self {
        Self {
            components_key: "paycomponents".to_string(),
            code_field: "code".to_string(),
            value_field: "value".to_string(),
            ytd_field: "ytdvalue".to_string(),
            ytd_prefix: "YTD_".to_string(),
            nested_separator: "__".to_string(),
        }
    }
}

/// Behaviour switches, as read from `engine.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Take the absolute value of `value * percentage` before applying the sign.
    pub absolute_amounts: bool,
    /// Sentinel company value that admits catalog rows without a company.
    pub all_sentinel: String,
    /// Whitespace token index of the period column holding the process type.
    pub process_type_token: usize,
    /// Fallbacks for optional identity fields.
    pub defaults: IdentityDefaults,
    /// Raw record flattening settings.
    pub intake: IntakeSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            absolute_amounts: true,
            all_sentinel: "ALL".to_string(),
            process_type_token: 1,
            defaults: IdentityDefaults::default(),
            intake: IntakeSettings::default(),
        }
    }
}

/// The complete engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Column bindings.
    columns: ColumnBindings,
    /// Behaviour switches.
    settings: EngineSettings,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(columns: ColumnBindings, settings: EngineSettings) -> Self {
        Self { columns, settings }
    }

    /// Returns the column bindings.
    pub fn columns(&self) -> &ColumnBindings {
        &self.columns
    }

    /// Returns the behaviour switches.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }
}
