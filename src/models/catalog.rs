//! Catalog models.
//!
//! Catalogs arrive as untyped tables; this module turns them into typed
//! rows using the column bindings from configuration.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::{ColumnBindings, CostCenterColumns, LevelColumns, RecipientColumns, RuleColumns};
use crate::error::EngineResult;

use super::record::{Record, Table};
use super::value::{CellValue, FromCell};

/// Accounting-type tag controlling sign and fan-out behaviour.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::AccountingType;
///
/// assert_eq!(AccountingType::parse(" D- "), AccountingType::DMinus);
/// assert!(AccountingType::parse("P+").redirects_to_recipients());
/// assert_eq!(AccountingType::parse("X").to_string(), "X");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountingType {
    /// `D-`: negated amount, rule's own accounts.
    DMinus,
    /// `C+`: negated amount, rule's own accounts.
    CPlus,
    /// `P+`: positive amount redirected to third-party recipients.
    PPlus,
    /// `N+`: positive amount redirected to third-party recipients.
    NPlus,
    /// Any other tag (including empty): positive amount, rule's own accounts.
    Other(String),
}

impl AccountingType {
    /// Parses a tag, trimming surrounding whitespace.
    pub fn parse(tag: &str) -> Self {
        match tag.trim() {
            "D-" => AccountingType::DMinus,
            "C+" => AccountingType::CPlus,
            "P+" => AccountingType::PPlus,
            "N+" => AccountingType::NPlus,
            other => AccountingType::Other(other.to_string()),
        }
    }

    /// Returns the tag as written in the catalog.
    pub fn as_str(&self) -> &str {
        match self {
            AccountingType::DMinus => "D-",
            AccountingType::CPlus => "C+",
            AccountingType::PPlus => "P+",
            AccountingType::NPlus => "N+",
            AccountingType::Other(tag) => tag,
        }
    }

    /// Returns true for tags whose amount is negated (`D-`, `C+`).
    pub fn is_negated(&self) -> bool {
        matches!(self, AccountingType::DMinus | AccountingType::CPlus)
    }

    /// Returns true for tags that fan out to recipients (`P+`, `N+`).
    pub fn redirects_to_recipients(&self) -> bool {
        matches!(self, AccountingType::PPlus | AccountingType::NPlus)
    }
}

impl fmt::Display for AccountingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for AccountingType {
    fn from(tag: String) -> Self {
        AccountingType::parse(&tag)
    }
}

impl From<AccountingType> for String {
    fn from(tag: AccountingType) -> Self {
        tag.as_str().to_string()
    }
}

impl FromCell for AccountingType {
    fn from_cell(cell: &CellValue) -> Option<Self> {
        cell.as_text().map(|tag| AccountingType::parse(&tag))
    }
}

/// Resolves an optional text cell, treating blank text as absent.
fn text(record: &Record, column: &str) -> Option<String> {
    record
        .resolve::<String>(column)
        .filter(|s| !s.trim().is_empty())
}

/// A row of the primary rule catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRule {
    /// Pay-code key, trimmed.
    pub pay_code: String,
    /// Accounting-type tag.
    pub accounting_type: AccountingType,
    /// Debit account, if any.
    pub debit_account: Option<String>,
    /// Credit account, if any.
    pub credit_account: Option<String>,
    /// Client code.
    pub client_code: Option<String>,
    /// Free-text field.
    pub field_text: Option<String>,
    /// Ledger-file tag.
    pub ledger_file: Option<String>,
    /// Item-text template.
    pub item_text: Option<String>,
    /// Company, coerced to a number (non-numeric companies read as absent).
    pub company: Option<Decimal>,
    /// Process type.
    pub process_type: Option<String>,
}

impl CatalogRule {
    /// Builds a rule from a catalog row. Rows without a pay-code are skipped.
    pub fn from_record(record: &Record, columns: &RuleColumns) -> Option<Self> {
        let pay_code = record
            .resolve::<String>(&columns.pay_code)
            .map(|code| code.trim().to_string())?;

        Some(Self {
            pay_code,
            accounting_type: record.resolve_or(
                &columns.accounting_type,
                AccountingType::Other(String::new()),
            ),
            debit_account: text(record, &columns.debit_account),
            credit_account: text(record, &columns.credit_account),
            client_code: text(record, &columns.client_code),
            field_text: text(record, &columns.field_text),
            ledger_file: text(record, &columns.ledger_file),
            item_text: text(record, &columns.item_text),
            company: record.resolve::<Decimal>(&columns.company),
            process_type: text(record, &columns.process_type),
        })
    }

    /// Returns true if the rule carries at least one account.
    pub fn has_account(&self) -> bool {
        self.debit_account.is_some() || self.credit_account.is_some()
    }
}

/// A row of the cost-center catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenterEntry {
    /// Employee id the allocation applies to.
    pub allocation_id: Option<i64>,
    /// Cost center.
    pub cost_center: Option<String>,
    /// Allocation percentage on the 0-100 scale.
    pub percentage: Option<Decimal>,
}

impl CostCenterEntry {
    /// Builds an entry from a catalog row.
    pub fn from_record(record: &Record, columns: &CostCenterColumns) -> Self {
        Self {
            allocation_id: record.resolve(&columns.allocation_id),
            cost_center: text(record, &columns.cost_center),
            percentage: record.resolve(&columns.percentage),
        }
    }
}

/// A row of the third-party recipient catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientEntry {
    /// Employee id the recipient belongs to.
    pub employee_id: Option<i64>,
    /// Recipient type.
    pub recipient_type: Option<String>,
    /// Recipient description.
    pub description: Option<String>,
    /// Recipient credit account.
    pub credit_account: Option<String>,
}

impl RecipientEntry {
    /// Builds an entry from a catalog row.
    pub fn from_record(record: &Record, columns: &RecipientColumns) -> Self {
        Self {
            employee_id: record.resolve(&columns.employee_id),
            recipient_type: text(record, &columns.recipient_type),
            description: text(record, &columns.description),
            credit_account: text(record, &columns.credit_account),
        }
    }
}

/// A row of the level-specification catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSpec {
    /// Specification name.
    pub specification: String,
    /// Specification value.
    pub value: CellValue,
}

impl LevelSpec {
    /// Builds a spec from a catalog row. Rows without a name are skipped.
    pub fn from_record(record: &Record, columns: &LevelColumns) -> Option<Self> {
        Some(Self {
            specification: record.resolve::<String>(&columns.specification)?.trim().to_string(),
            value: record.get(&columns.value).clone(),
        })
    }
}

/// Untyped catalog tables as handed over by the loader.
///
/// An empty table stands for an absent catalog; with no rules, no
/// pay-code has accounting treatment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogTables {
    /// Primary rule catalog.
    pub rules: Table,
    /// Cost-center catalog.
    #[serde(default)]
    pub cost_centers: Table,
    /// Recipient catalog.
    #[serde(default)]
    pub recipients: Table,
    /// Level-specification catalog.
    #[serde(default)]
    pub levels: Table,
}

/// Typed catalogs ready for ledger generation.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    /// Primary rule catalog.
    pub rules: Vec<CatalogRule>,
    /// Cost-center catalog.
    pub cost_centers: Vec<CostCenterEntry>,
    /// Recipient catalog.
    pub recipients: Vec<RecipientEntry>,
    /// Level-specification catalog.
    pub levels: Vec<LevelSpec>,
}

impl Catalogs {
    /// Converts untyped tables using the column bindings.
    ///
    /// Returns [`crate::error::EngineError::ColumnNotFound`] when a non-empty
    /// catalog lacks the columns it is keyed or matched on.
    pub fn from_tables(tables: &CatalogTables, columns: &ColumnBindings) -> EngineResult<Self> {
        let rule_cols = &columns.rules;
        if !tables.rules.is_empty() {
            tables.rules.require_columns(
                "rules",
                &[rule_cols.pay_code.as_str(), rule_cols.accounting_type.as_str()],
            )?;
        }

        let cc_cols = &columns.cost_centers;
        if !tables.cost_centers.is_empty() {
            tables.cost_centers.require_columns(
                "cost_centers",
                &[cc_cols.allocation_id.as_str(), cc_cols.percentage.as_str()],
            )?;
        }

        let recipient_cols = &columns.recipients;
        if !tables.recipients.is_empty() {
            tables
                .recipients
                .require_columns("recipients", &[recipient_cols.employee_id.as_str()])?;
        }

        let level_cols = &columns.levels;
        if !tables.levels.is_empty() {
            tables.levels.require_columns(
                "levels",
                &[level_cols.specification.as_str(), level_cols.value.as_str()],
            )?;
        }

        Ok(Self {
            rules: tables
                .rules
                .rows()
                .iter()
                .filter_map(|r| CatalogRule::from_record(r, rule_cols))
                .collect(),
            cost_centers: tables
                .cost_centers
                .rows()
                .iter()
                .map(|r| CostCenterEntry::from_record(r, cc_cols))
                .collect(),
            recipients: tables
                .recipients
                .rows()
                .iter()
                .map(|r| RecipientEntry::from_record(r, recipient_cols))
                .collect(),
            levels: tables
                .levels
                .rows()
                .iter()
                .filter_map(|r| LevelSpec::from_record(r, level_cols))
                .collect(),
        })
    }
}
