//! Ledger line models.
//!
//! This module contains the intermediate values produced while generating
//! ledger entries ([`CostCenterAllocation`], [`AmountLine`]) and the two
//! output row types: [`DetailedLedgerLine`] and [`GroupedLedgerLine`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::value::CellValue;

/// One proration pass for an employee.
///
/// # Example
///
/// ```
/// use payroll_ledger::models::CostCenterAllocation;
/// use rust_decimal::Decimal;
///
/// let full = CostCenterAllocation::full(7);
/// assert_eq!(full.factor, Decimal::ONE);
/// assert!(full.cost_center.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenterAllocation {
    /// The employee the allocation belongs to.
    pub employee_id: i64,
    /// Share of the value, as a fraction of 1.
    pub factor: Decimal,
    /// Cost center, absent for the default allocation.
    pub cost_center: Option<String>,
}

impl CostCenterAllocation {
    /// The default single 100% allocation without a cost center.
    pub fn full(employee_id: i64) -> Self {
        Self {
            employee_id,
            factor: Decimal::ONE,
            cost_center: None,
        }
    }
}

/// A signed amount candidate produced by applying one catalog rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountLine {
    /// Signed amount.
    pub amount: Decimal,
    /// Debit account.
    pub debit_account: Option<String>,
    /// Credit account.
    pub credit_account: Option<String>,
    /// Client code (or synthesized recipient client id).
    pub client_code: Option<String>,
    /// Free-text field (or recipient description).
    pub field_text: Option<String>,
    /// Ledger-file tag.
    pub ledger_file: Option<String>,
    /// Item text.
    pub item_text: Option<String>,
}

/// The four classification levels resolved from the level-spec catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelValues {
    /// Level 1.
    pub level1: CellValue,
    /// Level 2.
    pub level2: CellValue,
    /// Level 3.
    pub level3: CellValue,
    /// Level 4.
    pub level4: CellValue,
}

/// One row of the detailed ledger table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedLedgerLine {
    /// Payroll period.
    pub period: String,
    /// Legal entity.
    pub entity: String,
    /// Pay group.
    pub pay_group: String,
    /// Work agreement.
    pub work_agreement: String,
    /// Employee id.
    pub employee_id: i64,
    /// Employee name.
    pub employee_name: String,
    /// Client id.
    pub client_id: Option<String>,
    /// Client description.
    pub client_description: Option<String>,
    /// Cost center.
    pub cost_center: Option<String>,
    /// Allocation percentage on the 0-100 scale.
    pub percentage: Decimal,
    /// Level 1.
    pub level1: CellValue,
    /// Level 2.
    pub level2: CellValue,
    /// Level 3.
    pub level3: CellValue,
    /// Level 4.
    pub level4: CellValue,
    /// Signed amount, never zero.
    pub amount: Decimal,
    /// Debit account.
    pub debit_account: Option<String>,
    /// Credit account.
    pub credit_account: Option<String>,
    /// Item text.
    pub item_text: Option<String>,
    /// Ledger-file tag.
    pub ledger_file: Option<String>,
    /// Observations, always initialized empty.
    pub observations: String,
}

/// Which side of the ledger a resolved account sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccountSide {
    /// Debit side.
    #[serde(rename = "D+")]
    Debit,
    /// Credit side.
    #[serde(rename = "C+")]
    Credit,
}

impl AccountSide {
    /// Returns the tag used in the grouped table.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountSide::Debit => "D+",
            AccountSide::Credit => "C+",
        }
    }
}

/// One row of the grouped ledger table.
///
/// Exactly one of `debit_account` / `credit_account` is set whenever the
/// contributing lines carried an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupedLedgerLine {
    /// Payroll period.
    pub period: String,
    /// Legal entity.
    pub entity: String,
    /// Pay group.
    pub pay_group: String,
    /// Client id.
    pub client_id: Option<String>,
    /// Client description.
    pub client_description: Option<String>,
    /// Cost center.
    pub cost_center: Option<String>,
    /// Summed level 2.
    pub level2: Decimal,
    /// Summed level 3.
    pub level3: Decimal,
    /// Summed level 4.
    pub level4: Decimal,
    /// Summed amount.
    pub amount: Decimal,
    /// Debit account, when the group resolved to the debit side.
    pub debit_account: Option<String>,
    /// Credit account, when the group resolved to the credit side.
    pub credit_account: Option<String>,
    /// Item text.
    pub item_text: Option<String>,
    /// Ledger-file tag.
    pub ledger_file: Option<String>,
    /// Observations, always initialized empty.
    pub observations: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_side_serialization() {
        assert_eq!(serde_json::to_string(&AccountSide::Debit).unwrap(), "\"D+\"");
        assert_eq!(serde_json::to_string(&AccountSide::Credit).unwrap(), "\"C+\"");
        assert_eq!(AccountSide::Credit.as_str(), "C+");
    }

    #[test]
    fn test_full_allocation_is_one_without_cost_center() {
        let allocation = CostCenterAllocation::full(11);
        assert_eq!(allocation.employee_id, 11);
        assert_eq!(allocation.factor, Decimal::ONE);
        assert_eq!(allocation.cost_center, None);
    }
}
