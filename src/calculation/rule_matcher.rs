//! Catalog rule matching.
//!
//! A pay-code may match several catalog rules; [`RuleIndex`] groups the
//! filtered rule catalog by pay-code so each lookup is a single map access.

use std::collections::HashMap;

use crate::models::CatalogRule;

/// Rules grouped by trimmed pay-code, preserving catalog order within a key.
#[derive(Debug, Clone, Default)]
pub struct RuleIndex {
    by_pay_code: HashMap<String, Vec<CatalogRule>>,
}

impl RuleIndex {
    /// Builds the index from a rule catalog.
    pub fn new(rules: &[CatalogRule]) -> Self {
        let mut by_pay_code: HashMap<String, Vec<CatalogRule>> = HashMap::new();
        for rule in rules {
            by_pay_code
                .entry(rule.pay_code.trim().to_string())
                .or_default()
                .push(rule.clone());
        }
        Self { by_pay_code }
    }

    /// Returns every rule whose key equals the trimmed pay-code.
    ///
    /// An empty slice means the pay-code has no accounting treatment.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_ledger::calculation::RuleIndex;
    /// use payroll_ledger::models::{AccountingType, CatalogRule};
    ///
    /// let rule = CatalogRule {
    ///     pay_code: "P1".to_string(),
    ///     accounting_type: AccountingType::DMinus,
    ///     debit_account: Some("4000".to_string()),
    ///     credit_account: None,
    ///     client_code: None,
    ///     field_text: None,
    ///     ledger_file: None,
    ///     item_text: None,
    ///     company: None,
    ///     process_type: None,
    /// };
    /// let index = RuleIndex::new(&[rule]);
    ///
    /// assert_eq!(index.matching(" P1 ").len(), 1);
    /// assert!(index.matching("P2").is_empty());
    /// ```
    pub fn matching(&self, pay_code: &str) -> &[CatalogRule] {
        self.by_pay_code
            .get(pay_code.trim())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
