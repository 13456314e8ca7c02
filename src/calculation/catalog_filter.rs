//! Rule catalog filtering.
//!
//! The rule catalog covers every company and process type; a run only uses
//! the rule sets relevant to the companies in its employee table and to its
//! process type. Rules move together by pivot key: a rule is kept when any
//! rule sharing its key passes both filters.

use std::collections::HashSet;

use rust_decimal::Decimal;

use crate::models::{CatalogRule, CellValue, Table};

const KEY_SEPARATOR: &str = "\u{1f}";

/// Returns the distinct non-null values of the company column, in first-seen order.
///
/// # Example
///
/// ```
/// use payroll_ledger::calculation::company_list;
/// use payroll_ledger::models::{CellValue, Record, Table};
///
/// let table = Table::from_records(vec![
///     Record::new().with("company", CellValue::from(100)),
///     Record::new().with("company", CellValue::from(100)),
///     Record::new().with("company", CellValue::text("ALL")),
/// ]);
///
/// assert_eq!(company_list(&table, "company"), vec![CellValue::from(100), CellValue::text("ALL")]);
/// ```
pub fn company_list(table: &Table, company_column: &str) -> Vec<CellValue> {
    let mut companies: Vec<CellValue> = Vec::new();
    for row in table.rows() {
        let value = row.get(company_column);
        if !value.is_null() && !companies.contains(value) {
            companies.push(value.clone());
        }
    }
    companies
}

/// Builds the composite key rules are kept or dropped by.
pub fn pivot_key(rule: &CatalogRule) -> String {
    let company = rule
        .company
        .map(|c| c.normalize().to_string())
        .unwrap_or_default();

    [
        rule.accounting_type.as_str(),
        rule.pay_code.as_str(),
        company.as_str(),
        rule.process_type.as_deref().unwrap_or_default(),
        rule.ledger_file.as_deref().unwrap_or_default(),
        rule.client_code.as_deref().unwrap_or_default(),
    ]
    .join(KEY_SEPARATOR)
}

/// Restricts the rule catalog to the run's companies and process types.
///
/// A rule passes the company filter when its numeric company equals one of
/// `companies`, or when it has no company and `all_sentinel` is among
/// `companies`. It passes the process filter when its process type is one of
/// `process_types`. The result keeps, in catalog order, every rule whose
/// pivot key is shared by at least one rule passing both filters.
///
/// # Example
///
/// ```
/// use payroll_ledger::calculation::filter_catalog;
/// use payroll_ledger::models::{AccountingType, CatalogRule, CellValue};
/// use rust_decimal::Decimal;
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
///     company: Some(Decimal::from(100)),
///     process_type: Some("REGULAR".to_string()),
/// };
///
/// let kept = filter_catalog(&[rule], &[CellValue::from(100)], &["REGULAR".to_string()], "ALL");
/// assert_eq!(kept.len(), 1);
/// ```
pub fn filter_catalog(
    rules: &[CatalogRule],
    companies: &[CellValue],
    process_types: &[String],
    all_sentinel: &str,
) -> Vec<CatalogRule> {
    let numeric_companies: Vec<Decimal> = companies.iter().filter_map(CellValue::as_decimal).collect();
    let admits_missing = companies
        .iter()
        .any(|c| c.as_text().is_some_and(|t| t.trim() == all_sentinel));

    let company_passes = |rule: &CatalogRule| match rule.company {
        Some(company) => numeric_companies.contains(&company),
        None => admits_missing,
    };
    let process_passes = |rule: &CatalogRule| {
        rule.process_type
            .as_deref()
            .is_some_and(|p| process_types.iter().any(|t| t.trim() == p.trim()))
    };

    let passing: HashSet<String> = rules
        .iter()
        .filter(|r| company_passes(*r) && process_passes(*r))
        .map(pivot_key)
        .collect();

    rules
        .iter()
        .filter(|r| passing.contains(&pivot_key(r)))
        .cloned()
        .collect()
}
