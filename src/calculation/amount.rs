//! Amount calculation.
//!
//! This module applies the catalog rules matched by a pay-code to that
//! pay-code's value and one cost-center factor, producing signed
//! [`AmountLine`] candidates. Third-party (`P+` / `N+`) rules fan out to
//! one line per recipient of the employee.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AmountLine, CatalogRule, CellValue, RecipientEntry};

use super::rule_matcher::RuleIndex;

/// Computes the amount lines for one pay-code value under one allocation.
///
/// Steps:
/// 1. Select the rules keyed by the trimmed pay-code; no match yields an
///    empty result.
/// 2. Skip rules carrying neither a debit nor a credit account.
/// 3. `base = value * factor`, made absolute when `absolute` is set.
/// 4. Sign by accounting type: `D-` / `C+` emit `-base` on the rule's own
///    accounts; `P+` / `N+` emit `+base` once per recipient of the employee,
///    on the recipient's credit account, and never the rule's own line; any
///    other tag emits `+base` on the rule's own accounts.
///
/// # Errors
///
/// Returns [`EngineError::ValueConversion`] when at least one rule matches
/// and `value` cannot be read as a number, or when `value * factor` falls
/// outside the decimal range. Callers absorb this per pay-code.
///
/// # Example
///
/// ```
/// use payroll_ledger::calculation::{calculate_amounts, RuleIndex};
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
///     ledger_file: Some("GL1".to_string()),
///     item_text: None,
///     company: None,
///     process_type: None,
/// };
/// let index = RuleIndex::new(&[rule]);
///
/// let lines = calculate_amounts(&CellValue::from(1000), Decimal::ONE, "P1", &index, 1, &[], true).unwrap();
/// assert_eq!(lines[0].amount, Decimal::from(-1000));
/// ```
pub fn calculate_amounts(
    value: &CellValue,
    factor: Decimal,
    pay_code: &str,
    rules: &RuleIndex,
    employee_id: i64,
    recipients: &[RecipientEntry],
    absolute: bool,
) -> EngineResult<Vec<AmountLine>> {
    let matched = rules.matching(pay_code);
    if matched.is_empty() {
        return Ok(Vec::new());
    }

    let product = value
        .as_decimal()
        .and_then(|numeric| numeric.checked_mul(factor))
        .ok_or_else(|| EngineError::ValueConversion {
            pay_code: pay_code.trim().to_string(),
            value: value.to_string(),
        })?;
    let base_amount = if absolute { product.abs() } else { product };

    let mut lines = Vec::new();
    for rule in matched.iter().filter(|r| r.has_account()) {
        if rule.accounting_type.redirects_to_recipients() {
            lines.extend(recipient_lines(rule, base_amount, employee_id, recipients));
            continue;
        }

        let amount = if rule.accounting_type.is_negated() {
            -base_amount
        } else {
            base_amount
        };
        lines.push(own_line(rule, amount));
    }

    Ok(lines)
}

/// A line on the rule's own accounts.
fn own_line(rule: &CatalogRule, amount: Decimal) -> AmountLine {
    AmountLine {
        amount,
        debit_account: rule.debit_account.clone(),
        credit_account: rule.credit_account.clone(),
        client_code: rule.client_code.clone(),
        field_text: rule.field_text.clone(),
        ledger_file: rule.ledger_file.clone(),
        item_text: rule.item_text.clone(),
    }
}

/// One credit-side line per recipient of the employee.
fn recipient_lines<'a>(
    rule: &'a CatalogRule,
    amount: Decimal,
    employee_id: i64,
    recipients: &'a [RecipientEntry],
) -> impl Iterator<Item = AmountLine> + 'a {
    recipients
        .iter()
        .filter(move |r| r.employee_id == Some(employee_id))
        .map(move |recipient| AmountLine {
            amount,
            debit_account: None,
            credit_account: recipient.credit_account.clone(),
            client_code: Some(format!(
                "{} {}",
                employee_id,
                recipient.recipient_type.as_deref().unwrap_or_default()
            )),
            field_text: recipient.description.clone(),
            ledger_file: rule.ledger_file.clone(),
            item_text: rule.item_text.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AccountingType;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rule(tag: &str, debit: Option<&str>, credit: Option<&str>) -> CatalogRule {
        CatalogRule {
            pay_code: "P1".to_string(),
            accounting_type: AccountingType::parse(tag),
            debit_account: debit.map(str::to_string),
            credit_account: credit.map(str::to_string),
            client_code: Some("CLI".to_string()),
            field_text: Some("Salary".to_string()),
            ledger_file: Some("GL1".to_string()),
            item_text: Some("Payroll".to_string()),
            company: None,
            process_type: None,
        }
    }

    fn recipient(employee_id: i64, kind: &str, account: &str) -> RecipientEntry {
        RecipientEntry {
            employee_id: Some(employee_id),
            recipient_type: Some(kind.to_string()),
            description: Some(format!("{} beneficiary", kind)),
            credit_account: Some(account.to_string()),
        }
    }

    fn amounts(value: &str, factor: &str, rules: &[CatalogRule], recipients: &[RecipientEntry], absolute: bool) -> Vec<AmountLine> {
        let index = RuleIndex::new(rules);
        calculate_amounts(
            &CellValue::Number(dec(value)),
            dec(factor),
            "P1",
            &index,
            7,
            recipients,
            absolute,
        )
        .unwrap()
    }

    #[test]
    fn test_d_minus_negates_and_keeps_rule_fields() {
        let lines = amounts("1000", "1", &[rule("D-", Some("4000"), None)], &[], true);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].amount, dec("-1000"));
        assert_eq!(lines[0].debit_account.as_deref(), Some("4000"));
        assert_eq!(lines[0].client_code.as_deref(), Some("CLI"));
        assert_eq!(lines[0].field_text.as_deref(), Some("Salary"));
        assert_eq!(lines[0].ledger_file.as_deref(), Some("GL1"));
        assert_eq!(lines[0].item_text.as_deref(), Some("Payroll"));
    }

    #[test]
    fn test_c_plus_negates() {
        let lines = amounts("250", "0.4", &[rule("C+", None, Some("2100"))], &[], true);
        assert_eq!(lines[0].amount, dec("-100"));
        assert_eq!(lines[0].credit_account.as_deref(), Some("2100"));
    }

    #[test]
    fn test_other_tag_is_positive() {
        let lines = amounts("500", "0.6", &[rule("X", Some("6000"), None)], &[], true);
        assert_eq!(lines[0].amount, dec("300"));
    }

    #[test]
    fn test_p_plus_fans_out_to_recipients_only() {
        let recipients = vec![
            recipient(7, "ALIMONY", "8800"),
            recipient(7, "UNION", "8900"),
            recipient(9, "ALIMONY", "9999"),
        ];
        let lines = amounts("300", "1", &[rule("P+", Some("4000"), Some("2000"))], &recipients, true);

        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert_eq!(line.amount, dec("300"));
            assert_eq!(line.debit_account, None);
            assert_eq!(line.ledger_file.as_deref(), Some("GL1"));
            assert_eq!(line.item_text.as_deref(), Some("Payroll"));
        }
        assert_eq!(lines[0].credit_account.as_deref(), Some("8800"));
        assert_eq!(lines[0].client_code.as_deref(), Some("7 ALIMONY"));
        assert_eq!(lines[0].field_text.as_deref(), Some("ALIMONY beneficiary"));
        assert_eq!(lines[1].credit_account.as_deref(), Some("8900"));
    }

    #[test]
    fn test_n_plus_without_recipients_emits_nothing() {
        let lines = amounts("300", "1", &[rule("N+", Some("4000"), None)], &[], true);
        assert!(lines.is_empty());
    }

    #[test]
    fn test_rule_without_accounts_is_skipped() {
        let lines = amounts("300", "1", &[rule("D-", None, None), rule("X", Some("1"), None)], &[], true);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].amount, dec("300"));
    }

    #[test]
    fn test_absolute_amounts_flips_negative_values() {
        let lines = amounts("-200", "1", &[rule("D-", Some("4000"), None), rule("X", Some("5000"), None)], &[], true);
        assert_eq!(lines[0].amount, dec("-200"));
        assert_eq!(lines[1].amount, dec("200"));
    }

    #[test]
    fn test_signed_amounts_keep_negative_values() {
        let lines = amounts("-200", "1", &[rule("D-", Some("4000"), None), rule("X", Some("5000"), None)], &[], false);
        assert_eq!(lines[0].amount, dec("200"));
        assert_eq!(lines[1].amount, dec("-200"));
    }

    #[test]
    fn test_non_numeric_value_is_value_conversion() {
        let index = RuleIndex::new(&[rule("D-", Some("4000"), None)]);
        let result = calculate_amounts(&CellValue::text("n/a"), Decimal::ONE, "P1", &index, 7, &[], true);

        match result {
            Err(EngineError::ValueConversion { pay_code, value }) => {
                assert_eq!(pay_code, "P1");
                assert_eq!(value, "n/a");
            }
            other => panic!("Expected ValueConversion error, got {:?}", other),
        }
    }

    #[test]
    fn test_overflowing_product_is_value_conversion() {
        let index = RuleIndex::new(&[rule("D-", Some("4000"), None)]);
        let result = calculate_amounts(&CellValue::Number(Decimal::MAX), dec("1.5"), "P1", &index, 7, &[], true);

        assert!(matches!(result, Err(EngineError::ValueConversion { .. })));
    }

    #[test]
    fn test_non_numeric_value_without_match_is_empty() {
        let index = RuleIndex::new(&[rule("D-", Some("4000"), None)]);
        let result = calculate_amounts(&CellValue::text("n/a"), Decimal::ONE, "OTHER", &index, 7, &[], true);
        assert!(result.unwrap().is_empty());
    }

    #[test]
    fn test_numeric_text_value_is_accepted() {
        let index = RuleIndex::new(&[rule("X", Some("4000"), None)]);
        let lines = calculate_amounts(&CellValue::text("12.50"), Decimal::ONE, "P1", &index, 7, &[], true).unwrap();
        assert_eq!(lines[0].amount, dec("12.5"));
    }
}
