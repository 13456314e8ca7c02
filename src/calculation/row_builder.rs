//! Detailed ledger line assembly.

use rust_decimal::Decimal;

use crate::models::{AmountLine, CostCenterAllocation, DetailedLedgerLine, EmployeeIdentity, LevelValues};

/// Builds one detailed ledger line.
///
/// Pure structural assembly: identity fields come from the employee, the
/// cost center and percentage from the allocation, accounts and texts from
/// the amount line, and levels from the run-wide level values. The
/// percentage is expressed on the 0-100 scale and observations start empty.
///
/// # Example
///
/// ```
/// use payroll_ledger::calculation::build_detailed_line;
/// use payroll_ledger::models::{AmountLine, CostCenterAllocation, EmployeeIdentity, LevelValues};
/// use rust_decimal::Decimal;
///
/// let identity = EmployeeIdentity {
///     period: "2025-01 REGULAR".to_string(),
///     entity: "100".to_string(),
///     pay_group: "PG1".to_string(),
///     work_agreement: "WA".to_string(),
///     employee_id: 7,
///     employee_name: "Ana Ruiz".to_string(),
/// };
/// let amount = AmountLine {
///     amount: Decimal::from(-1000),
///     debit_account: Some("4000".to_string()),
///     credit_account: None,
///     client_code: None,
///     field_text: None,
///     ledger_file: None,
///     item_text: None,
/// };
///
/// let line = build_detailed_line(&identity, &CostCenterAllocation::full(7), amount, &LevelValues::default());
/// assert_eq!(line.percentage, Decimal::ONE_HUNDRED);
/// assert!(line.observations.is_empty());
/// ```
pub fn build_detailed_line(
    identity: &EmployeeIdentity,
    allocation: &CostCenterAllocation,
    amount: AmountLine,
    levels: &LevelValues,
) -> DetailedLedgerLine {
    DetailedLedgerLine {
        period: identity.period.clone(),
        entity: identity.entity.clone(),
        pay_group: identity.pay_group.clone(),
        work_agreement: identity.work_agreement.clone(),
        employee_id: identity.employee_id,
        employee_name: identity.employee_name.clone(),
        client_id: amount.client_code,
        client_description: amount.field_text,
        cost_center: allocation.cost_center.clone(),
        percentage: (allocation.factor * Decimal::ONE_HUNDRED).normalize(),
        level1: levels.level1.clone(),
        level2: levels.level2.clone(),
        level3: levels.level3.clone(),
        level4: levels.level4.clone(),
        amount: amount.amount,
        debit_account: amount.debit_account,
        credit_account: amount.credit_account,
        item_text: amount.item_text,
        ledger_file: amount.ledger_file,
        observations: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn identity() -> EmployeeIdentity {
        EmployeeIdentity {
            period: "2025-01 REGULAR".to_string(),
            entity: "100".to_string(),
            pay_group: "PG1".to_string(),
            work_agreement: "WA".to_string(),
            employee_id: 7,
            employee_name: "Ana Ruiz".to_string(),
        }
    }

    #[test]
    fn test_line_carries_every_source() {
        let allocation = CostCenterAllocation {
            employee_id: 7,
            factor: dec("0.4"),
            cost_center: Some("CC-10".to_string()),
        };
        let amount = AmountLine {
            amount: dec("200"),
            debit_account: None,
            credit_account: Some("2100".to_string()),
            client_code: Some("CLI".to_string()),
            field_text: Some("Salary".to_string()),
            ledger_file: Some("GL1".to_string()),
            item_text: Some("Payroll".to_string()),
        };
        let levels = LevelValues {
            level1: CellValue::text("L1"),
            level2: CellValue::from(2),
            ..LevelValues::default()
        };

        let line = build_detailed_line(&identity(), &allocation, amount, &levels);

        assert_eq!(line.period, "2025-01 REGULAR");
        assert_eq!(line.employee_id, 7);
        assert_eq!(line.client_id.as_deref(), Some("CLI"));
        assert_eq!(line.client_description.as_deref(), Some("Salary"));
        assert_eq!(line.cost_center.as_deref(), Some("CC-10"));
        assert_eq!(line.percentage, dec("40"));
        assert_eq!(line.level1, CellValue::text("L1"));
        assert_eq!(line.level3, CellValue::Null);
        assert_eq!(line.amount, dec("200"));
        assert_eq!(line.credit_account.as_deref(), Some("2100"));
        assert_eq!(line.ledger_file.as_deref(), Some("GL1"));
        assert_eq!(line.item_text.as_deref(), Some("Payroll"));
        assert_eq!(line.observations, "");
    }
}
