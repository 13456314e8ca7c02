//! Grouped ledger aggregation.
//!
//! Detailed lines are collapsed into one grouped line per
//! (period, entity, pay group, client id, client description, cost center,
//! account, item text, ledger file). Debit and credit accounts are merged
//! into a single account for keying and split back afterwards.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    AccountSide, CellValue, DetailedLedgerLine, GroupedLedgerLine, LedgerWarning, WarningCode,
};

/// Result of grouping the detailed ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingResult {
    /// Grouped lines, ordered by grouping key.
    pub lines: Vec<GroupedLedgerLine>,
    /// One warning per group that mixed debit and credit contributions.
    pub warnings: Vec<LedgerWarning>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct GroupKey {
    period: String,
    entity: String,
    pay_group: String,
    client_id: Option<String>,
    client_description: Option<String>,
    cost_center: Option<String>,
    account: Option<String>,
    item_text: Option<String>,
    ledger_file: Option<String>,
}

#[derive(Debug, Default)]
struct GroupTotals {
    level2: Decimal,
    level3: Decimal,
    level4: Decimal,
    amount: Decimal,
    side: Option<AccountSide>,
    conflicting: bool,
}

impl GroupTotals {
    /// Adds a member's amount and levels; names the overflowing field on failure.
    fn accumulate(&mut self, line: &DetailedLedgerLine) -> Result<(), &'static str> {
        self.level2 = self
            .level2
            .checked_add(level_amount(&line.level2))
            .ok_or("level 2")?;
        self.level3 = self
            .level3
            .checked_add(level_amount(&line.level3))
            .ok_or("level 3")?;
        self.level4 = self
            .level4
            .checked_add(level_amount(&line.level4))
            .ok_or("level 4")?;
        self.amount = self.amount.checked_add(line.amount).ok_or("amount")?;
        Ok(())
    }
}

/// Blank text counts as missing.
fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

fn level_amount(level: &CellValue) -> Decimal {
    level.as_decimal().unwrap_or(Decimal::ZERO)
}

/// Resolves a line's single account and the side it came from.
///
/// The debit account wins when both sides are populated.
fn resolve_account(line: &DetailedLedgerLine) -> (Option<String>, Option<AccountSide>) {
    match (present(&line.debit_account), present(&line.credit_account)) {
        (Some(debit), _) => (Some(debit), Some(AccountSide::Debit)),
        (None, Some(credit)) => (Some(credit), Some(AccountSide::Credit)),
        (None, None) => (None, None),
    }
}

/// Aggregates detailed lines into grouped lines.
///
/// Amount and levels 2 to 4 are summed per group (missing or non-numeric
/// levels count as zero). A group's side is the first side seen among its
/// members; a group whose members disagree keeps that first side and is
/// reported as [`WarningCode::InconsistentAccountType`].
///
/// # Errors
///
/// Returns [`EngineError::AmountOverflow`] when a group's sum leaves the
/// decimal range.
///
/// # Example
///
/// ```
/// use payroll_ledger::calculation::group_ledger_lines;
///
/// let result = group_ledger_lines(&[]).unwrap();
/// assert!(result.lines.is_empty());
/// assert!(result.warnings.is_empty());
/// ```
pub fn group_ledger_lines(lines: &[DetailedLedgerLine]) -> EngineResult<GroupingResult> {
    let mut groups: BTreeMap<GroupKey, GroupTotals> = BTreeMap::new();

    for line in lines {
        let (account, side) = resolve_account(line);
        let key = GroupKey {
            period: line.period.clone(),
            entity: line.entity.clone(),
            pay_group: line.pay_group.clone(),
            client_id: present(&line.client_id),
            client_description: present(&line.client_description),
            cost_center: present(&line.cost_center),
            account,
            item_text: present(&line.item_text),
            ledger_file: present(&line.ledger_file),
        };

        let account_label = key.account.clone().unwrap_or_default();
        let totals = groups.entry(key).or_default();
        totals
            .accumulate(line)
            .map_err(|field| EngineError::AmountOverflow {
                context: format!("grouped {} of account '{}'", field, account_label),
            })?;

        match (totals.side, side) {
            (None, Some(_)) => totals.side = side,
            (Some(first), Some(other)) if first != other => totals.conflicting = true,
            _ => {}
        }
    }

    let mut warnings = Vec::new();
    let grouped = groups
        .into_iter()
        .map(|(key, totals)| {
            if totals.conflicting {
                let account = key.account.clone().unwrap_or_default();
                warn!(
                    account = %account,
                    period = %key.period,
                    "Grouped bucket mixes debit and credit contributions; keeping first side"
                );
                warnings.push(LedgerWarning::new(
                    WarningCode::InconsistentAccountType,
                    format!(
                        "Account '{}' in period '{}' mixes debit and credit contributions; kept {}",
                        account,
                        key.period,
                        totals.side.map(|s| s.as_str()).unwrap_or_default()
                    ),
                ));
            }

            let (debit_account, credit_account) = match totals.side {
                Some(AccountSide::Debit) => (key.account, None),
                Some(AccountSide::Credit) => (None, key.account),
                None => (None, None),
            };

            GroupedLedgerLine {
                period: key.period,
                entity: key.entity,
                pay_group: key.pay_group,
                client_id: key.client_id,
                client_description: key.client_description,
                cost_center: key.cost_center,
                level2: totals.level2,
                level3: totals.level3,
                level4: totals.level4,
                amount: totals.amount,
                debit_account,
                credit_account,
                item_text: key.item_text,
                ledger_file: key.ledger_file,
                observations: String::new(),
            }
        })
        .collect();

    Ok(GroupingResult {
        lines: grouped,
        warnings,
    })
}
