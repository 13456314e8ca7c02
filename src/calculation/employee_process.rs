//! Per-employee ledger generation.
//!
//! This module turns one employee-table row into that employee's detailed
//! ledger lines. Employee-level and pay-code-level failures are absorbed
//! here and reported as warnings; they never abort the run.

use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::models::{
    CostCenterEntry, DetailedLedgerLine, EmployeeRecord, LedgerWarning, LevelValues,
    RecipientEntry, Record, WarningCode,
};

use super::amount::calculate_amounts;
use super::cost_center::allocate_cost_centers;
use super::row_builder::build_detailed_line;
use super::rule_matcher::RuleIndex;

/// Read-only catalogs and settings shared by every employee of a run.
#[derive(Debug, Clone, Copy)]
pub struct LedgerContext<'a> {
    /// Filtered rule catalog, indexed by pay-code.
    pub rules: &'a RuleIndex,
    /// Cost-center catalog.
    pub cost_centers: &'a [CostCenterEntry],
    /// Recipient catalog.
    pub recipients: &'a [RecipientEntry],
    /// Run-wide classification levels.
    pub levels: &'a LevelValues,
    /// Engine configuration.
    pub config: &'a EngineConfig,
}

/// One employee's contribution to the detailed ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeLedgerResult {
    /// Detailed lines, none with a zero amount.
    pub lines: Vec<DetailedLedgerLine>,
    /// Absorbed conditions for this employee.
    pub warnings: Vec<LedgerWarning>,
    /// True when the employee was skipped for missing identity.
    pub skipped: bool,
}

/// Generates the detailed ledger lines of one employee.
///
/// Identity fields are resolved first; an unusable period, entity or
/// employee id skips the whole employee. Each non-null pay-code is then run
/// through every effective cost-center allocation. On the default
/// (non-prorated) path an (employee, pay-code, percentage) combination is
/// processed at most once; prorated allocations are never de-duplicated.
/// A non-numeric pay-code value skips that pay-code only. Lines whose
/// amount is exactly zero are dropped.
pub fn process_employee(record: &Record, ctx: &LedgerContext<'_>) -> EmployeeLedgerResult {
    let columns = &ctx.config.columns().employee;
    let settings = ctx.config.settings();

    let employee = match EmployeeRecord::from_record(record, columns, &settings.defaults) {
        Ok(employee) => employee,
        Err(err) => {
            let employee_id = record.resolve::<i64>(&columns.employee_id);
            warn!(employee_id = ?employee_id, error = %err, "Skipping employee with unusable identity");
            return EmployeeLedgerResult {
                lines: Vec::new(),
                warnings: vec![LedgerWarning {
                    code: WarningCode::MissingIdentity,
                    message: err.to_string(),
                    employee_id,
                    pay_code: None,
                }],
                skipped: true,
            };
        }
    };

    let identity = &employee.identity;
    let allocations = allocate_cost_centers(identity.employee_id, ctx.cost_centers);
    let prorated = allocations.is_prorated();
    debug!(
        employee_id = identity.employee_id,
        prorated,
        allocations = allocations.effective().len(),
        pay_codes = employee.pay_codes.len(),
        "Processing employee"
    );

    let mut seen: HashSet<(i64, String, Decimal)> = HashSet::new();
    let mut result = EmployeeLedgerResult::default();

    'pay_codes: for (pay_code, value) in &employee.pay_codes {
        for allocation in allocations.effective() {
            if !prorated
                && !seen.insert((identity.employee_id, pay_code.clone(), allocation.factor))
            {
                continue;
            }

            let amounts = match calculate_amounts(
                value,
                allocation.factor,
                pay_code,
                ctx.rules,
                identity.employee_id,
                ctx.recipients,
                settings.absolute_amounts,
            ) {
                Ok(amounts) => amounts,
                Err(err) => {
                    warn!(
                        employee_id = identity.employee_id,
                        pay_code = %pay_code,
                        error = %err,
                        "Skipping pay-code"
                    );
                    result.warnings.push(pay_code_warning(&err, identity.employee_id, pay_code));
                    continue 'pay_codes;
                }
            };

            result.lines.extend(
                amounts
                    .into_iter()
                    .filter(|a| !a.amount.is_zero())
                    .map(|a| build_detailed_line(identity, allocation, a, ctx.levels)),
            );
        }
    }

    result
}

fn pay_code_warning(err: &EngineError, employee_id: i64, pay_code: &str) -> LedgerWarning {
    LedgerWarning::for_pay_code(WarningCode::ValueConversion, err.to_string(), employee_id, pay_code)
}
