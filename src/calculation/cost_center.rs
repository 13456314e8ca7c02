//! Cost-center allocation.
//!
//! This module decides how an employee's pay-code values are prorated
//! across cost centers, based on the cost-center catalog.

use rust_decimal::Decimal;

use crate::models::{CostCenterAllocation, CostCenterEntry};

/// The allocations found for one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostCenterAllocations {
    /// One entry per positive-percentage catalog row, factor = percentage / 100.
    pub prorated: Vec<CostCenterAllocation>,
    /// One 100% entry per non-positive or missing percentage row, or a single
    /// 100% entry when the catalog has no row for the employee.
    pub default: Vec<CostCenterAllocation>,
}

impl CostCenterAllocations {
    /// Returns true if the employee has at least one prorated allocation.
    pub fn is_prorated(&self) -> bool {
        !self.prorated.is_empty()
    }

    /// Returns the allocations ledger generation must use: the prorated list
    /// when it is non-empty, otherwise the default list.
    pub fn effective(&self) -> &[CostCenterAllocation] {
        if self.is_prorated() {
            &self.prorated
        } else {
            &self.default
        }
    }
}

/// Resolves an employee's cost-center allocations.
///
/// Every catalog row whose allocation id matches `employee_id` yields either
/// a prorated allocation (positive percentage) or a default 100% allocation.
/// Percentages for one employee need not sum to 100; each positive row is an
/// independent proration pass.
///
/// # Example
///
/// ```
/// use payroll_ledger::calculation::allocate_cost_centers;
/// use payroll_ledger::models::CostCenterEntry;
/// use rust_decimal::Decimal;
///
/// let catalog = vec![CostCenterEntry {
///     allocation_id: Some(7),
///     cost_center: Some("CC-10".to_string()),
///     percentage: Some(Decimal::from(40)),
/// }];
///
/// let allocations = allocate_cost_centers(7, &catalog);
/// assert!(allocations.is_prorated());
/// assert_eq!(allocations.prorated[0].factor, Decimal::new(4, 1));
/// ```
pub fn allocate_cost_centers(employee_id: i64, catalog: &[CostCenterEntry]) -> CostCenterAllocations {
    let mut prorated = Vec::new();
    let mut default = Vec::new();

    for entry in catalog
        .iter()
        .filter(|e| e.allocation_id == Some(employee_id))
    {
        match entry.percentage {
            Some(percentage) if percentage > Decimal::ZERO => {
                prorated.push(CostCenterAllocation {
                    employee_id,
                    factor: percentage / Decimal::ONE_HUNDRED,
                    cost_center: entry.cost_center.clone(),
                });
            }
            _ => default.push(CostCenterAllocation::full(employee_id)),
        }
    }

    if prorated.is_empty() && default.is_empty() {
        default.push(CostCenterAllocation::full(employee_id));
    }

    CostCenterAllocations { prorated, default }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn entry(id: i64, cc: &str, pct: Option<&str>) -> CostCenterEntry {
        CostCenterEntry {
            allocation_id: Some(id),
            cost_center: Some(cc.to_string()),
            percentage: pct.map(dec),
        }
    }

    #[test]
    fn test_no_catalog_row_yields_single_default() {
        let allocations = allocate_cost_centers(1, &[entry(2, "CC-A", Some("100"))]);

        assert!(!allocations.is_prorated());
        assert_eq!(allocations.default, vec![CostCenterAllocation::full(1)]);
        assert_eq!(allocations.effective(), &[CostCenterAllocation::full(1)]);
    }

    #[test]
    fn test_positive_percentages_become_fractions() {
        let catalog = vec![entry(2, "CC-A", Some("60")), entry(2, "CC-B", Some("40"))];
        let allocations = allocate_cost_centers(2, &catalog);

        assert_eq!(allocations.prorated.len(), 2);
        assert_eq!(allocations.prorated[0].factor, dec("0.6"));
        assert_eq!(allocations.prorated[0].cost_center.as_deref(), Some("CC-A"));
        assert_eq!(allocations.prorated[1].factor, dec("0.4"));
        assert!(allocations.default.is_empty());
    }

    #[test]
    fn test_non_positive_and_missing_percentages_go_to_default() {
        let catalog = vec![entry(3, "CC-A", Some("0")), entry(3, "CC-B", None)];
        let allocations = allocate_cost_centers(3, &catalog);

        assert!(allocations.prorated.is_empty());
        assert_eq!(allocations.default.len(), 2);
        assert!(allocations.default.iter().all(|a| a.cost_center.is_none()));
        assert!(allocations.default.iter().all(|a| a.factor == Decimal::ONE));
    }

    #[test]
    fn test_prorated_list_wins_over_default_list() {
        let catalog = vec![entry(4, "CC-A", Some("0")), entry(4, "CC-B", Some("25"))];
        let allocations = allocate_cost_centers(4, &catalog);

        assert_eq!(allocations.default.len(), 1);
        assert_eq!(allocations.effective().len(), 1);
        assert_eq!(allocations.effective()[0].factor, dec("0.25"));
    }

    #[test]
    fn test_percentages_need_not_sum_to_100() {
        let catalog = vec![entry(5, "CC-A", Some("70")), entry(5, "CC-B", Some("70"))];
        let allocations = allocate_cost_centers(5, &catalog);

        let total: Decimal = allocations.prorated.iter().map(|a| a.factor).sum();
        assert_eq!(total, dec("1.4"));
    }
}
