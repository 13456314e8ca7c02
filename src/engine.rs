//! Run orchestration.
//!
//! [`LedgerEngine`] drives one ledger run from a materialized employee table
//! and its catalogs to a [`LedgerBatch`].

use std::collections::HashSet;
use std::time::Instant;

use chrono::Utc;
use rayon::prelude::*;
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::calculation::{
    EmployeeLedgerResult, LedgerContext, RuleIndex, company_list, filter_catalog,
    group_ledger_lines, process_employee, resolve_levels, resolve_process_types,
};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{CatalogTables, Catalogs, LedgerBatch, LedgerTotals, Record, Table};

/// The version stamped on every batch.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generates ledger batches under one configuration.
///
/// # Example
///
/// ```no_run
/// use payroll_ledger::config::ConfigLoader;
/// use payroll_ledger::engine::LedgerEngine;
/// use payroll_ledger::models::{CatalogTables, Table};
///
/// let config = ConfigLoader::load("./config/default").unwrap().into_config();
/// let engine = LedgerEngine::new(config);
///
/// let batch = engine.run(&Table::default(), &CatalogTables::default()).unwrap();
/// assert!(batch.detailed.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct LedgerEngine {
    config: EngineConfig,
}

impl LedgerEngine {
    /// Creates an engine for the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Runs ledger generation over an employee table.
    ///
    /// Steps: validate the bound employee columns, resolve the run's process
    /// type, type the catalogs, filter the rule catalog, resolve levels,
    /// process employees in parallel, then group the detailed lines.
    ///
    /// # Errors
    ///
    /// - [`crate::error::EngineError::ColumnNotFound`] when a required
    ///   column is absent from the employee table or a catalog.
    /// - [`crate::error::EngineError::AmbiguousPeriod`] when the employee
    ///   table spans more than one process type.
    /// - [`crate::error::EngineError::AmountOverflow`] when a grouped sum or
    ///   the net amount leaves the decimal range.
    ///
    /// Employee-level and pay-code-level failures never fail the run; they
    /// are reported in [`LedgerBatch::warnings`].
    pub fn run(&self, employees: &Table, catalogs: &CatalogTables) -> EngineResult<LedgerBatch> {
        let run_id = Uuid::new_v4();
        let start_time = Instant::now();
        let columns = self.config.columns();
        let settings = self.config.settings();

        info!(run_id = %run_id, rows = employees.len(), "Starting ledger run");

        let employee_cols = &columns.employee;
        if !employees.is_empty() {
            employees.require_columns(
                "employee",
                &[
                    employee_cols.period.as_str(),
                    employee_cols.entity.as_str(),
                    employee_cols.company.as_str(),
                    employee_cols.employee_id.as_str(),
                ],
            )?;
        }

        let process_types =
            resolve_process_types(employees, &employee_cols.period, settings.process_type_token)?;
        let typed = Catalogs::from_tables(catalogs, columns)?;

        let companies = company_list(employees, &employee_cols.company);
        let rules = filter_catalog(&typed.rules, &companies, &process_types, &settings.all_sentinel);
        debug!(
            run_id = %run_id,
            catalog_rules = typed.rules.len(),
            filtered_rules = rules.len(),
            companies = companies.len(),
            "Filtered rule catalog"
        );

        let index = RuleIndex::new(&rules);
        let levels = resolve_levels(&typed.levels, &columns.levels.names);
        let ctx = LedgerContext {
            rules: &index,
            cost_centers: &typed.cost_centers,
            recipients: &typed.recipients,
            levels: &levels,
            config: &self.config,
        };

        let partition = first_row_per_employee(employees.rows(), &employee_cols.employee_id);
        let results: Vec<EmployeeLedgerResult> = partition
            .into_par_iter()
            .map(|record| process_employee(record, &ctx))
            .collect();

        let mut detailed = Vec::new();
        let mut warnings = Vec::new();
        let mut skipped = 0;
        let mut processed = 0;
        for result in results {
            if result.skipped {
                skipped += 1;
            } else {
                processed += 1;
            }
            detailed.extend(result.lines);
            warnings.extend(result.warnings);
        }

        let grouping = group_ledger_lines(&detailed)?;
        warnings.extend(grouping.warnings);

        let net_amount = detailed
            .iter()
            .try_fold(Decimal::ZERO, |sum, line| sum.checked_add(line.amount))
            .ok_or_else(|| EngineError::AmountOverflow {
                context: "net amount".to_string(),
            })?;

        let totals = LedgerTotals {
            employees_processed: processed,
            employees_skipped: skipped,
            detailed_lines: detailed.len(),
            grouped_lines: grouping.lines.len(),
            net_amount,
        };

        let duration = start_time.elapsed();
        info!(
            run_id = %run_id,
            employees = processed,
            skipped = skipped,
            detailed = totals.detailed_lines,
            grouped = totals.grouped_lines,
            warnings = warnings.len(),
            duration_us = duration.as_micros(),
            "Ledger run completed"
        );

        Ok(LedgerBatch {
            run_id,
            generated_at: Utc::now(),
            engine_version: ENGINE_VERSION.to_string(),
            process_types,
            detailed,
            grouped: grouping.lines,
            totals,
            warnings,
        })
    }
}

/// Keeps the first row of each employee id, in first-seen order.
///
/// Rows whose id cannot be read are kept individually so the processor
/// reports them.
fn first_row_per_employee<'a>(rows: &'a [Record], id_column: &str) -> Vec<&'a Record> {
    let mut seen: HashSet<i64> = HashSet::new();
    rows.iter()
        .filter(|row| match row.resolve::<i64>(id_column) {
            Some(id) => seen.insert(id),
            None => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::CellValue;

    fn engine() -> LedgerEngine {
        let config = ConfigLoader::load("./config/default")
            .expect("Failed to load config")
            .into_config();
        LedgerEngine::new(config)
    }

    #[test]
    fn test_first_row_per_employee() {
        let rows = vec![
            Record::new().with("id", CellValue::from(1)).with("P1", CellValue::from(10)),
            Record::new().with("id", CellValue::from(2)),
            Record::new().with("id", CellValue::from(1)).with("P1", CellValue::from(99)),
            Record::new().with("id", CellValue::text("bad")),
        ];

        let kept = first_row_per_employee(&rows, "id");

        assert_eq!(kept.len(), 3);
        assert_eq!(kept[0].get("P1"), &CellValue::from(10));
    }

    #[test]
    fn test_empty_run_produces_empty_batch() {
        let batch = engine().run(&Table::default(), &CatalogTables::default()).unwrap();

        assert!(batch.detailed.is_empty());
        assert!(batch.grouped.is_empty());
        assert!(batch.process_types.is_empty());
        assert_eq!(batch.totals, LedgerTotals::default());
        assert_eq!(batch.engine_version, ENGINE_VERSION);
    }

    #[test]
    fn test_missing_employee_column_fails_run() {
        let table = Table::from_records(vec![Record::new().with("P1", CellValue::from(10))]);

        match engine().run(&table, &CatalogTables::default()) {
            Err(EngineError::ColumnNotFound { table, .. }) => assert_eq!(table, "employee"),
            other => panic!("Expected ColumnNotFound error, got {:?}", other),
        }
    }
}
