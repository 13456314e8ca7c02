//! Performance benchmarks for the payroll ledger engine.
//!
//! This benchmark suite measures full ledger runs over synthetic payrolls:
//! - Single employee run
//! - Batch of 100 employees
//! - Batch of 1000 employees
//! - Scaling with the number of pay-codes per employee
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use payroll_ledger::config::ConfigLoader;
use payroll_ledger::engine::LedgerEngine;
use payroll_ledger::models::{CatalogTables, CellValue, Record, Table};

const PAY_CODES: usize = 12;

/// Creates an engine with the sample configuration.
fn create_engine() -> LedgerEngine {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    LedgerEngine::new(config.into_config())
}

/// Creates an employee table with `count` employees carrying `pay_codes` values each.
fn create_employees(count: i64, pay_codes: usize) -> Table {
    let rows = (1..=count)
        .map(|id| {
            let mut record = Record::new()
                .with("ME03210.000-ISGDDMFNN", CellValue::text("2025-01 REGULAR"))
                .with("AY01200.000-ISGDDMFNN", CellValue::from(100))
                .with("ME01410.000-ISGDDMFNN", CellValue::text("MX01"))
                .with("ME05010.000-ISGDDMFNN", CellValue::text("PG-MX"))
                .with("ME01010.000-ISGDDMFNN", CellValue::from(id));
            for code in 0..pay_codes {
                record.insert(format!("P{:02}", code), CellValue::from(id * 10 + code as i64));
            }
            record
        })
        .collect();
    Table::from_records(rows)
}

/// Creates catalogs covering every pay-code, with every third employee prorated
/// and every fifth carrying a third-party recipient.
fn create_catalogs(count: i64) -> CatalogTables {
    let tags = ["D-", "C+", "P+", "X"];
    let rules = (0..PAY_CODES)
        .map(|code| {
            Record::new()
                .with("Petal Code", CellValue::text(format!("P{:02}", code)))
                .with("Accounting type", CellValue::text(tags[code % tags.len()]))
                .with("DEBIT account", CellValue::text(format!("{}", 4000 + code)))
                .with("CREDIT account", CellValue::text(format!("{}", 2000 + code)))
                .with("Client Code", CellValue::text("CLI-01"))
                .with("GLFile", CellValue::text("GL-NOM"))
                .with("Item TEXT", CellValue::text("Nomina"))
                .with("Company", CellValue::from(100))
                .with("Process Type", CellValue::text("REGULAR"))
        })
        .collect();

    let cost_centers = (1..=count)
        .filter(|id| id % 3 == 0)
        .flat_map(|id| {
            [("CC-A", 70), ("CC-B", 30)].map(|(cc, pct)| {
                Record::new()
                    .with("ID", CellValue::from(id))
                    .with("CC", CellValue::text(cc))
                    .with("% DE CC", CellValue::from(pct))
            })
        })
        .collect();

    let recipients = (1..=count)
        .filter(|id| id % 5 == 0)
        .map(|id| {
            Record::new()
                .with("Employee ID", CellValue::from(id))
                .with("Tipo", CellValue::text("ALIMONY"))
                .with("BENEFICIARIA", CellValue::text("Beneficiary"))
                .with("NUM. ACREEDOR", CellValue::text("8800"))
        })
        .collect();

    CatalogTables {
        rules: Table::from_records(rules),
        cost_centers: Table::from_records(cost_centers),
        recipients: Table::from_records(recipients),
        levels: Table::default(),
    }
}

fn bench_single_employee(c: &mut Criterion) {
    let engine = create_engine();
    let employees = create_employees(1, PAY_CODES);
    let catalogs = create_catalogs(1);

    c.bench_function("single_employee", |b| {
        b.iter(|| black_box(engine.run(&employees, &catalogs).expect("run failed")))
    });
}

fn bench_batches(c: &mut Criterion) {
    let engine = create_engine();
    let mut group = c.benchmark_group("batch_processing");

    for count in [100i64, 1000] {
        let employees = create_employees(count, PAY_CODES);
        let catalogs = create_catalogs(count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("employees", count), &count, |b, _| {
            b.iter(|| black_box(engine.run(&employees, &catalogs).expect("run failed")))
        });
    }

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let engine = create_engine();
    let catalogs = create_catalogs(100);
    let mut group = c.benchmark_group("pay_code_scaling");

    for pay_codes in [1usize, 4, PAY_CODES] {
        let employees = create_employees(100, pay_codes);
        group.bench_with_input(BenchmarkId::new("pay_codes", pay_codes), &pay_codes, |b, _| {
            b.iter(|| black_box(engine.run(&employees, &catalogs).expect("run failed")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_single_employee, bench_batches, bench_scaling);
criterion_main!(benches);
