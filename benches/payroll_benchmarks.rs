//! Performance benchmarks for the payroll engine.
//!
//! Covers the payslip pipeline on its own, the payslip endpoint end to end,
//! and the payroll report as the directory grows.
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::compute_payslip;
use payroll_engine::config::PayrollConfig;
use payroll_engine::directory::PayrollDirectory;
use payroll_engine::models::{
    CompensationPolicy, ContractorTerms, Employee, EmployeeId, EmployeeProfile, FullTimeTerms,
    ManagerTerms, PartTimeTerms, PayPeriod,
};
use payroll_engine::store::MemoryStore;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
}

fn period() -> PayPeriod {
    PayPeriod::new(1, 2025).unwrap()
}

fn profile(i: u32) -> EmployeeProfile {
    EmployeeProfile {
        name: format!("Employee {i}"),
        email: format!("employee{i}@company.com"),
        phone: "555-000-0000".to_string(),
        hire_date: NaiveDate::from_ymd_opt(2015 + (i % 10) as i32, 1 + i % 12, 1).unwrap(),
        department: "Operations".to_string(),
        position: "Staff".to_string(),
        address: "1 Bench St".to_string(),
        bank_account: format!("ACC{i:06}"),
    }
}

/// Builds a directory of `size` employees cycling through every category.
///
/// Every tenth employee is a manager over the nine before it.
fn create_directory(size: u32) -> PayrollDirectory {
    let mut directory = PayrollDirectory::new(PayrollConfig::default());
    for i in 1..=size {
        let compensation = match i % 10 {
            0 => CompensationPolicy::Manager(ManagerTerms::new(
                FullTimeTerms {
                    monthly_salary: Decimal::new(7000, 0),
                    overtime_hours: Decimal::ZERO,
                    overtime_rate: Decimal::new(30, 0),
                },
                Decimal::new(1000, 0),
            )),
            n if n % 3 == 0 => CompensationPolicy::PartTime(PartTimeTerms {
                hourly_rate: Decimal::new(20, 0),
                hours_worked: Decimal::new(120, 0),
            }),
            n if n % 3 == 1 => CompensationPolicy::Contractor(ContractorTerms {
                contract_amount: Decimal::new(30000, 0),
                contract_duration_months: 6,
            }),
            _ => CompensationPolicy::FullTime(FullTimeTerms {
                monthly_salary: Decimal::new(5000, 0),
                overtime_hours: Decimal::new(10, 0),
                overtime_rate: Decimal::new(25, 0),
            }),
        };
        directory
            .add(Employee::new(EmployeeId::new(i), profile(i), compensation))
            .expect("bench employee is valid");
        if i % 10 == 0 {
            for sub in i - 9..i {
                directory
                    .assign_subordinate(EmployeeId::new(i), EmployeeId::new(sub))
                    .expect("bench team member exists");
            }
        }
    }
    directory
}

/// Benchmark: the four-step payslip pipeline for one manager.
fn bench_compute_payslip(c: &mut Criterion) {
    let directory = create_directory(10);
    let config = PayrollConfig::default();
    let manager = directory.find(EmployeeId::new(10)).unwrap().clone();

    c.bench_function("compute_payslip", |b| {
        b.iter(|| black_box(compute_payslip(black_box(&manager), period(), as_of(), &config)))
    });
}

/// Benchmark: `GET /payslips/:id` through the router.
fn bench_payslip_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::new(create_directory(100), Arc::new(MemoryStore::new()));
    let router = create_router(state);

    c.bench_function("payslip_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .uri("/payslips/50?month=1&year=2025&as_of=2025-01-31")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: payroll report scaling with directory size.
fn bench_payroll_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("payroll_report");

    for size in [10u32, 100, 1000] {
        let directory = create_directory(size);
        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::new("employees", size), &size, |b, _| {
            b.iter(|| black_box(directory.payroll_report(period(), as_of())))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compute_payslip,
    bench_payslip_endpoint,
    bench_payroll_report,
);
criterion_main!(benches);
