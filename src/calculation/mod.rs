//! Calculation logic for the payroll engine.
//!
//! This module contains the pay rules applied to a compensation policy:
//! gross salary per employment category, banded income tax, the service
//! bonus, and the provident fund deduction that yields net salary. Each
//! rule has a plain form returning the amount and an audited form that
//! also returns an [`AuditStep`](crate::models::AuditStep).

mod bonus;
mod gross_salary;
mod payslip;
mod tax;

pub use bonus::{BonusResult, bonus, calculate_bonus};
pub use gross_salary::{GrossSalaryResult, calculate_gross_salary, gross_salary};
pub use payslip::{
    PayslipBreakdownResult, calculate_payslip_breakdown, compute_payslip, payslip_breakdown,
};
pub use tax::{TaxResult, calculate_tax, tax};
