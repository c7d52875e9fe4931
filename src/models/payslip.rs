//! Payslip models for the payroll engine.
//!
//! This module contains the [`PayslipBreakdown`] produced for every
//! employment category, the [`Payslip`] that wraps it with identity and
//! period information, and the audit trace recording how each amount was
//! derived.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{EmployeeId, EmploymentCategory, PayPeriod};

/// The amounts on a payslip.
///
/// `net_salary = gross_salary + bonus - tax - provident_fund_deduction`
/// holds for every category.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayslipBreakdown;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let breakdown = PayslipBreakdown {
///     gross_salary: Decimal::from_str("5000").unwrap(),
///     bonus: Decimal::from_str("750").unwrap(),
///     tax: Decimal::from_str("750").unwrap(),
///     provident_fund_deduction: Decimal::from_str("600").unwrap(),
///     net_salary: Decimal::from_str("4400").unwrap(),
/// };
/// assert_eq!(breakdown.total_deductions(), Decimal::from_str("1350").unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipBreakdown {
    /// Gross salary for the month.
    pub gross_salary: Decimal,
    /// Service bonus; zero when the category has none.
    pub bonus: Decimal,
    /// Income tax; zero when the category is not taxed.
    pub tax: Decimal,
    /// Provident fund contribution withheld from gross.
    pub provident_fund_deduction: Decimal,
    /// Amount paid out.
    pub net_salary: Decimal,
}

impl PayslipBreakdown {
    /// Tax plus provident fund.
    pub fn total_deductions(&self) -> Decimal {
        self.tax + self.provident_fund_deduction
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// A payslip for one employee and one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    /// Unique identifier for this payslip.
    pub payslip_id: Uuid,
    /// When the payslip was produced.
    pub generated_at: DateTime<Utc>,
    /// The version of the engine that produced it.
    pub engine_version: String,
    /// Who is being paid.
    pub employee_id: EmployeeId,
    /// Employee name at the time of issue.
    pub employee_name: String,
    /// Department at the time of issue.
    pub department: String,
    /// Position at the time of issue.
    pub position: String,
    /// Payment destination.
    pub bank_account: String,
    /// Employment category the amounts were computed under.
    pub category: EmploymentCategory,
    /// The month being paid.
    pub pay_period: PayPeriod,
    /// Reference date for service-based rules.
    pub as_of: NaiveDate,
    /// The amounts.
    pub breakdown: PayslipBreakdown,
    /// How the amounts were derived.
    pub audit_trace: AuditTrace,
}
