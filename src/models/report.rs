//! Directory-wide report models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{EmployeeId, EmploymentCategory, LeaveRequest, PayPeriod};

/// One employee's line in the payroll report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReportLine {
    /// The employee.
    pub employee_id: EmployeeId,
    /// Employee name.
    pub name: String,
    /// Employment category.
    pub category: EmploymentCategory,
    /// Gross salary.
    pub salary: Decimal,
    /// Tax; zero for untaxed categories.
    pub tax: Decimal,
    /// Bonus; zero for categories without a bonus.
    pub bonus: Decimal,
}

/// Aggregate totals over every report line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollTotals {
    /// Sum of gross salaries.
    pub salary: Decimal,
    /// Sum of tax.
    pub tax: Decimal,
    /// Sum of bonuses.
    pub bonus: Decimal,
    /// `salary + bonus - tax`.
    pub net_payout: Decimal,
}

/// Payroll report for one month.
///
/// Lines follow directory order; callers needing another order sort them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// The month reported on.
    pub pay_period: PayPeriod,
    /// Reference date for service-based rules.
    pub as_of: NaiveDate,
    /// One line per employee.
    pub lines: Vec<PayrollReportLine>,
    /// Totals across all lines.
    pub totals: PayrollTotals,
}

/// A pending leave request together with who asked for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingLeave {
    /// The requesting employee.
    pub employee_id: EmployeeId,
    /// Employee name.
    pub employee_name: String,
    /// Job title of the requester.
    pub position: String,
    /// Position of the request in the employee's ledger.
    pub index: usize,
    /// The request itself.
    pub request: LeaveRequest,
}
