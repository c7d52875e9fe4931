//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod compensation;
mod employee;
mod leave;
mod pay_period;
mod payslip;
mod report;

pub use attendance::{AttendanceLedger, AttendanceRecord};
pub use compensation::{
    BonusCapability, CompensationPolicy, ContractorTerms, EmploymentCategory, FullTimeTerms,
    ManagerTerms, PartTimeTerms, TaxCapability,
};
pub use employee::{
    Employee, EmployeeId, EmployeeProfile, MAX_AMOUNT, MAX_MONTHLY_HOURS, ProfileUpdate,
};
pub(crate) use employee::monthly_hours;
pub use leave::{LeaveLedger, LeaveRequest, LeaveRequestId, LeaveStatus};
pub use pay_period::PayPeriod;
pub use payslip::{AuditStep, AuditTrace, Payslip, PayslipBreakdown};
pub use report::{PayrollReport, PayrollReportLine, PayrollTotals, PendingLeave};
