//! Request types for the payroll API.
//!
//! This module defines the JSON bodies and query strings accepted by the
//! endpoints, and their conversion into domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::HOURS_PER_DAY;
use crate::models::{
    CompensationPolicy, ContractorTerms, Employee, EmployeeId, EmployeeProfile, FullTimeTerms,
    ManagerTerms, PartTimeTerms,
};

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Unique identifier for the employee.
    pub id: u32,
    /// Full name.
    pub name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone number.
    #[serde(default)]
    pub phone: String,
    /// First day of employment.
    pub hire_date: NaiveDate,
    /// Department.
    #[serde(default)]
    pub department: String,
    /// Job title.
    #[serde(default)]
    pub position: String,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Account salary is paid into.
    #[serde(default)]
    pub bank_account: String,
    /// How the employee is paid.
    pub compensation: CompensationRequest,
}

/// Compensation terms in a create request, tagged by `category`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum CompensationRequest {
    /// Salaried terms.
    FullTime {
        /// Fixed monthly salary.
        monthly_salary: Decimal,
        /// Overtime hours this month.
        #[serde(default)]
        overtime_hours: Decimal,
        /// Pay per overtime hour.
        #[serde(default)]
        overtime_rate: Decimal,
    },
    /// Hourly terms.
    PartTime {
        /// Pay per hour.
        hourly_rate: Decimal,
        /// Hours worked this month.
        #[serde(default)]
        hours_worked: Decimal,
    },
    /// Fixed contract terms.
    Contractor {
        /// Total contract value.
        contract_amount: Decimal,
        /// Contract length in months.
        contract_duration_months: u32,
    },
    /// Manager terms.
    Manager {
        /// Fixed monthly salary.
        monthly_salary: Decimal,
        /// Overtime hours this month.
        #[serde(default)]
        overtime_hours: Decimal,
        /// Pay per overtime hour.
        #[serde(default)]
        overtime_rate: Decimal,
        /// Fixed monthly allowance.
        #[serde(default)]
        allowance: Decimal,
        /// Identifiers of existing employees reporting to this manager.
        #[serde(default)]
        subordinates: Vec<u32>,
    },
}

impl From<CompensationRequest> for CompensationPolicy {
    fn from(req: CompensationRequest) -> Self {
        match req {
            CompensationRequest::FullTime {
                monthly_salary,
                overtime_hours,
                overtime_rate,
            } => CompensationPolicy::FullTime(FullTimeTerms {
                monthly_salary,
                overtime_hours,
                overtime_rate,
            }),
            CompensationRequest::PartTime {
                hourly_rate,
                hours_worked,
            } => CompensationPolicy::PartTime(PartTimeTerms {
                hourly_rate,
                hours_worked,
            }),
            CompensationRequest::Contractor {
                contract_amount,
                contract_duration_months,
            } => CompensationPolicy::Contractor(ContractorTerms {
                contract_amount,
                contract_duration_months,
            }),
            CompensationRequest::Manager {
                monthly_salary,
                overtime_hours,
                overtime_rate,
                allowance,
                subordinates,
            } => {
                let mut terms = ManagerTerms::new(
                    FullTimeTerms {
                        monthly_salary,
                        overtime_hours,
                        overtime_rate,
                    },
                    allowance,
                );
                for id in subordinates {
                    terms.add_subordinate(EmployeeId::new(id));
                }
                CompensationPolicy::Manager(terms)
            }
        }
    }
}

impl From<CreateEmployeeRequest> for Employee {
    fn from(req: CreateEmployeeRequest) -> Self {
        Employee::new(
            EmployeeId::new(req.id),
            EmployeeProfile {
                name: req.name,
                email: req.email,
                phone: req.phone,
                hire_date: req.hire_date,
                department: req.department,
                position: req.position,
                address: req.address,
                bank_account: req.bank_account,
            },
            req.compensation.into(),
        )
    }
}

/// Request body for `PUT /employees/:id/hours`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableHoursRequest {
    /// Overtime hours for salaried staff, hours worked for hourly staff.
    pub hours: Decimal,
}

/// Request body for `POST /employees/:id/subordinates`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignSubordinateRequest {
    /// The employee joining the team.
    pub subordinate_id: u32,
}

/// Request body for `POST /employees/:id/attendance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRequest {
    /// The day being recorded.
    pub date: NaiveDate,
    /// Whether the employee was present.
    pub present: bool,
    /// Hours worked; defaults from configuration when omitted.
    #[serde(default)]
    pub hours: Option<Decimal>,
}

impl AttendanceRequest {
    /// Checks that explicit hours fit within one day.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(hours) = self.hours {
            if hours < Decimal::ZERO || hours > Decimal::from(HOURS_PER_DAY) {
                return Err(format!(
                    "hours must be between 0 and {HOURS_PER_DAY}, got {hours}"
                ));
            }
        }
        Ok(())
    }
}

/// Request body for `POST /employees/:id/leave`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveApplicationRequest {
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

/// Query string for payslip and report endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodQuery {
    /// Month number, 1 through 12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
    /// Reference date for years of service; today when omitted.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}
