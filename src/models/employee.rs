//! Employee model and related types.
//!
//! This module defines the [`Employee`] aggregate: an immutable identifier,
//! mutable profile fields, one attendance ledger, one leave ledger and one
//! compensation policy.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

use super::{AttendanceLedger, CompensationPolicy, EmploymentCategory, FullTimeTerms, LeaveLedger};

/// Unique employee identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(u32);

impl EmployeeId {
    /// Creates an identifier from its raw value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EmployeeId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// Descriptive fields of an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// First day of employment.
    pub hire_date: NaiveDate,
    /// Department the employee belongs to.
    pub department: String,
    /// Job title.
    pub position: String,
    /// Postal address.
    pub address: String,
    /// Account salary is paid into.
    pub bank_account: String,
}

/// A partial update of profile fields; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    /// New contact email.
    #[serde(default)]
    pub email: Option<String>,
    /// New contact phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// New department.
    #[serde(default)]
    pub department: Option<String>,
    /// New job title.
    #[serde(default)]
    pub position: Option<String>,
    /// New postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// New payment destination.
    #[serde(default)]
    pub bank_account: Option<String>,
}

impl EmployeeProfile {
    /// Applies every field present in `update`.
    pub fn apply(&mut self, update: ProfileUpdate) {
        let ProfileUpdate {
            email,
            phone,
            department,
            position,
            address,
            bank_account,
        } = update;

        if let Some(email) = email {
            self.email = email;
        }
        if let Some(phone) = phone {
            self.phone = phone;
        }
        if let Some(department) = department {
            self.department = department;
        }
        if let Some(position) = position {
            self.position = position;
        }
        if let Some(address) = address {
            self.address = address;
        }
        if let Some(bank_account) = bank_account {
            self.bank_account = bank_account;
        }
    }
}

/// Represents an employee on the payroll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    /// Descriptive fields.
    pub profile: EmployeeProfile,
    /// How the employee is paid.
    pub compensation: CompensationPolicy,
    /// Daily presence and hours.
    #[serde(default)]
    pub attendance: AttendanceLedger,
    /// Leave requests.
    #[serde(default)]
    pub leave: LeaveLedger,
}

impl Employee {
    /// Creates an employee with empty ledgers.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::{
    ///     CompensationPolicy, Employee, EmployeeId, EmployeeProfile, EmploymentCategory,
    ///     PartTimeTerms,
    /// };
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee::new(
    ///     EmployeeId::new(2),
    ///     EmployeeProfile {
    ///         name: "Jane Smith".to_string(),
    ///         email: "jane@company.com".to_string(),
    ///         phone: "098-765-4321".to_string(),
    ///         hire_date: NaiveDate::from_ymd_opt(2021, 3, 10).unwrap(),
    ///         department: "Marketing".to_string(),
    ///         position: "Assistant".to_string(),
    ///         address: "456 Oak St, Town".to_string(),
    ///         bank_account: "ACC654321".to_string(),
    ///     },
    ///     CompensationPolicy::PartTime(PartTimeTerms {
    ///         hourly_rate: Decimal::new(20, 0),
    ///         hours_worked: Decimal::ZERO,
    ///     }),
    /// );
    /// assert_eq!(employee.category(), EmploymentCategory::PartTime);
    /// assert!(employee.attendance.is_empty());
    /// ```
    pub fn new(id: EmployeeId, profile: EmployeeProfile, compensation: CompensationPolicy) -> Self {
        Self {
            id,
            profile,
            compensation,
            attendance: AttendanceLedger::default(),
            leave: LeaveLedger::default(),
        }
    }

    /// Returns the employee's identifier.
    pub fn id(&self) -> EmployeeId {
        self.id
    }

    /// Returns the employee's name.
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Returns the employment category.
    pub fn category(&self) -> EmploymentCategory {
        self.compensation.category()
    }

    /// Completed years of service on `as_of`, counted by hire anniversary.
    ///
    /// A hire date after `as_of` counts as zero years.
    pub fn years_of_service(&self, as_of: NaiveDate) -> u32 {
        let hire = self.profile.hire_date;
        let mut years = as_of.year() - hire.year();
        if (as_of.month(), as_of.day()) < (hire.month(), hire.day()) {
            years -= 1;
        }
        u32::try_from(years).unwrap_or(0)
    }

    /// Checks the fields the calculations rely on.
    ///
    /// Amounts are capped at [`MAX_AMOUNT`] and monthly hours at
    /// [`MAX_MONTHLY_HOURS`], which keeps every payslip product within
    /// decimal range.
    pub fn validate(&self) -> PayrollResult<()> {
        if self.profile.name.trim().is_empty() {
            return Err(invalid("name", "must not be empty"));
        }

        match &self.compensation {
            CompensationPolicy::FullTime(terms) => validate_full_time(terms)?,
            CompensationPolicy::Manager(terms) => {
                validate_full_time(&terms.full_time)?;
                amount("allowance", terms.allowance)?;
                if terms.subordinates().contains(&self.id) {
                    return Err(invalid("subordinates", "a manager cannot report to themselves"));
                }
            }
            CompensationPolicy::PartTime(terms) => {
                amount("hourly_rate", terms.hourly_rate)?;
                monthly_hours("hours_worked", terms.hours_worked)?;
            }
            CompensationPolicy::Contractor(terms) => {
                amount("contract_amount", terms.contract_amount)?;
                if terms.contract_duration_months == 0 {
                    return Err(invalid(
                        "contract_duration_months",
                        "must be at least one month",
                    ));
                }
            }
        }

        Ok(())
    }
}

/// Largest salary, rate, allowance or contract value an employee may carry.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Largest number of hours in one month (31 days of 24 hours).
pub const MAX_MONTHLY_HOURS: i64 = 744;

fn validate_full_time(terms: &FullTimeTerms) -> PayrollResult<()> {
    amount("monthly_salary", terms.monthly_salary)?;
    monthly_hours("overtime_hours", terms.overtime_hours)?;
    amount("overtime_rate", terms.overtime_rate)
}

fn invalid(field: &str, message: &str) -> PayrollError {
    PayrollError::InvalidEmployee {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn bounded(field: &str, value: Decimal, max: i64) -> PayrollResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(invalid(field, "must not be negative"));
    }
    if value > Decimal::from(max) {
        return Err(invalid(field, &format!("must not exceed {max}")));
    }
    Ok(())
}

fn amount(field: &str, value: Decimal) -> PayrollResult<()> {
    bounded(field, value, MAX_AMOUNT)
}

/// Checks a month's variable hours against `0..=MAX_MONTHLY_HOURS`.
pub(crate) fn monthly_hours(field: &str, value: Decimal) -> PayrollResult<()> {
    bounded(field, value, MAX_MONTHLY_HOURS)
}
