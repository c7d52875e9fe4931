//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while managing employees and
//! computing payroll.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::EmployeeId;

/// The main error type for the payroll engine.
///
/// Lookups by identifier surface [`PayrollError::EmployeeNotFound`] instead of
/// aborting, so a boundary layer can report the problem and carry on.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
/// use payroll_engine::models::EmployeeId;
///
/// let error = PayrollError::EmployeeNotFound { id: EmployeeId::new(7) };
/// assert_eq!(error.to_string(), "Employee not found: 7");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// An employee with the same identifier is already in the directory.
    #[error("Duplicate employee identifier: {id}")]
    DuplicateIdentifier {
        /// The identifier that already exists.
        id: EmployeeId,
    },

    /// No employee exists with the given identifier.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The identifier that was looked up.
        id: EmployeeId,
    },

    /// A leave request ends before it starts.
    #[error("Invalid leave range: end date {end} is before start date {start}")]
    InvalidLeaveRange {
        /// The requested first day of leave.
        start: NaiveDate,
        /// The requested last day of leave.
        end: NaiveDate,
    },

    /// Loading or saving the employee snapshot failed.
    #[error("Persistence failure for '{path}': {message}")]
    PersistenceFailure {
        /// The snapshot location.
        path: String,
        /// A description of the I/O or encoding problem.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A month/year pair does not name a calendar month.
    #[error("Invalid pay period {month}/{year}")]
    InvalidPayPeriod {
        /// The requested month.
        month: u32,
        /// The requested year.
        year: i32,
    },

    /// A manager-only operation targeted an employee who is not a manager.
    #[error("Employee {id} is not a manager")]
    NotAManager {
        /// The identifier of the employee.
        id: EmployeeId,
    },

    /// The employee's compensation category lacks the requested capability.
    #[error("Employee {id} has no {capability} capability")]
    CapabilityMissing {
        /// The identifier of the employee.
        id: EmployeeId,
        /// The capability that was requested.
        capability: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_identifier_displays_id() {
        let error = PayrollError::DuplicateIdentifier {
            id: EmployeeId::new(1),
        };
        assert_eq!(error.to_string(), "Duplicate employee identifier: 1");
    }

    #[test]
    fn test_invalid_leave_range_displays_dates() {
        let error = PayrollError::InvalidLeaveRange {
            start: NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid leave range: end date 2025-01-10 is before start date 2025-01-12"
        );
    }

    #[test]
    fn test_persistence_failure_displays_path_and_message() {
        let error = PayrollError::PersistenceFailure {
            path: "employees.json".to_string(),
            message: "permission denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Persistence failure for 'employees.json': permission denied"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = PayrollError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_pay_period_displays_month_and_year() {
        let error = PayrollError::InvalidPayPeriod {
            month: 13,
            year: 2025,
        };
        assert_eq!(error.to_string(), "Invalid pay period 13/2025");
    }

    #[test]
    fn test_capability_missing_displays_capability() {
        let error = PayrollError::CapabilityMissing {
            id: EmployeeId::new(3),
            capability: "variable hours".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Employee 3 has no variable hours capability"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<PayrollError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_not_found() -> PayrollResult<()> {
            Err(PayrollError::EmployeeNotFound {
                id: EmployeeId::new(9),
            })
        }

        fn propagates_error() -> PayrollResult<()> {
            returns_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
