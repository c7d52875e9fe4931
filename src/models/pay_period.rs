//! Pay period model.
//!
//! Payroll runs monthly; a [`PayPeriod`] names one calendar month.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// A calendar month that payslips and reports are issued for.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::new(1, 2026).unwrap();
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()));
/// assert!(!period.contains_date(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
/// assert_eq!(period.to_string(), "1/2026");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// Month number, 1 through 12.
    pub month: u32,
    /// Calendar year.
    pub year: i32,
}

impl PayPeriod {
    /// Creates a pay period, rejecting month numbers outside 1..=12.
    pub fn new(month: u32, year: i32) -> PayrollResult<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(PayrollError::InvalidPayPeriod { month, year });
        }
        Ok(Self { month, year })
    }

    /// The pay period containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            year: date.year(),
        }
    }

    /// Checks if a given date falls within this month.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_every_month() {
        for month in 1..=12 {
            assert!(PayPeriod::new(month, 2025).is_ok());
        }
    }

    #[test]
    fn test_new_rejects_month_zero_and_thirteen() {
        assert!(matches!(
            PayPeriod::new(0, 2025),
            Err(PayrollError::InvalidPayPeriod { month: 0, year: 2025 })
        ));
        assert!(PayPeriod::new(13, 2025).is_err());
    }

    #[test]
    fn test_containing_date() {
        let date = NaiveDate::from_ymd_opt(2025, 12, 31).unwrap();
        let period = PayPeriod::containing(date);
        assert_eq!(period, PayPeriod::new(12, 2025).unwrap());
        assert!(period.contains_date(date));
    }

    #[test]
    fn test_serialization() {
        let period = PayPeriod::new(3, 2025).unwrap();
        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, r#"{"month":3,"year":2025}"#);
    }
}
