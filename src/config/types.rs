//! Configuration types for payroll rules.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML rules file. Every type carries a
//! `Default` matching the organization's standard policy, so a missing file
//! section falls back to the built-in value.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::MAX_AMOUNT;

/// One band of a tax schedule.
///
/// An amount falls into the first band whose `ceiling` it does not exceed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBand {
    /// Inclusive upper bound of the band.
    pub ceiling: Decimal,
    /// Rate applied when the band matches.
    pub rate: Decimal,
}

/// A tiered tax schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSchedule {
    /// Bands ordered by ascending ceiling.
    pub bands: Vec<TaxBand>,
    /// Rate applied above the last band.
    pub top_rate: Decimal,
}

impl TaxSchedule {
    /// Returns the rate for `amount`.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::{TaxBand, TaxSchedule};
    /// use rust_decimal::Decimal;
    ///
    /// let schedule = TaxSchedule {
    ///     bands: vec![TaxBand { ceiling: Decimal::new(3000, 0), rate: Decimal::new(5, 2) }],
    ///     top_rate: Decimal::new(10, 2),
    /// };
    /// assert_eq!(schedule.rate_for(Decimal::new(3000, 0)), Decimal::new(5, 2));
    /// assert_eq!(schedule.rate_for(Decimal::new(3001, 0)), Decimal::new(10, 2));
    /// ```
    pub fn rate_for(&self, amount: Decimal) -> Decimal {
        self.bands
            .iter()
            .find(|band| amount <= band.ceiling)
            .map(|band| band.rate)
            .unwrap_or(self.top_rate)
    }
}

/// Tax rules per taxable category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxConfig {
    /// Bands on annualized salary (monthly × 12); rate applies to the monthly salary.
    pub salaried: TaxSchedule,
    /// Bands on monthly gross earnings of hourly staff.
    pub hourly: TaxSchedule,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            salaried: TaxSchedule {
                bands: vec![
                    TaxBand {
                        ceiling: Decimal::new(50_000, 0),
                        rate: Decimal::new(10, 2),
                    },
                    TaxBand {
                        ceiling: Decimal::new(100_000, 0),
                        rate: Decimal::new(15, 2),
                    },
                ],
                top_rate: Decimal::new(20, 2),
            },
            hourly: TaxSchedule {
                bands: vec![TaxBand {
                    ceiling: Decimal::new(3_000, 0),
                    rate: Decimal::new(5, 2),
                }],
                top_rate: Decimal::new(10, 2),
            },
        }
    }
}

/// One tier of the service bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusTier {
    /// Exclusive upper bound on completed years of service.
    pub below_years: u32,
    /// Fraction of the monthly salary paid as bonus.
    pub rate: Decimal,
}

/// Service-based bonus rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusConfig {
    /// Tiers ordered by ascending `below_years`.
    pub tiers: Vec<BonusTier>,
    /// Rate once every tier has been passed.
    pub top_rate: Decimal,
}

impl BonusConfig {
    /// Returns the bonus rate for the given completed years of service.
    pub fn rate_for(&self, years_of_service: u32) -> Decimal {
        self.tiers
            .iter()
            .find(|tier| years_of_service < tier.below_years)
            .map(|tier| tier.rate)
            .unwrap_or(self.top_rate)
    }
}

impl Default for BonusConfig {
    fn default() -> Self {
        Self {
            tiers: vec![
                BonusTier {
                    below_years: 1,
                    rate: Decimal::new(5, 2),
                },
                BonusTier {
                    below_years: 3,
                    rate: Decimal::new(10, 2),
                },
                BonusTier {
                    below_years: 5,
                    rate: Decimal::new(15, 2),
                },
            ],
            top_rate: Decimal::new(20, 2),
        }
    }
}

/// Extra rules for managers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    /// Amount added to gross salary per subordinate.
    pub per_subordinate_allowance: Decimal,
    /// Multiplier applied to the full-time service bonus.
    pub bonus_multiplier: Decimal,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            per_subordinate_allowance: Decimal::new(50, 0),
            bonus_multiplier: Decimal::new(15, 1),
        }
    }
}

/// Statutory deductions applied to every payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionConfig {
    /// Provident fund contribution as a fraction of gross salary.
    pub provident_fund_rate: Decimal,
}

impl Default for DeductionConfig {
    fn default() -> Self {
        Self {
            provident_fund_rate: Decimal::new(12, 2),
        }
    }
}

/// Leave entitlement rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveConfig {
    /// Days of leave available per year.
    pub annual_allowance: i64,
}

impl Default for LeaveConfig {
    fn default() -> Self {
        Self {
            annual_allowance: 20,
        }
    }
}

/// Attendance defaults used by the boundary when hours are not given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceConfig {
    /// Hours recorded for a present day without explicit hours.
    pub default_hours_present: Decimal,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            default_hours_present: Decimal::new(8, 0),
        }
    }
}

/// The complete payroll rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// Tax schedules.
    #[serde(default)]
    pub tax: TaxConfig,
    /// Service bonus tiers.
    #[serde(default)]
    pub bonus: BonusConfig,
    /// Manager allowances and bonus uplift.
    #[serde(default)]
    pub manager: ManagerConfig,
    /// Payslip deductions.
    #[serde(default)]
    pub deductions: DeductionConfig,
    /// Leave entitlement.
    #[serde(default)]
    pub leave: LeaveConfig,
    /// Attendance defaults.
    #[serde(default)]
    pub attendance: AttendanceConfig,
}

impl PayrollConfig {
    /// Checks that every rate is a fraction and every amount is in range.
    ///
    /// Returns a description of the first offending setting.
    pub fn validate(&self) -> Result<(), String> {
        let schedules = [("tax.salaried", &self.tax.salaried), ("tax.hourly", &self.tax.hourly)];
        for (name, schedule) in schedules {
            for band in &schedule.bands {
                fraction(name, band.rate)?;
            }
            fraction(name, schedule.top_rate)?;
        }
        for tier in &self.bonus.tiers {
            fraction("bonus.tiers", tier.rate)?;
        }
        fraction("bonus.top_rate", self.bonus.top_rate)?;
        fraction("deductions.provident_fund_rate", self.deductions.provident_fund_rate)?;
        within(
            "manager.per_subordinate_allowance",
            self.manager.per_subordinate_allowance,
            Decimal::from(MAX_AMOUNT),
        )?;
        within(
            "manager.bonus_multiplier",
            self.manager.bonus_multiplier,
            Decimal::from(MAX_BONUS_MULTIPLIER),
        )?;
        within(
            "attendance.default_hours_present",
            self.attendance.default_hours_present,
            Decimal::from(HOURS_PER_DAY),
        )?;
        if self.leave.annual_allowance < 0 {
            return Err("leave.annual_allowance must not be negative".to_string());
        }
        Ok(())
    }
}

const MAX_BONUS_MULTIPLIER: i64 = 100;

/// Hours in one calendar day.
pub const HOURS_PER_DAY: i64 = 24;

fn fraction(name: &str, rate: Decimal) -> Result<(), String> {
    within(name, rate, Decimal::ONE)
}

fn within(name: &str, value: Decimal, max: Decimal) -> Result<(), String> {
    if value < Decimal::ZERO || value > max {
        return Err(format!("{name} must be between 0 and {max}, got {value}"));
    }
    Ok(())
}
