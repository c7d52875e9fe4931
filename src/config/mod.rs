//! Configuration loading and management for the payroll engine.
//!
//! This module provides the payroll rule tables (tax bands, bonus tiers,
//! manager uplift, deductions, leave entitlement) and a loader that reads
//! them from YAML.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("PF rate: {}", config.config().deductions.provident_fund_rate);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AttendanceConfig, BonusConfig, BonusTier, DeductionConfig, HOURS_PER_DAY, LeaveConfig,
    ManagerConfig, PayrollConfig, TaxBand, TaxConfig, TaxSchedule,
};
