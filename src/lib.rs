//! Payroll engine
//!
//! This crate manages an employee directory and computes monthly payroll:
//! gross salary per employment category, banded income tax, service
//! bonuses and provident fund deductions. It also tracks attendance and
//! leave, persists the directory as a JSON snapshot, and serves it over
//! HTTP.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod directory;
pub mod error;
pub mod models;
pub mod render;
pub mod store;
