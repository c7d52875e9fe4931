//! Gross salary calculation.
//!
//! This module computes the monthly gross for every employment category.
//! Managers are paid their full-time gross plus a fixed allowance and a
//! per-subordinate allowance.

use rust_decimal::Decimal;

use crate::config::PayrollConfig;
use crate::models::{AuditStep, CompensationPolicy, ContractorTerms, FullTimeTerms};

/// The result of a gross salary calculation, including the amount and audit step.
#[derive(Debug, Clone)]
pub struct GrossSalaryResult {
    /// Monthly gross salary.
    pub gross: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the monthly gross salary for a compensation policy.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::gross_salary;
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::{CompensationPolicy, PartTimeTerms};
/// use rust_decimal::Decimal;
///
/// let policy = CompensationPolicy::PartTime(PartTimeTerms {
///     hourly_rate: Decimal::new(20, 0),
///     hours_worked: Decimal::new(100, 0),
/// });
/// assert_eq!(gross_salary(&policy, &PayrollConfig::default()), Decimal::new(2000, 0));
/// ```
pub fn gross_salary(policy: &CompensationPolicy, config: &PayrollConfig) -> Decimal {
    match policy {
        CompensationPolicy::FullTime(terms) => full_time_gross(terms),
        CompensationPolicy::PartTime(terms) => terms.hourly_rate * terms.hours_worked,
        CompensationPolicy::Contractor(terms) => contractor_gross(terms),
        CompensationPolicy::Manager(terms) => {
            full_time_gross(&terms.full_time)
                + terms.allowance
                + team_allowance(terms.team_size(), config)
        }
    }
}

/// Calculates the monthly gross salary and records how it was derived.
pub fn calculate_gross_salary(
    policy: &CompensationPolicy,
    config: &PayrollConfig,
    step_number: u32,
) -> GrossSalaryResult {
    let gross = gross_salary(policy, config);

    let (input, reasoning) = match policy {
        CompensationPolicy::FullTime(terms) => (
            serde_json::json!({
                "category": "full_time",
                "monthly_salary": terms.monthly_salary.to_string(),
                "overtime_hours": terms.overtime_hours.to_string(),
                "overtime_rate": terms.overtime_rate.to_string()
            }),
            format!(
                "${} + {}h x ${} = ${}",
                terms.monthly_salary.normalize(),
                terms.overtime_hours.normalize(),
                terms.overtime_rate.normalize(),
                gross.normalize()
            ),
        ),
        CompensationPolicy::PartTime(terms) => (
            serde_json::json!({
                "category": "part_time",
                "hourly_rate": terms.hourly_rate.to_string(),
                "hours_worked": terms.hours_worked.to_string()
            }),
            format!(
                "{}h x ${} = ${}",
                terms.hours_worked.normalize(),
                terms.hourly_rate.normalize(),
                gross.normalize()
            ),
        ),
        CompensationPolicy::Contractor(terms) => (
            serde_json::json!({
                "category": "contractor",
                "contract_amount": terms.contract_amount.to_string(),
                "contract_duration_months": terms.contract_duration_months
            }),
            if terms.contract_duration_months == 0 {
                "Contract has no duration, gross is $0".to_string()
            } else {
                format!(
                    "${} / {} months = ${}",
                    terms.contract_amount.normalize(),
                    terms.contract_duration_months,
                    gross.normalize()
                )
            },
        ),
        CompensationPolicy::Manager(terms) => {
            let team = team_allowance(terms.team_size(), config);
            (
                serde_json::json!({
                    "category": "manager",
                    "monthly_salary": terms.full_time.monthly_salary.to_string(),
                    "overtime_hours": terms.full_time.overtime_hours.to_string(),
                    "overtime_rate": terms.full_time.overtime_rate.to_string(),
                    "allowance": terms.allowance.to_string(),
                    "team_size": terms.team_size(),
                    "per_subordinate_allowance":
                        config.manager.per_subordinate_allowance.to_string()
                }),
                format!(
                    "${} full-time gross + ${} allowance + ${} for {} subordinates = ${}",
                    full_time_gross(&terms.full_time).normalize(),
                    terms.allowance.normalize(),
                    team.normalize(),
                    terms.team_size(),
                    gross.normalize()
                ),
            )
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "gross_salary".to_string(),
        rule_name: "Gross Salary".to_string(),
        input,
        output: serde_json::json!({
            "gross_salary": gross.to_string()
        }),
        reasoning,
    };

    GrossSalaryResult { gross, audit_step }
}

fn full_time_gross(terms: &FullTimeTerms) -> Decimal {
    terms.monthly_salary + terms.overtime_hours * terms.overtime_rate
}

// A zero-month contract pays nothing rather than dividing by zero.
fn contractor_gross(terms: &ContractorTerms) -> Decimal {
    terms
        .contract_amount
        .checked_div(Decimal::from(terms.contract_duration_months))
        .unwrap_or(Decimal::ZERO)
}

fn team_allowance(team_size: usize, config: &PayrollConfig) -> Decimal {
    config.manager.per_subordinate_allowance * Decimal::from(team_size)
}
