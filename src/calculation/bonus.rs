//! Service bonus calculation.
//!
//! The bonus is a fraction of the monthly salary chosen by completed years
//! of service. Managers receive the full-time bonus scaled by the manager
//! multiplier.

use rust_decimal::Decimal;

use crate::config::PayrollConfig;
use crate::models::{AuditStep, BonusCapability, CompensationPolicy};

/// The result of a bonus calculation, including the amount and audit step.
#[derive(Debug, Clone)]
pub struct BonusResult {
    /// Bonus for the month; zero when the policy has no bonus.
    pub bonus: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the service bonus, or `None` when the policy has no bonus capability.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::bonus;
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::{CompensationPolicy, FullTimeTerms};
/// use rust_decimal::Decimal;
///
/// let policy = CompensationPolicy::FullTime(FullTimeTerms {
///     monthly_salary: Decimal::new(5000, 0),
///     overtime_hours: Decimal::ZERO,
///     overtime_rate: Decimal::new(25, 0),
/// });
/// assert_eq!(bonus(&policy, 3, &PayrollConfig::default()), Some(Decimal::new(750, 0)));
/// ```
pub fn bonus(
    policy: &CompensationPolicy,
    years_of_service: u32,
    config: &PayrollConfig,
) -> Option<Decimal> {
    assess(policy, years_of_service, config).map(|assessment| assessment.bonus)
}

/// How a bonus amount was reached.
struct BonusAssessment {
    monthly_salary: Decimal,
    rate: Decimal,
    /// Present for managers only.
    multiplier: Option<Decimal>,
    bonus: Decimal,
}

fn assess(
    policy: &CompensationPolicy,
    years_of_service: u32,
    config: &PayrollConfig,
) -> Option<BonusAssessment> {
    policy.bonus_capability().map(|capability| {
        let rate = config.bonus.rate_for(years_of_service);
        match capability {
            BonusCapability::Service(terms) => BonusAssessment {
                monthly_salary: terms.monthly_salary,
                rate,
                multiplier: None,
                bonus: terms.monthly_salary * rate,
            },
            BonusCapability::ManagerService(terms) => {
                let multiplier = config.manager.bonus_multiplier;
                BonusAssessment {
                    monthly_salary: terms.monthly_salary,
                    rate,
                    multiplier: Some(multiplier),
                    bonus: terms.monthly_salary * rate * multiplier,
                }
            }
        }
    })
}

/// Calculates the service bonus and records the tier that was applied.
pub fn calculate_bonus(
    policy: &CompensationPolicy,
    years_of_service: u32,
    config: &PayrollConfig,
    step_number: u32,
) -> BonusResult {
    let (bonus, input, output, reasoning) = match assess(policy, years_of_service, config) {
        Some(a) => {
            let mut output = serde_json::json!({
                "bonus": a.bonus.to_string(),
                "rate": a.rate.to_string(),
                "bonus_applied": true
            });
            let reasoning = match a.multiplier {
                Some(multiplier) => {
                    output["multiplier"] = serde_json::json!(multiplier.to_string());
                    format!(
                        "{} years of service: ${} x {} x {} manager multiplier = ${}",
                        years_of_service,
                        a.monthly_salary.normalize(),
                        a.rate.normalize(),
                        multiplier.normalize(),
                        a.bonus.normalize()
                    )
                }
                None => format!(
                    "{} years of service: ${} x {} = ${}",
                    years_of_service,
                    a.monthly_salary.normalize(),
                    a.rate.normalize(),
                    a.bonus.normalize()
                ),
            };
            (
                a.bonus,
                serde_json::json!({
                    "monthly_salary": a.monthly_salary.to_string(),
                    "years_of_service": years_of_service
                }),
                output,
                reasoning,
            )
        }
        None => (
            Decimal::ZERO,
            serde_json::json!({
                "category": policy.category(),
                "years_of_service": years_of_service
            }),
            serde_json::json!({
                "bonus": "0",
                "bonus_applied": false
            }),
            format!(
                "No bonus applied - {} has no service bonus",
                policy.category().label()
            ),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "service_bonus".to_string(),
        rule_name: "Service Bonus".to_string(),
        input,
        output,
        reasoning,
    };

    BonusResult { bonus, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContractorTerms, FullTimeTerms, ManagerTerms, PartTimeTerms};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn full_time_terms() -> FullTimeTerms {
        FullTimeTerms {
            monthly_salary: dec("5000"),
            overtime_hours: Decimal::ZERO,
            overtime_rate: dec("25"),
        }
    }

    #[test]
    fn test_service_tiers() {
        let policy = CompensationPolicy::FullTime(full_time_terms());
        let config = PayrollConfig::default();

        assert_eq!(bonus(&policy, 0, &config), Some(dec("250")));
        assert_eq!(bonus(&policy, 1, &config), Some(dec("500")));
        assert_eq!(bonus(&policy, 2, &config), Some(dec("500")));
        assert_eq!(bonus(&policy, 3, &config), Some(dec("750")));
        assert_eq!(bonus(&policy, 4, &config), Some(dec("750")));
        assert_eq!(bonus(&policy, 5, &config), Some(dec("1000")));
        assert_eq!(bonus(&policy, 30, &config), Some(dec("1000")));
    }

    #[test]
    fn test_overtime_is_not_part_of_bonus_base() {
        let mut terms = full_time_terms();
        terms.overtime_hours = dec("20");
        let policy = CompensationPolicy::FullTime(terms);
        assert_eq!(bonus(&policy, 3, &PayrollConfig::default()), Some(dec("750")));
    }

    #[test]
    fn test_manager_bonus_is_scaled() {
        let policy = CompensationPolicy::Manager(ManagerTerms::new(full_time_terms(), dec("1000")));
        let result = calculate_bonus(&policy, 3, &PayrollConfig::default(), 4);

        assert_eq!(result.bonus, dec("1125"));
        assert_eq!(result.audit_step.rule_id, "service_bonus");
        assert_eq!(
            result.audit_step.output["multiplier"].as_str().unwrap(),
            "1.5"
        );
        assert!(result.audit_step.reasoning.contains("manager multiplier"));
    }

    #[test]
    fn test_audited_bonus_matches_plain_bonus() {
        let config = PayrollConfig::default();
        let policies = [
            CompensationPolicy::FullTime(full_time_terms()),
            CompensationPolicy::Manager(ManagerTerms::new(full_time_terms(), dec("1000"))),
        ];
        for policy in &policies {
            for years in [0, 2, 4, 9] {
                assert_eq!(
                    Some(calculate_bonus(policy, years, &config, 3).bonus),
                    bonus(policy, years, &config)
                );
            }
        }
    }

    #[test]
    fn test_part_time_and_contractor_have_no_bonus() {
        let config = PayrollConfig::default();
        let part_time = CompensationPolicy::PartTime(PartTimeTerms {
            hourly_rate: dec("20"),
            hours_worked: dec("100"),
        });
        let contractor = CompensationPolicy::Contractor(ContractorTerms {
            contract_amount: dec("30000"),
            contract_duration_months: 6,
        });

        assert_eq!(bonus(&part_time, 10, &config), None);
        assert_eq!(bonus(&contractor, 10, &config), None);

        let result = calculate_bonus(&contractor, 10, &config, 1);
        assert_eq!(result.bonus, Decimal::ZERO);
        assert!(
            !result.audit_step.output["bonus_applied"]
                .as_bool()
                .unwrap()
        );
    }
}
