//! Income tax calculation.
//!
//! Salaried staff are banded on their annualized monthly salary and taxed
//! on the monthly salary. Hourly staff are banded and taxed on the monthly
//! gross. Contractors carry no tax capability.

use rust_decimal::Decimal;

use crate::config::PayrollConfig;
use crate::models::{AuditStep, CompensationPolicy, TaxCapability};

const MONTHS_PER_YEAR: i64 = 12;

/// The result of a tax calculation, including the amount and audit step.
#[derive(Debug, Clone)]
pub struct TaxResult {
    /// Tax for the month; zero when the policy is not taxed.
    pub tax: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the monthly tax, or `None` when the policy has no tax capability.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::tax;
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::{CompensationPolicy, FullTimeTerms};
/// use rust_decimal::Decimal;
///
/// let policy = CompensationPolicy::FullTime(FullTimeTerms {
///     monthly_salary: Decimal::new(5000, 0),
///     overtime_hours: Decimal::ZERO,
///     overtime_rate: Decimal::new(25, 0),
/// });
/// // 60,000 a year falls in the 15% band.
/// assert_eq!(tax(&policy, &PayrollConfig::default()), Some(Decimal::new(75000, 2)));
/// ```
pub fn tax(policy: &CompensationPolicy, config: &PayrollConfig) -> Option<Decimal> {
    assess(policy, config).map(|assessment| assessment.tax)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum TaxBasis {
    Salaried,
    Hourly,
}

impl TaxBasis {
    fn label(self) -> &'static str {
        match self {
            TaxBasis::Salaried => "salaried",
            TaxBasis::Hourly => "hourly",
        }
    }
}

/// How a tax amount was reached.
struct TaxAssessment {
    basis: TaxBasis,
    /// The amount the band was chosen on.
    banded_on: Decimal,
    /// The amount the rate was applied to.
    taxed_on: Decimal,
    rate: Decimal,
    tax: Decimal,
}

fn assess(policy: &CompensationPolicy, config: &PayrollConfig) -> Option<TaxAssessment> {
    policy.tax_capability().map(|capability| match capability {
        TaxCapability::Salaried(terms) => {
            let annual = terms.monthly_salary * Decimal::from(MONTHS_PER_YEAR);
            let rate = config.tax.salaried.rate_for(annual);
            TaxAssessment {
                basis: TaxBasis::Salaried,
                banded_on: annual,
                taxed_on: terms.monthly_salary,
                rate,
                tax: terms.monthly_salary * rate,
            }
        }
        TaxCapability::Hourly(terms) => {
            let gross = terms.hourly_rate * terms.hours_worked;
            let rate = config.tax.hourly.rate_for(gross);
            TaxAssessment {
                basis: TaxBasis::Hourly,
                banded_on: gross,
                taxed_on: gross,
                rate,
                tax: gross * rate,
            }
        }
    })
}

/// Calculates the monthly tax and records the band that was applied.
pub fn calculate_tax(
    policy: &CompensationPolicy,
    config: &PayrollConfig,
    step_number: u32,
) -> TaxResult {
    let (tax, input, output, reasoning) = match assess(policy, config) {
        Some(a) => {
            let reasoning = if a.basis == TaxBasis::Salaried {
                format!(
                    "Annual salary ${} taxed at {} on monthly ${} = ${}",
                    a.banded_on.normalize(),
                    a.rate.normalize(),
                    a.taxed_on.normalize(),
                    a.tax.normalize()
                )
            } else {
                format!(
                    "Monthly gross ${} taxed at {} = ${}",
                    a.taxed_on.normalize(),
                    a.rate.normalize(),
                    a.tax.normalize()
                )
            };
            (
                a.tax,
                serde_json::json!({
                    "basis": a.basis.label(),
                    "banded_on": a.banded_on.to_string(),
                    "taxed_on": a.taxed_on.to_string()
                }),
                serde_json::json!({
                    "tax": a.tax.to_string(),
                    "rate": a.rate.to_string(),
                    "tax_applied": true
                }),
                reasoning,
            )
        }
        None => (
            Decimal::ZERO,
            serde_json::json!({
                "category": policy.category()
            }),
            serde_json::json!({
                "tax": "0",
                "tax_applied": false
            }),
            format!("No tax applied - {} is not taxed", policy.category().label()),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "income_tax".to_string(),
        rule_name: "Income Tax".to_string(),
        input,
        output,
        reasoning,
    };

    TaxResult { tax, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContractorTerms, FullTimeTerms, ManagerTerms, PartTimeTerms};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn full_time(monthly: &str) -> CompensationPolicy {
        CompensationPolicy::FullTime(FullTimeTerms {
            monthly_salary: dec(monthly),
            overtime_hours: Decimal::ZERO,
            overtime_rate: dec("25"),
        })
    }

    fn part_time(rate: &str, hours: &str) -> CompensationPolicy {
        CompensationPolicy::PartTime(PartTimeTerms {
            hourly_rate: dec(rate),
            hours_worked: dec(hours),
        })
    }

    #[test]
    fn test_salaried_bands() {
        let config = PayrollConfig::default();
        // 48,000 a year
        assert_eq!(tax(&full_time("4000"), &config), Some(dec("400")));
        // 60,000
        assert_eq!(tax(&full_time("5000"), &config), Some(dec("750")));
        // 96,000
        assert_eq!(tax(&full_time("8000"), &config), Some(dec("1200")));
        // 120,000
        assert_eq!(tax(&full_time("10000"), &config), Some(dec("2000")));
    }

    #[test]
    fn test_overtime_does_not_move_the_salaried_band() {
        let policy = CompensationPolicy::FullTime(FullTimeTerms {
            monthly_salary: dec("5000"),
            overtime_hours: dec("100"),
            overtime_rate: dec("50"),
        });
        assert_eq!(tax(&policy, &PayrollConfig::default()), Some(dec("750")));
    }

    #[test]
    fn test_hourly_bands() {
        let config = PayrollConfig::default();
        assert_eq!(tax(&part_time("20", "100"), &config), Some(dec("100")));
        assert_eq!(tax(&part_time("30", "100"), &config), Some(dec("150")));
        assert_eq!(tax(&part_time("40", "100"), &config), Some(dec("400")));
    }

    #[test]
    fn test_manager_taxed_on_embedded_salary() {
        let policy = CompensationPolicy::Manager(ManagerTerms::new(
            FullTimeTerms {
                monthly_salary: dec("7000"),
                overtime_hours: Decimal::ZERO,
                overtime_rate: dec("30"),
            },
            dec("1000"),
        ));
        // 84,000 a year, allowance is not taxed
        assert_eq!(tax(&policy, &PayrollConfig::default()), Some(dec("1050")));
    }

    #[test]
    fn test_contractor_has_no_tax() {
        let policy = CompensationPolicy::Contractor(ContractorTerms {
            contract_amount: dec("30000"),
            contract_duration_months: 6,
        });
        assert_eq!(tax(&policy, &PayrollConfig::default()), None);

        let result = calculate_tax(&policy, &PayrollConfig::default(), 2);
        assert_eq!(result.tax, Decimal::ZERO);
        assert!(
            !result.audit_step.output["tax_applied"]
                .as_bool()
                .unwrap()
        );
        assert!(result.audit_step.reasoning.contains("Contractor"));
    }

    #[test]
    fn test_audit_step_records_rate() {
        let result = calculate_tax(&full_time("5000"), &PayrollConfig::default(), 2);
        assert_eq!(result.tax, dec("750"));
        assert_eq!(result.audit_step.rule_id, "income_tax");
        assert_eq!(result.audit_step.output["rate"].as_str().unwrap(), "0.15");
        assert_eq!(
            result.audit_step.input["banded_on"].as_str().unwrap(),
            "60000"
        );
    }

    #[test]
    fn test_audited_tax_matches_plain_tax() {
        let config = PayrollConfig::default();
        let policies = [
            full_time("4000"),
            full_time("10000"),
            part_time("20", "100"),
            part_time("40", "100"),
        ];
        for policy in &policies {
            assert_eq!(
                Some(calculate_tax(policy, &config, 2).tax),
                tax(policy, &config)
            );
        }
    }
}
