//! Payslip assembly.
//!
//! Combines gross salary, tax and bonus into a [`PayslipBreakdown`] and
//! wraps it with identity, period and audit information.

use std::time::Instant;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::PayrollConfig;
use crate::models::{AuditStep, AuditTrace, Employee, PayPeriod, Payslip, PayslipBreakdown};

use super::{calculate_bonus, calculate_gross_salary, calculate_tax};

/// The result of assembling a breakdown, including the breakdown and audit step.
#[derive(Debug, Clone)]
pub struct PayslipBreakdownResult {
    /// The assembled amounts.
    pub breakdown: PayslipBreakdown,
    /// The audit step recording the deductions.
    pub audit_step: AuditStep,
}

/// Assembles the payslip amounts.
///
/// The provident fund is withheld from gross at the configured rate and
/// `net = gross + bonus - tax - provident fund`. The rule is the same for
/// every employment category.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::payslip_breakdown;
/// use payroll_engine::config::PayrollConfig;
/// use rust_decimal::Decimal;
///
/// let breakdown = payslip_breakdown(
///     Decimal::new(5000, 0),
///     Decimal::new(750, 0),
///     Decimal::new(750, 0),
///     &PayrollConfig::default(),
/// );
/// assert_eq!(breakdown.provident_fund_deduction, Decimal::new(600, 0));
/// assert_eq!(breakdown.net_salary, Decimal::new(4400, 0));
/// ```
pub fn payslip_breakdown(
    gross_salary: Decimal,
    tax: Decimal,
    bonus: Decimal,
    config: &PayrollConfig,
) -> PayslipBreakdown {
    let provident_fund_deduction = gross_salary * config.deductions.provident_fund_rate;
    PayslipBreakdown {
        gross_salary,
        bonus,
        tax,
        provident_fund_deduction,
        net_salary: gross_salary + bonus - tax - provident_fund_deduction,
    }
}

/// Assembles the payslip amounts and records the deduction step.
pub fn calculate_payslip_breakdown(
    gross_salary: Decimal,
    tax: Decimal,
    bonus: Decimal,
    config: &PayrollConfig,
    step_number: u32,
) -> PayslipBreakdownResult {
    let breakdown = payslip_breakdown(gross_salary, tax, bonus, config);

    let audit_step = AuditStep {
        step_number,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.to_string(),
            "bonus": bonus.to_string(),
            "tax": tax.to_string(),
            "provident_fund_rate": config.deductions.provident_fund_rate.to_string()
        }),
        output: serde_json::json!({
            "provident_fund_deduction": breakdown.provident_fund_deduction.to_string(),
            "total_deductions": breakdown.total_deductions().to_string(),
            "net_salary": breakdown.net_salary.to_string()
        }),
        reasoning: format!(
            "${} + ${} bonus - ${} tax - ${} provident fund = ${}",
            gross_salary.normalize(),
            bonus.normalize(),
            tax.normalize(),
            breakdown.provident_fund_deduction.normalize(),
            breakdown.net_salary.normalize()
        ),
    };

    PayslipBreakdownResult {
        breakdown,
        audit_step,
    }
}

/// Produces the payslip for `employee` in `pay_period`.
///
/// `as_of` is the reference date for years of service; it is never read
/// from the system clock here.
pub fn compute_payslip(
    employee: &Employee,
    pay_period: PayPeriod,
    as_of: NaiveDate,
    config: &PayrollConfig,
) -> Payslip {
    let start_time = Instant::now();
    let policy = &employee.compensation;
    let years_of_service = employee.years_of_service(as_of);

    let gross = calculate_gross_salary(policy, config, 1);
    let tax = calculate_tax(policy, config, 2);
    let bonus = calculate_bonus(policy, years_of_service, config, 3);
    let net = calculate_payslip_breakdown(gross.gross, tax.tax, bonus.bonus, config, 4);

    let steps = vec![
        gross.audit_step,
        tax.audit_step,
        bonus.audit_step,
        net.audit_step,
    ];
    let duration_us = u64::try_from(start_time.elapsed().as_micros()).unwrap_or(u64::MAX);

    Payslip {
        payslip_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: employee.id(),
        employee_name: employee.profile.name.clone(),
        department: employee.profile.department.clone(),
        position: employee.profile.position.clone(),
        bank_account: employee.profile.bank_account.clone(),
        category: employee.category(),
        pay_period,
        as_of,
        breakdown: net.breakdown,
        audit_trace: AuditTrace { steps, duration_us },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CompensationPolicy, ContractorTerms, EmployeeId, EmployeeProfile, EmploymentCategory,
        FullTimeTerms,
    };
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_test_employee(compensation: CompensationPolicy) -> Employee {
        Employee::new(
            EmployeeId::new(1),
            EmployeeProfile {
                name: "John Doe".to_string(),
                email: "john@company.com".to_string(),
                phone: "123-456-7890".to_string(),
                hire_date: date(2022, 1, 31),
                department: "IT".to_string(),
                position: "Developer".to_string(),
                address: "123 Main St, City".to_string(),
                bank_account: "ACC123456".to_string(),
            },
            compensation,
        )
    }

    #[test]
    fn test_breakdown_for_full_time() {
        let breakdown =
            payslip_breakdown(dec("5000"), dec("750"), dec("750"), &PayrollConfig::default());

        assert_eq!(breakdown.gross_salary, dec("5000"));
        assert_eq!(breakdown.provident_fund_deduction, dec("600"));
        assert_eq!(breakdown.total_deductions(), dec("1350"));
        assert_eq!(breakdown.net_salary, dec("4400"));
    }

    #[test]
    fn test_breakdown_audit_step() {
        let result = calculate_payslip_breakdown(
            dec("2000"),
            dec("100"),
            Decimal::ZERO,
            &PayrollConfig::default(),
            4,
        );

        assert_eq!(result.breakdown.net_salary, dec("1660"));
        assert_eq!(result.audit_step.rule_id, "net_salary");
        assert_eq!(
            result.audit_step.output["provident_fund_deduction"]
                .as_str()
                .unwrap(),
            "240.00"
        );
    }

    #[test]
    fn test_compute_payslip_full_time_three_years() {
        let employee = create_test_employee(CompensationPolicy::FullTime(FullTimeTerms {
            monthly_salary: dec("5000"),
            overtime_hours: Decimal::ZERO,
            overtime_rate: dec("25"),
        }));
        let period = PayPeriod::new(1, 2025).unwrap();

        let payslip = compute_payslip(&employee, period, date(2025, 1, 31), &PayrollConfig::default());

        assert_eq!(payslip.employee_id, EmployeeId::new(1));
        assert_eq!(payslip.category, EmploymentCategory::FullTime);
        assert_eq!(payslip.pay_period, period);
        assert_eq!(payslip.breakdown.gross_salary, dec("5000"));
        assert_eq!(payslip.breakdown.tax, dec("750"));
        assert_eq!(payslip.breakdown.bonus, dec("750"));
        assert_eq!(payslip.breakdown.net_salary, dec("4400"));
        assert_eq!(payslip.engine_version, env!("CARGO_PKG_VERSION"));

        let rule_ids: Vec<&str> = payslip
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec!["gross_salary", "income_tax", "service_bonus", "net_salary"]
        );
        let numbers: Vec<u32> = payslip
            .audit_trace
            .steps
            .iter()
            .map(|s| s.step_number)
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_compute_payslip_contractor() {
        let employee = create_test_employee(CompensationPolicy::Contractor(ContractorTerms {
            contract_amount: dec("30000"),
            contract_duration_months: 6,
        }));
        let payslip = compute_payslip(
            &employee,
            PayPeriod::new(6, 2025).unwrap(),
            date(2025, 6, 30),
            &PayrollConfig::default(),
        );

        assert_eq!(payslip.breakdown.gross_salary, dec("5000"));
        assert_eq!(payslip.breakdown.tax, Decimal::ZERO);
        assert_eq!(payslip.breakdown.bonus, Decimal::ZERO);
        assert_eq!(payslip.breakdown.net_salary, dec("4400"));
    }

    proptest! {
        #[test]
        fn net_salary_identity(
            gross_cents in 0i64..100_000_000,
            tax_cents in 0i64..10_000_000,
            bonus_cents in 0i64..10_000_000,
        ) {
            let gross = Decimal::new(gross_cents, 2);
            let tax = Decimal::new(tax_cents, 2);
            let bonus = Decimal::new(bonus_cents, 2);

            let breakdown = payslip_breakdown(gross, tax, bonus, &PayrollConfig::default());

            prop_assert_eq!(breakdown.provident_fund_deduction, gross * dec("0.12"));
            prop_assert_eq!(
                breakdown.net_salary,
                gross + bonus - tax - gross * dec("0.12")
            );
            prop_assert_eq!(
                breakdown.net_salary,
                breakdown.gross_salary + breakdown.bonus - breakdown.total_deductions()
            );
        }
    }
}
