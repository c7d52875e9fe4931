//! Plain-text rendering of payslips and payroll reports.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{PayrollReport, Payslip};

/// File name a rendered payslip is saved under.
pub fn payslip_file_name(payslip: &Payslip) -> String {
    format!(
        "payslip_{}_{}_{}.txt",
        payslip.employee_id, payslip.pay_period.month, payslip.pay_period.year
    )
}

/// Renders a payslip as text: identity block, then amounts to two decimals.
pub fn payslip_text(payslip: &Payslip) -> String {
    let b = &payslip.breakdown;
    [
        "========== PAYSLIP ==========".to_string(),
        format!("Employee ID: {}", payslip.employee_id),
        format!("Name: {}", payslip.employee_name),
        format!("Department: {}", payslip.department),
        format!("Position: {}", payslip.position),
        format!("Pay Period: {}", payslip.pay_period),
        format!("Bank Account: {}", payslip.bank_account),
        "-----------------------------".to_string(),
        format!("Gross Salary: ${}", money(b.gross_salary)),
        format!("Bonus: ${}", money(b.bonus)),
        format!("Tax: ${}", money(b.tax)),
        format!("PF Deduction: ${}", money(b.provident_fund_deduction)),
        format!("Other Deductions: ${}", money(Decimal::ZERO)),
        format!("Total Deductions: ${}", money(b.total_deductions())),
        format!("Net Salary: ${}", money(b.net_salary)),
        "=============================".to_string(),
    ]
    .iter()
    .map(|line| format!("{line}\n"))
    .collect()
}

/// Renders a payroll report as text, one line per employee then totals.
pub fn payroll_report_text(report: &PayrollReport) -> String {
    let header = format!("=== PAYROLL REPORT FOR {} ===", report.pay_period);
    let lines = report.lines.iter().map(|line| {
        format!(
            "{}: Salary=${}, Tax=${}, Bonus=${}",
            line.name,
            money(line.salary),
            money(line.tax),
            money(line.bonus)
        )
    });
    let footer = [
        "-----------------------------------".to_string(),
        format!(
            "TOTAL: Salary=${}, Tax=${}, Bonus=${}",
            money(report.totals.salary),
            money(report.totals.tax),
            money(report.totals.bonus)
        ),
        format!("Net Payout: ${}", money(report.totals.net_payout)),
    ];

    std::iter::once(header)
        .chain(lines)
        .chain(footer)
        .map(|line| format!("{line}\n"))
        .collect()
}

/// Formats an amount with two decimal places, rounding half away from zero.
pub fn money(value: Decimal) -> String {
    format!(
        "{:.2}",
        value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}
