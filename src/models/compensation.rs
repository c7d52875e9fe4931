//! Compensation policies per employment category.
//!
//! A [`CompensationPolicy`] is a closed set of variants. Which optional
//! capabilities a variant carries (tax, service bonus) is answered by
//! [`CompensationPolicy::tax_capability`] and
//! [`CompensationPolicy::bonus_capability`], so a missing capability is a
//! `None` rather than a runtime type test.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::EmployeeId;

/// Employment category tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentCategory {
    /// Salaried employee.
    FullTime,
    /// Hourly employee.
    PartTime,
    /// Fixed-contract worker.
    Contractor,
    /// Salaried employee leading a team.
    Manager,
}

impl EmploymentCategory {
    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            EmploymentCategory::FullTime => "Full-Time",
            EmploymentCategory::PartTime => "Part-Time",
            EmploymentCategory::Contractor => "Contractor",
            EmploymentCategory::Manager => "Manager",
        }
    }
}

/// Terms of a salaried employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullTimeTerms {
    /// Fixed monthly salary.
    pub monthly_salary: Decimal,
    /// Overtime hours in the current month.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Pay per overtime hour.
    pub overtime_rate: Decimal,
}

/// Terms of an hourly employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartTimeTerms {
    /// Pay per hour.
    pub hourly_rate: Decimal,
    /// Hours worked in the current month.
    #[serde(default)]
    pub hours_worked: Decimal,
}

/// Terms of a contractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractorTerms {
    /// Total value of the contract.
    pub contract_amount: Decimal,
    /// Contract length; the amount is spread evenly over these months.
    pub contract_duration_months: u32,
}

/// Terms of a manager: full-time terms plus an allowance and a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerTerms {
    /// The salaried terms the manager is paid under.
    pub full_time: FullTimeTerms,
    /// Fixed monthly allowance.
    pub allowance: Decimal,
    /// Identifiers of direct reports; resolved through the directory.
    #[serde(default)]
    subordinates: BTreeSet<EmployeeId>,
}

impl ManagerTerms {
    /// Creates manager terms with no subordinates.
    pub fn new(full_time: FullTimeTerms, allowance: Decimal) -> Self {
        Self {
            full_time,
            allowance,
            subordinates: BTreeSet::new(),
        }
    }

    /// Direct reports in ascending identifier order.
    pub fn subordinates(&self) -> &BTreeSet<EmployeeId> {
        &self.subordinates
    }

    /// Number of direct reports.
    pub fn team_size(&self) -> usize {
        self.subordinates.len()
    }

    // Only the directory may edit the team, so every id stays resolvable.
    pub(crate) fn add_subordinate(&mut self, id: EmployeeId) -> bool {
        self.subordinates.insert(id)
    }

    pub(crate) fn remove_subordinate(&mut self, id: EmployeeId) -> bool {
        self.subordinates.remove(&id)
    }

    pub(crate) fn retain_subordinates(&mut self, mut keep: impl FnMut(EmployeeId) -> bool) {
        self.subordinates.retain(|id| keep(*id));
    }
}

/// How an employee is paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum CompensationPolicy {
    /// Salaried.
    FullTime(FullTimeTerms),
    /// Hourly.
    PartTime(PartTimeTerms),
    /// Fixed contract.
    Contractor(ContractorTerms),
    /// Salaried with team allowance.
    Manager(ManagerTerms),
}

/// Basis on which tax is assessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxCapability<'a> {
    /// Bands on annualized monthly salary; the rate applies to the monthly salary.
    Salaried(&'a FullTimeTerms),
    /// Bands on monthly gross; the rate applies to the monthly gross.
    Hourly(&'a PartTimeTerms),
}

/// Basis on which a service bonus is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusCapability<'a> {
    /// Service bonus on the monthly salary.
    Service(&'a FullTimeTerms),
    /// Service bonus scaled by the manager multiplier.
    ManagerService(&'a FullTimeTerms),
}

impl CompensationPolicy {
    /// Returns the category tag of this policy.
    pub fn category(&self) -> EmploymentCategory {
        match self {
            CompensationPolicy::FullTime(_) => EmploymentCategory::FullTime,
            CompensationPolicy::PartTime(_) => EmploymentCategory::PartTime,
            CompensationPolicy::Contractor(_) => EmploymentCategory::Contractor,
            CompensationPolicy::Manager(_) => EmploymentCategory::Manager,
        }
    }

    /// Returns the tax basis, or `None` for categories that are not taxed.
    pub fn tax_capability(&self) -> Option<TaxCapability<'_>> {
        match self {
            CompensationPolicy::FullTime(terms) => Some(TaxCapability::Salaried(terms)),
            CompensationPolicy::Manager(terms) => Some(TaxCapability::Salaried(&terms.full_time)),
            CompensationPolicy::PartTime(terms) => Some(TaxCapability::Hourly(terms)),
            CompensationPolicy::Contractor(_) => None,
        }
    }

    /// Returns the bonus basis, or `None` for categories without a bonus.
    pub fn bonus_capability(&self) -> Option<BonusCapability<'_>> {
        match self {
            CompensationPolicy::FullTime(terms) => Some(BonusCapability::Service(terms)),
            CompensationPolicy::Manager(terms) => {
                Some(BonusCapability::ManagerService(&terms.full_time))
            }
            CompensationPolicy::PartTime(_) | CompensationPolicy::Contractor(_) => None,
        }
    }

    /// Returns the manager terms if this is a manager.
    pub fn as_manager(&self) -> Option<&ManagerTerms> {
        match self {
            CompensationPolicy::Manager(terms) => Some(terms),
            _ => None,
        }
    }

    pub(crate) fn as_manager_mut(&mut self) -> Option<&mut ManagerTerms> {
        match self {
            CompensationPolicy::Manager(terms) => Some(terms),
            _ => None,
        }
    }

    /// Sets the month's variable hours: overtime for salaried staff, hours
    /// worked for hourly staff.
    ///
    /// Returns false for contractors, whose pay has no hourly component.
    pub fn set_variable_hours(&mut self, hours: Decimal) -> bool {
        match self {
            CompensationPolicy::FullTime(terms) => {
                terms.overtime_hours = hours;
                true
            }
            CompensationPolicy::Manager(terms) => {
                terms.full_time.overtime_hours = hours;
                true
            }
            CompensationPolicy::PartTime(terms) => {
                terms.hours_worked = hours;
                true
            }
            CompensationPolicy::Contractor(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_time() -> FullTimeTerms {
        FullTimeTerms {
            monthly_salary: Decimal::new(5000, 0),
            overtime_hours: Decimal::ZERO,
            overtime_rate: Decimal::new(25, 0),
        }
    }

    #[test]
    fn test_contractor_has_no_capabilities() {
        let policy = CompensationPolicy::Contractor(ContractorTerms {
            contract_amount: Decimal::new(30000, 0),
            contract_duration_months: 6,
        });
        assert!(policy.tax_capability().is_none());
        assert!(policy.bonus_capability().is_none());
    }

    #[test]
    fn test_part_time_is_taxable_but_not_bonus_eligible() {
        let policy = CompensationPolicy::PartTime(PartTimeTerms {
            hourly_rate: Decimal::new(20, 0),
            hours_worked: Decimal::new(100, 0),
        });
        assert!(matches!(
            policy.tax_capability(),
            Some(TaxCapability::Hourly(_))
        ));
        assert!(policy.bonus_capability().is_none());
    }

    #[test]
    fn test_manager_exposes_embedded_full_time_terms() {
        let policy =
            CompensationPolicy::Manager(ManagerTerms::new(full_time(), Decimal::new(1000, 0)));

        match policy.tax_capability() {
            Some(TaxCapability::Salaried(terms)) => assert_eq!(terms, &full_time()),
            other => panic!("Expected salaried tax basis, got {:?}", other),
        }
        assert!(matches!(
            policy.bonus_capability(),
            Some(BonusCapability::ManagerService(_))
        ));
    }

    #[test]
    fn test_set_variable_hours_per_category() {
        let mut ft = CompensationPolicy::FullTime(full_time());
        assert!(ft.set_variable_hours(Decimal::new(10, 0)));
        match &ft {
            CompensationPolicy::FullTime(terms) => {
                assert_eq!(terms.overtime_hours, Decimal::new(10, 0))
            }
            _ => unreachable!(),
        }

        let mut contractor = CompensationPolicy::Contractor(ContractorTerms {
            contract_amount: Decimal::new(1000, 0),
            contract_duration_months: 1,
        });
        assert!(!contractor.set_variable_hours(Decimal::new(10, 0)));
    }

    #[test]
    fn test_subordinates_are_a_set() {
        let mut terms = ManagerTerms::new(full_time(), Decimal::ZERO);
        assert!(terms.add_subordinate(EmployeeId::new(2)));
        assert!(!terms.add_subordinate(EmployeeId::new(2)));
        terms.add_subordinate(EmployeeId::new(1));

        let ids: Vec<EmployeeId> = terms.subordinates().iter().copied().collect();
        assert_eq!(ids, vec![EmployeeId::new(1), EmployeeId::new(2)]);
        assert!(terms.remove_subordinate(EmployeeId::new(1)));
        assert_eq!(terms.team_size(), 1);
    }

    #[test]
    fn test_policy_serialization_is_tagged() {
        let policy = CompensationPolicy::FullTime(full_time());
        let json = serde_json::to_value(&policy).unwrap();
        assert_eq!(json["category"], "full_time");
        assert_eq!(json["monthly_salary"], "5000");
    }

    #[test]
    fn test_deserialize_manager_policy() {
        let json = r#"{
            "category": "manager",
            "full_time": {
                "monthly_salary": "7000",
                "overtime_rate": "30"
            },
            "allowance": "1000",
            "subordinates": [1, 2]
        }"#;
        let policy: CompensationPolicy = serde_json::from_str(json).unwrap();
        let terms = policy.as_manager().unwrap();
        assert_eq!(terms.team_size(), 2);
        assert_eq!(terms.full_time.overtime_hours, Decimal::ZERO);
        assert_eq!(policy.category(), EmploymentCategory::Manager);
    }
}
