//! The payroll directory.
//!
//! [`PayrollDirectory`] owns every [`Employee`] and is the only place that
//! resolves identifiers. Manager teams hold identifiers, not employees, and
//! the directory keeps them resolvable: adding a manager checks every
//! subordinate exists, and removing an employee drops it from every team.
//!
//! The directory is synchronous and in-memory. Persistence and locking live
//! at the boundary (see [`crate::store`] and [`crate::api`]).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculation::{bonus, compute_payslip, gross_salary, tax};
use crate::config::PayrollConfig;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    Employee, EmployeeId, LeaveRequestId, PayPeriod, PayrollReport, PayrollReportLine,
    PayrollTotals, Payslip, PendingLeave, ProfileUpdate, monthly_hours,
};

/// The authoritative collection of employees, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct PayrollDirectory {
    employees: Vec<Employee>,
    config: PayrollConfig,
}

impl PayrollDirectory {
    /// Creates an empty directory using the given pay rules.
    pub fn new(config: PayrollConfig) -> Self {
        Self {
            employees: Vec::new(),
            config,
        }
    }

    /// Rebuilds a directory from a persisted snapshot.
    ///
    /// Later records repeating an earlier identifier are skipped, as are
    /// records that fail [`Employee::validate`]. Team members that no
    /// longer exist are dropped. All of these are logged.
    pub fn from_snapshot(employees: Vec<Employee>, config: PayrollConfig) -> Self {
        let mut directory = Self::new(config);

        for mut employee in employees {
            let id = employee.id();
            if directory.contains(id) {
                warn!(employee_id = %id, "Skipping duplicate employee in snapshot");
                continue;
            }
            if let Some(terms) = employee.compensation.as_manager_mut() {
                terms.retain_subordinates(|sub| sub != id);
            }
            if let Err(err) = employee.validate() {
                warn!(employee_id = %id, error = %err, "Skipping invalid employee in snapshot");
                continue;
            }
            directory.employees.push(employee);
        }

        let known: Vec<EmployeeId> = directory.employees.iter().map(Employee::id).collect();
        for employee in &mut directory.employees {
            let manager_id = employee.id();
            if let Some(terms) = employee.compensation.as_manager_mut() {
                terms.retain_subordinates(|id| {
                    let keep = id != manager_id && known.contains(&id);
                    if !keep {
                        warn!(
                            manager_id = %manager_id,
                            subordinate_id = %id,
                            "Dropping unresolved subordinate from snapshot"
                        );
                    }
                    keep
                });
            }
        }

        info!(
            employees = directory.employees.len(),
            "Directory restored from snapshot"
        );
        directory
    }

    /// Returns the pay rules in use.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Every employee in insertion order.
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    /// Number of employees.
    pub fn len(&self) -> usize {
        self.employees.len()
    }

    /// Returns true if the directory holds no employees.
    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Returns true if an employee with `id` exists.
    pub fn contains(&self, id: EmployeeId) -> bool {
        self.find(id).is_some()
    }

    /// Adds an employee.
    ///
    /// # Errors
    ///
    /// * `DuplicateIdentifier` if the identifier is taken
    /// * `InvalidEmployee` if the record fails validation
    /// * `EmployeeNotFound` if a manager lists an unknown subordinate
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::directory::PayrollDirectory;
    /// use payroll_engine::models::{
    ///     CompensationPolicy, ContractorTerms, Employee, EmployeeId, EmployeeProfile,
    /// };
    /// use chrono::NaiveDate;
    /// use rust_decimal::Decimal;
    ///
    /// let mut directory = PayrollDirectory::default();
    /// let employee = Employee::new(
    ///     EmployeeId::new(3),
    ///     EmployeeProfile {
    ///         name: "Bob Johnson".to_string(),
    ///         email: "bob@contractor.com".to_string(),
    ///         phone: "555-123-4567".to_string(),
    ///         hire_date: NaiveDate::from_ymd_opt(2022, 6, 1).unwrap(),
    ///         department: "Operations".to_string(),
    ///         position: "Consultant".to_string(),
    ///         address: "789 Pine St, Village".to_string(),
    ///         bank_account: "ACC987654".to_string(),
    ///     },
    ///     CompensationPolicy::Contractor(ContractorTerms {
    ///         contract_amount: Decimal::new(30000, 0),
    ///         contract_duration_months: 6,
    ///     }),
    /// );
    ///
    /// directory.add(employee.clone()).unwrap();
    /// assert!(directory.add(employee).is_err());
    /// assert_eq!(directory.len(), 1);
    /// ```
    pub fn add(&mut self, employee: Employee) -> PayrollResult<()> {
        let id = employee.id();
        if self.contains(id) {
            return Err(PayrollError::DuplicateIdentifier { id });
        }
        employee.validate()?;

        if let Some(terms) = employee.compensation.as_manager() {
            if let Some(missing) = terms.subordinates().iter().find(|s| !self.contains(**s)) {
                return Err(PayrollError::EmployeeNotFound { id: *missing });
            }
        }

        info!(
            employee_id = %id,
            category = employee.category().label(),
            "Employee added"
        );
        self.employees.push(employee);
        Ok(())
    }

    /// Removes an employee and drops it from every manager's team.
    ///
    /// Returns `None` if no employee has `id`.
    pub fn remove(&mut self, id: EmployeeId) -> Option<Employee> {
        let index = self.employees.iter().position(|e| e.id() == id)?;
        let removed = self.employees.remove(index);

        for employee in &mut self.employees {
            let manager_id = employee.id();
            if let Some(terms) = employee.compensation.as_manager_mut() {
                if terms.remove_subordinate(id) {
                    debug!(
                        manager_id = %manager_id,
                        subordinate_id = %id,
                        "Removed employee from team"
                    );
                }
            }
        }

        info!(employee_id = %id, "Employee removed");
        Some(removed)
    }

    /// Looks up an employee.
    pub fn find(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id() == id)
    }

    /// Looks up an employee for modification.
    pub fn find_mut(&mut self, id: EmployeeId) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|e| e.id() == id)
    }

    fn get(&self, id: EmployeeId) -> PayrollResult<&Employee> {
        self.find(id).ok_or(PayrollError::EmployeeNotFound { id })
    }

    fn get_mut(&mut self, id: EmployeeId) -> PayrollResult<&mut Employee> {
        self.find_mut(id).ok_or(PayrollError::EmployeeNotFound { id })
    }

    /// Produces the payslip for one employee.
    pub fn generate_payslip(
        &self,
        id: EmployeeId,
        pay_period: PayPeriod,
        as_of: NaiveDate,
    ) -> PayrollResult<Payslip> {
        let employee = self.get(id)?;
        let payslip = compute_payslip(employee, pay_period, as_of, &self.config);

        info!(
            employee_id = %id,
            pay_period = %pay_period,
            payslip_id = %payslip.payslip_id,
            net_salary = %payslip.breakdown.net_salary,
            "Payslip generated"
        );
        Ok(payslip)
    }

    /// Builds the payroll report for every employee, in directory order.
    pub fn payroll_report(&self, pay_period: PayPeriod, as_of: NaiveDate) -> PayrollReport {
        let lines: Vec<PayrollReportLine> = self
            .employees
            .iter()
            .map(|employee| {
                let policy = &employee.compensation;
                PayrollReportLine {
                    employee_id: employee.id(),
                    name: employee.profile.name.clone(),
                    category: employee.category(),
                    salary: gross_salary(policy, &self.config),
                    tax: tax(policy, &self.config).unwrap_or(Decimal::ZERO),
                    bonus: bonus(policy, employee.years_of_service(as_of), &self.config)
                        .unwrap_or(Decimal::ZERO),
                }
            })
            .collect();

        let mut totals = PayrollTotals::default();
        for line in &lines {
            totals.salary += line.salary;
            totals.tax += line.tax;
            totals.bonus += line.bonus;
        }
        totals.net_payout = totals.salary + totals.bonus - totals.tax;

        debug!(
            pay_period = %pay_period,
            employees = lines.len(),
            total_salary = %totals.salary,
            "Payroll report built"
        );

        PayrollReport {
            pay_period,
            as_of,
            lines,
            totals,
        }
    }

    /// Every pending leave request, in directory then request order.
    pub fn pending_leave_applications(&self) -> Vec<PendingLeave> {
        self.employees
            .iter()
            .flat_map(|employee| {
                employee.leave.pending().map(move |(index, request)| PendingLeave {
                    employee_id: employee.id(),
                    employee_name: employee.profile.name.clone(),
                    position: employee.profile.position.clone(),
                    index,
                    request: request.clone(),
                })
            })
            .collect()
    }

    /// Records attendance for one day.
    ///
    /// Without explicit `hours`, a present day records the configured
    /// default hours and an absent day records zero.
    pub fn mark_attendance(
        &mut self,
        id: EmployeeId,
        date: NaiveDate,
        present: bool,
        hours: Option<Decimal>,
    ) -> PayrollResult<()> {
        let default_hours = self.config.attendance.default_hours_present;
        let employee = self.get_mut(id)?;
        match hours {
            Some(hours) => employee.attendance.mark(date, present, hours),
            None => employee
                .attendance
                .mark_with_default_hours(date, present, default_hours),
        }
        debug!(employee_id = %id, %date, present, "Attendance marked");
        Ok(())
    }

    /// Files a pending leave request.
    pub fn request_leave(
        &mut self,
        id: EmployeeId,
        start: NaiveDate,
        end: NaiveDate,
        reason: impl Into<String>,
    ) -> PayrollResult<LeaveRequestId> {
        let request_id = self.get_mut(id)?.leave.request(start, end, reason)?;
        info!(
            employee_id = %id,
            request_id = %request_id,
            %start,
            %end,
            "Leave requested"
        );
        Ok(request_id)
    }

    /// Approves the request at `index` in the employee's ledger.
    ///
    /// Returns `Ok(false)` when the index is out of range.
    pub fn approve_leave(&mut self, id: EmployeeId, index: usize) -> PayrollResult<bool> {
        let changed = self.get_mut(id)?.leave.approve(index);
        debug!(employee_id = %id, index, changed, "Leave approval by position");
        Ok(changed)
    }

    /// Removes the request at `index` in the employee's ledger.
    ///
    /// Returns `Ok(false)` when the index is out of range.
    pub fn reject_leave(&mut self, id: EmployeeId, index: usize) -> PayrollResult<bool> {
        let changed = self.get_mut(id)?.leave.reject(index);
        debug!(employee_id = %id, index, changed, "Leave rejection by position");
        Ok(changed)
    }

    /// Approves the request with `request_id`.
    pub fn approve_leave_request(
        &mut self,
        id: EmployeeId,
        request_id: LeaveRequestId,
    ) -> PayrollResult<bool> {
        let changed = self.get_mut(id)?.leave.approve_request(request_id);
        if changed {
            info!(employee_id = %id, request_id = %request_id, "Leave approved");
        }
        Ok(changed)
    }

    /// Removes the request with `request_id`.
    pub fn reject_leave_request(
        &mut self,
        id: EmployeeId,
        request_id: LeaveRequestId,
    ) -> PayrollResult<bool> {
        let changed = self.get_mut(id)?.leave.reject_request(request_id);
        if changed {
            info!(employee_id = %id, request_id = %request_id, "Leave rejected");
        }
        Ok(changed)
    }

    /// Remaining leave days under the configured annual allowance.
    pub fn available_leave(&self, id: EmployeeId) -> PayrollResult<i64> {
        Ok(self
            .get(id)?
            .leave
            .available_balance(self.config.leave.annual_allowance))
    }

    /// Adds `subordinate` to `manager`'s team.
    ///
    /// Returns `Ok(false)` if the subordinate was already on the team.
    pub fn assign_subordinate(
        &mut self,
        manager: EmployeeId,
        subordinate: EmployeeId,
    ) -> PayrollResult<bool> {
        if manager == subordinate {
            return Err(PayrollError::InvalidEmployee {
                field: "subordinates".to_string(),
                message: "a manager cannot report to themselves".to_string(),
            });
        }
        self.get(subordinate)?;

        let terms = self
            .get_mut(manager)?
            .compensation
            .as_manager_mut()
            .ok_or(PayrollError::NotAManager { id: manager })?;
        let added = terms.add_subordinate(subordinate);

        if added {
            info!(
                manager_id = %manager,
                subordinate_id = %subordinate,
                "Subordinate assigned"
            );
        }
        Ok(added)
    }

    /// Removes `subordinate` from `manager`'s team.
    ///
    /// Returns `Ok(false)` if the subordinate was not on the team.
    pub fn unassign_subordinate(
        &mut self,
        manager: EmployeeId,
        subordinate: EmployeeId,
    ) -> PayrollResult<bool> {
        let terms = self
            .get_mut(manager)?
            .compensation
            .as_manager_mut()
            .ok_or(PayrollError::NotAManager { id: manager })?;
        let removed = terms.remove_subordinate(subordinate);

        if removed {
            info!(
                manager_id = %manager,
                subordinate_id = %subordinate,
                "Subordinate unassigned"
            );
        }
        Ok(removed)
    }

    /// The employees on `manager`'s team, in identifier order.
    pub fn team_members(&self, manager: EmployeeId) -> PayrollResult<Vec<&Employee>> {
        let terms = self
            .get(manager)?
            .compensation
            .as_manager()
            .ok_or(PayrollError::NotAManager { id: manager })?;

        Ok(terms
            .subordinates()
            .iter()
            .filter_map(|id| self.find(*id))
            .collect())
    }

    /// Applies a profile update and returns the updated employee.
    pub fn update_profile(
        &mut self,
        id: EmployeeId,
        update: ProfileUpdate,
    ) -> PayrollResult<&Employee> {
        let employee = self.get_mut(id)?;
        employee.profile.apply(update);
        debug!(employee_id = %id, "Profile updated");
        Ok(&*employee)
    }

    /// Sets the month's variable hours.
    ///
    /// Overtime for full-time staff and managers, hours worked for
    /// part-time staff. Contractors fail with `CapabilityMissing`.
    pub fn set_variable_hours(&mut self, id: EmployeeId, hours: Decimal) -> PayrollResult<()> {
        monthly_hours("hours", hours)?;

        let employee = self.get_mut(id)?;
        if !employee.compensation.set_variable_hours(hours) {
            return Err(PayrollError::CapabilityMissing {
                id,
                capability: "variable hours".to_string(),
            });
        }
        debug!(employee_id = %id, %hours, "Variable hours set");
        Ok(())
    }
}
