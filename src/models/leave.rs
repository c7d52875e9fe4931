//! Leave ledger and related types.
//!
//! Requests start as [`LeaveStatus::Pending`] and may move to
//! [`LeaveStatus::Approved`]; rejecting a request removes it. Requests can be
//! addressed by position (the order a review pass enumerates them) or by their
//! stable [`LeaveRequestId`], which does not shift when earlier requests are
//! rejected.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PayrollError, PayrollResult};

/// Stable identifier of a leave request within one employee's ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaveRequestId(u32);

impl LeaveRequestId {
    /// Creates an identifier from its raw value.
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for LeaveRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Approval state of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting review.
    Pending,
    /// Approved; counts against the balance.
    Approved,
}

/// A request for leave over an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Stable identifier within the ledger.
    pub id: LeaveRequestId,
    /// First day of leave.
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive).
    pub end_date: NaiveDate,
    /// Free-text reason.
    pub reason: String,
    /// Current approval state.
    pub status: LeaveStatus,
}

impl LeaveRequest {
    /// Number of calendar days covered, counting both ends.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::LeaveLedger;
    /// use chrono::NaiveDate;
    ///
    /// let mut ledger = LeaveLedger::default();
    /// ledger.request(
    ///     NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
    ///     NaiveDate::from_ymd_opt(2025, 1, 12).unwrap(),
    ///     "family visit",
    /// ).unwrap();
    /// assert_eq!(ledger.history()[0].leave_days(), 3);
    /// ```
    pub fn leave_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Returns true once the request has been approved.
    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }
}

/// Per-employee leave requests in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveLedger {
    requests: Vec<LeaveRequest>,
    #[serde(default)]
    next_id: u32,
}

impl LeaveLedger {
    /// Appends a pending request and returns its identifier.
    ///
    /// Fails with `InvalidLeaveRange` when `end` is before `start`.
    pub fn request(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        reason: impl Into<String>,
    ) -> PayrollResult<LeaveRequestId> {
        if end < start {
            return Err(PayrollError::InvalidLeaveRange { start, end });
        }

        let id = self.allocate_id();
        self.requests.push(LeaveRequest {
            id,
            start_date: start,
            end_date: end,
            reason: reason.into(),
            status: LeaveStatus::Pending,
        });
        Ok(id)
    }

    /// Approves the request at `index`.
    ///
    /// An out-of-range index leaves the ledger untouched. Returns whether a
    /// request was found.
    pub fn approve(&mut self, index: usize) -> bool {
        match self.requests.get_mut(index) {
            Some(request) => {
                request.status = LeaveStatus::Approved;
                true
            }
            None => false,
        }
    }

    /// Removes the request at `index`.
    ///
    /// An out-of-range index leaves the ledger untouched. Returns whether a
    /// request was removed.
    pub fn reject(&mut self, index: usize) -> bool {
        if index < self.requests.len() {
            self.requests.remove(index);
            true
        } else {
            false
        }
    }

    /// Approves the request with the given identifier, if present.
    pub fn approve_request(&mut self, id: LeaveRequestId) -> bool {
        match self.position_of(id) {
            Some(index) => self.approve(index),
            None => false,
        }
    }

    /// Removes the request with the given identifier, if present.
    pub fn reject_request(&mut self, id: LeaveRequestId) -> bool {
        match self.position_of(id) {
            Some(index) => self.reject(index),
            None => false,
        }
    }

    /// Remaining leave days: `annual_allowance` minus approved days.
    ///
    /// Over-approval yields a negative balance.
    pub fn available_balance(&self, annual_allowance: i64) -> i64 {
        let used: i64 = self
            .requests
            .iter()
            .filter(|r| r.is_approved())
            .map(LeaveRequest::leave_days)
            .sum();
        annual_allowance - used
    }

    /// Returns a copy of every request in insertion order.
    pub fn history(&self) -> Vec<LeaveRequest> {
        self.requests.clone()
    }

    /// Iterates over pending requests together with their positions.
    pub fn pending(&self) -> impl Iterator<Item = (usize, &LeaveRequest)> {
        self.requests
            .iter()
            .enumerate()
            .filter(|(_, r)| r.status == LeaveStatus::Pending)
    }

    /// Returns the request with the given identifier.
    pub fn get(&self, id: LeaveRequestId) -> Option<&LeaveRequest> {
        self.requests.iter().find(|r| r.id == id)
    }

    /// Number of requests on file.
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    /// Returns true if no requests are on file.
    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    fn position_of(&self, id: LeaveRequestId) -> Option<usize> {
        self.requests.iter().position(|r| r.id == id)
    }

    fn allocate_id(&mut self) -> LeaveRequestId {
        // Snapshots written without a counter still must not reuse ids.
        let floor = self
            .requests
            .iter()
            .map(|r| r.id.get() + 1)
            .max()
            .unwrap_or(0);
        let id = self.next_id.max(floor);
        self.next_id = id + 1;
        LeaveRequestId::new(id)
    }
}
