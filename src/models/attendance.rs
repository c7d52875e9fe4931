//! Attendance ledger and related types.
//!
//! An [`AttendanceLedger`] keeps at most one [`AttendanceRecord`] per date;
//! marking a date again replaces the earlier record.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Presence and hours for one employee on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// The date the record applies to.
    pub date: NaiveDate,
    /// Whether the employee was present.
    pub present: bool,
    /// Hours worked on the date, stored exactly as marked.
    pub hours_worked: Decimal,
}

/// Per-employee attendance keyed by date.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AttendanceLedger;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let mut ledger = AttendanceLedger::default();
/// let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
/// ledger.mark(day, true, Decimal::new(8, 0));
/// ledger.mark(day, false, Decimal::ZERO);
///
/// assert_eq!(ledger.present_days(), 0);
/// assert_eq!(ledger.absent_days(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<AttendanceRecord>", into = "Vec<AttendanceRecord>")]
pub struct AttendanceLedger {
    records: BTreeMap<NaiveDate, AttendanceRecord>,
}

impl AttendanceLedger {
    /// Inserts or replaces the record for `date`.
    ///
    /// `hours` is not range-checked here; the boundary validates it.
    pub fn mark(&mut self, date: NaiveDate, present: bool, hours: Decimal) {
        self.records.insert(
            date,
            AttendanceRecord {
                date,
                present,
                hours_worked: hours,
            },
        );
    }

    /// Marks `date` using `default_hours` when present and zero when absent.
    pub fn mark_with_default_hours(
        &mut self,
        date: NaiveDate,
        present: bool,
        default_hours: Decimal,
    ) {
        let hours = if present { default_hours } else { Decimal::ZERO };
        self.mark(date, present, hours);
    }

    /// Number of days marked present.
    pub fn present_days(&self) -> usize {
        self.records.values().filter(|r| r.present).count()
    }

    /// Number of days marked absent.
    pub fn absent_days(&self) -> usize {
        self.records.values().filter(|r| !r.present).count()
    }

    /// Total hours of present days in the given month.
    pub fn hours_in_month(&self, month: u32, year: i32) -> Decimal {
        self.records
            .values()
            .filter(|r| r.present && r.date.month() == month && r.date.year() == year)
            .map(|r| r.hours_worked)
            .sum()
    }

    /// Returns the record for `date`, if marked.
    pub fn get(&self, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.records.get(&date)
    }

    /// Returns a copy of all records ordered by date.
    pub fn records(&self) -> Vec<AttendanceRecord> {
        self.records.values().cloned().collect()
    }

    /// Number of distinct dates marked.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if nothing has been marked.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<AttendanceRecord>> for AttendanceLedger {
    // Later entries win, matching repeated `mark` calls.
    fn from(records: Vec<AttendanceRecord>) -> Self {
        let mut ledger = Self::default();
        for record in records {
            ledger.mark(record.date, record.present, record.hours_worked);
        }
        ledger
    }
}

impl From<AttendanceLedger> for Vec<AttendanceRecord> {
    fn from(ledger: AttendanceLedger) -> Self {
        ledger.records.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_mark_same_date_replaces_record() {
        let mut ledger = AttendanceLedger::default();
        ledger.mark(date(2025, 1, 6), true, Decimal::new(8, 0));
        ledger.mark(date(2025, 1, 6), true, Decimal::new(5, 0));

        assert_eq!(ledger.len(), 1);
        assert_eq!(
            ledger.get(date(2025, 1, 6)).unwrap().hours_worked,
            Decimal::new(5, 0)
        );
    }

    #[test]
    fn test_present_and_absent_counts() {
        let mut ledger = AttendanceLedger::default();
        ledger.mark(date(2025, 1, 6), true, Decimal::new(8, 0));
        ledger.mark(date(2025, 1, 7), false, Decimal::ZERO);
        ledger.mark(date(2025, 1, 8), true, Decimal::new(6, 0));

        assert_eq!(ledger.present_days(), 2);
        assert_eq!(ledger.absent_days(), 1);
    }

    #[test]
    fn test_hours_in_month_ignores_absent_and_other_months() {
        let mut ledger = AttendanceLedger::default();
        ledger.mark(date(2025, 1, 6), true, Decimal::new(8, 0));
        ledger.mark(date(2025, 1, 7), true, Decimal::new(75, 1));
        // Absent days keep their hours but do not count.
        ledger.mark(date(2025, 1, 8), false, Decimal::new(4, 0));
        ledger.mark(date(2025, 2, 3), true, Decimal::new(8, 0));
        ledger.mark(date(2024, 1, 6), true, Decimal::new(8, 0));

        assert_eq!(ledger.hours_in_month(1, 2025), Decimal::new(155, 1));
    }

    #[test]
    fn test_hours_in_month_empty_is_zero() {
        let ledger = AttendanceLedger::default();
        assert_eq!(ledger.hours_in_month(5, 2025), Decimal::ZERO);
    }

    #[test]
    fn test_mark_with_default_hours() {
        let mut ledger = AttendanceLedger::default();
        ledger.mark_with_default_hours(date(2025, 1, 6), true, Decimal::new(8, 0));
        ledger.mark_with_default_hours(date(2025, 1, 7), false, Decimal::new(8, 0));

        assert_eq!(
            ledger.get(date(2025, 1, 6)).unwrap().hours_worked,
            Decimal::new(8, 0)
        );
        assert_eq!(
            ledger.get(date(2025, 1, 7)).unwrap().hours_worked,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_serializes_as_date_ordered_list() {
        let mut ledger = AttendanceLedger::default();
        ledger.mark(date(2025, 1, 8), true, Decimal::new(8, 0));
        ledger.mark(date(2025, 1, 6), false, Decimal::ZERO);

        let json = serde_json::to_value(&ledger).unwrap();
        let list = json.as_array().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["date"], "2025-01-06");
        assert_eq!(list[1]["date"], "2025-01-08");
    }

    #[test]
    fn test_deserializing_duplicate_dates_keeps_last() {
        let json = r#"[
            {"date": "2025-01-06", "present": true, "hours_worked": "8"},
            {"date": "2025-01-06", "present": false, "hours_worked": "0"}
        ]"#;
        let ledger: AttendanceLedger = serde_json::from_str(json).unwrap();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.absent_days(), 1);
    }

    proptest! {
        #[test]
        fn prop_counts_equal_distinct_dates(
            marks in prop::collection::vec((0u32..60, any::<bool>(), 0u32..24), 0..80)
        ) {
            let base = date(2025, 1, 1);
            let mut ledger = AttendanceLedger::default();
            let mut distinct = BTreeSet::new();
            for (offset, present, hours) in &marks {
                let day = base + chrono::Duration::days(i64::from(*offset));
                ledger.mark(day, *present, Decimal::from(*hours));
                distinct.insert(day);
            }
            prop_assert_eq!(ledger.present_days() + ledger.absent_days(), distinct.len());
        }
    }
}
