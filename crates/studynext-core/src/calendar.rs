//! Month grid for the calendar view.
//!
//! The grid always covers whole weeks, so the first row may start in the
//! previous month and the last row may end in the next one.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;

use crate::assignment::Assignment;
use crate::error::ValidationError;
use crate::triage::WeekStart;

/// One day in the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub is_today: bool,
    /// Ids of assignments due this day, in source order.
    pub assignment_ids: Vec<String>,
    /// How many of those are still open.
    pub open: usize,
}

/// Whole-week grid for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub week_start: WeekStart,
    pub weeks: Vec<[DayCell; 7]>,
}

impl MonthGrid {
    /// Build the grid for `year`-`month`.
    ///
    /// # Errors
    /// Returns an error if the month is out of range, or if its grid would
    /// run past the representable calendar.
    pub fn build(
        year: i32,
        month: u32,
        week_start: WeekStart,
        today: NaiveDate,
        assignments: &[Assignment],
    ) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidValue {
            field: "month".into(),
            message: format!("{year}-{month:02} is not a calendar month"),
        };
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let last = first
            .checked_add_months(Months::new(1))
            .and_then(|d| d.pred_opt())
            .ok_or_else(invalid)?;

        let mut cursor = week_start.checked_week_of(first).ok_or_else(invalid)?;
        let mut weeks = Vec::new();
        while cursor <= last {
            let mut dates = [cursor; 7];
            for (i, date) in dates.iter_mut().enumerate() {
                *date = cursor
                    .checked_add_days(Days::new(i as u64))
                    .ok_or_else(invalid)?;
            }
            weeks.push(dates.map(|date| Self::cell(date, first, today, assignments)));
            match cursor.checked_add_days(Days::new(7)) {
                Some(next) => cursor = next,
                None => break,
            }
        }

        Ok(Self {
            year,
            month,
            week_start,
            weeks,
        })
    }

    fn cell(date: NaiveDate, first: NaiveDate, today: NaiveDate, assignments: &[Assignment]) -> DayCell {
        let due: Vec<&Assignment> = assignments.iter().filter(|a| a.due_day() == date).collect();
        DayCell {
            date,
            in_month: date.year() == first.year() && date.month() == first.month(),
            is_today: date == today,
            assignment_ids: due.iter().map(|a| a.id.clone()).collect(),
            open: due.iter().filter(|a| !a.completed).count(),
        }
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayCell> {
        self.weeks.iter().flatten().find(|c| c.date == date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::parse_due_date;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn february_2026_sunday_start() {
        // Feb 1 2026 is a Sunday and the month has 28 days: exactly 4 rows.
        let grid = MonthGrid::build(2026, 2, WeekStart::Sunday, day("2026-02-05"), &[]).unwrap();
        assert_eq!(grid.weeks.len(), 4);
        assert_eq!(grid.weeks[0][0].date, day("2026-02-01"));
        assert_eq!(grid.weeks[3][6].date, day("2026-02-28"));
        assert!(grid.weeks.iter().flatten().all(|c| c.in_month));
    }

    #[test]
    fn february_2026_monday_start_pads_both_ends() {
        let grid = MonthGrid::build(2026, 2, WeekStart::Monday, day("2026-02-05"), &[]).unwrap();
        assert_eq!(grid.weeks.len(), 5);
        assert_eq!(grid.weeks[0][0].date, day("2026-01-26"));
        assert!(!grid.weeks[0][0].in_month);
        assert_eq!(grid.weeks[4][6].date, day("2026-03-01"));
        assert!(!grid.weeks[4][6].in_month);
    }

    #[test]
    fn cells_carry_assignments_and_today() {
        let mut done = Assignment::new("Art", "Sketch", parse_due_date("2026-02-10T09:00").unwrap()).unwrap();
        done.completed = true;
        let open = Assignment::new("Art", "Paint", parse_due_date("2026-02-10T17:00").unwrap()).unwrap();
        let items = vec![done.clone(), open.clone()];

        let grid = MonthGrid::build(2026, 2, WeekStart::Sunday, day("2026-02-10"), &items).unwrap();
        let cell = grid.day(day("2026-02-10")).unwrap();
        assert!(cell.is_today);
        assert_eq!(cell.assignment_ids, vec![done.id, open.id]);
        assert_eq!(cell.open, 1);
        assert!(grid.day(day("2026-02-11")).unwrap().assignment_ids.is_empty());
    }

    #[test]
    fn months_at_the_calendar_limits_are_rejected() {
        let max = NaiveDate::MAX;
        let min = NaiveDate::MIN;
        assert!(MonthGrid::build(max.year(), max.month(), WeekStart::Sunday, max, &[]).is_err());
        // The first month either fits from its first day or is rejected.
        for week_start in [WeekStart::Sunday, WeekStart::Monday] {
            if let Ok(grid) = MonthGrid::build(min.year(), min.month(), week_start, min, &[]) {
                assert_eq!(grid.weeks[0][0].date, min);
            }
        }
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(MonthGrid::build(2026, 13, WeekStart::Sunday, day("2026-02-05"), &[]).is_err());
        assert!(MonthGrid::build(2026, 0, WeekStart::Sunday, day("2026-02-05"), &[]).is_err());
    }
}
