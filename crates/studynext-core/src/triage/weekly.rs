//! Weekly progress aggregation.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::assignment::Assignment;

/// First day of the calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Sunday,
    Monday,
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        match self {
            WeekStart::Sunday => Weekday::Sun,
            WeekStart::Monday => Weekday::Mon,
        }
    }

    /// First day of the week containing `day`, clamped to `NaiveDate::MIN`.
    pub fn week_of(&self, day: NaiveDate) -> NaiveDate {
        self.checked_week_of(day).unwrap_or(NaiveDate::MIN)
    }

    /// First day of the week containing `day`, or `None` if that falls
    /// before the representable range.
    pub fn checked_week_of(&self, day: NaiveDate) -> Option<NaiveDate> {
        let offset = (day.weekday().num_days_from_monday() + 7
            - self.weekday().num_days_from_monday())
            % 7;
        day.checked_sub_days(Days::new(u64::from(offset)))
    }
}

/// Completed vs. total assignments due this week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total: usize,
    pub completed: usize,
}

impl WeeklySummary {
    /// 0.0 .. 100.0 completion percentage; 0 for an empty week.
    pub fn completion_pct(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }
}

/// Count assignments due in the week containing `today`, completed or not.
///
/// Weeks that run past either end of the calendar are clamped to it.
pub fn weekly_summary(
    assignments: &[Assignment],
    today: NaiveDate,
    week_start: WeekStart,
) -> WeeklySummary {
    let start = week_start.week_of(today);
    let end = start
        .checked_add_days(Days::new(6))
        .unwrap_or(NaiveDate::MAX);
    let (total, completed) = assignments
        .iter()
        .filter(|a| (start..=end).contains(&a.due_day()))
        .fold((0, 0), |(total, done), a| {
            (total + 1, done + usize::from(a.completed))
        });
    WeeklySummary {
        week_start: start,
        week_end: end,
        total,
        completed,
    }
}
