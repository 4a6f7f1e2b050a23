//! XP, levels and completion streaks.
//!
//! Progress is derived from the assignment list itself rather than kept in
//! a separate ledger: every completed assignment is worth XP by priority,
//! and the streak counts consecutive days with at least one completion.

use std::collections::BTreeSet;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::assignment::{Assignment, Priority};
use crate::error::ConfigError;

/// XP table and level size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardsConfig {
    #[serde(default = "default_xp_high")]
    pub xp_high: u32,
    #[serde(default = "default_xp_medium")]
    pub xp_medium: u32,
    /// Also used for assignments without a priority.
    #[serde(default = "default_xp_low")]
    pub xp_low: u32,
    #[serde(default = "default_xp_per_level")]
    pub xp_per_level: u32,
}

fn default_xp_high() -> u32 {
    30
}
fn default_xp_medium() -> u32 {
    20
}
fn default_xp_low() -> u32 {
    10
}
fn default_xp_per_level() -> u32 {
    100
}

impl Default for RewardsConfig {
    fn default() -> Self {
        Self {
            xp_high: default_xp_high(),
            xp_medium: default_xp_medium(),
            xp_low: default_xp_low(),
            xp_per_level: default_xp_per_level(),
        }
    }
}

impl RewardsConfig {
    pub fn xp_for(&self, priority: Option<Priority>) -> u32 {
        match priority {
            Some(Priority::High) => self.xp_high,
            Some(Priority::Medium) => self.xp_medium,
            Some(Priority::Low) | None => self.xp_low,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.xp_per_level == 0 {
            return Err(ConfigError::InvalidValue {
                key: "rewards.xp_per_level".into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

/// Accumulated progress for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total_xp: u64,
    /// Starts at 1.
    pub level: u32,
    /// XP earned inside the current level.
    pub level_xp: u32,
    pub xp_per_level: u32,
    pub streak_days: u32,
}

impl Progress {
    /// Derive progress from a snapshot, as of `today`.
    pub fn from_assignments(
        assignments: &[Assignment],
        today: NaiveDate,
        config: &RewardsConfig,
    ) -> Self {
        let done: Vec<&Assignment> = assignments.iter().filter(|a| a.completed).collect();
        let total_xp: u64 = done
            .iter()
            .map(|a| u64::from(config.xp_for(a.priority)))
            .sum();
        let days: BTreeSet<NaiveDate> = done
            .iter()
            .filter_map(|a| a.completed_at.map(|t| t.date()))
            .collect();

        let per_level = u64::from(config.xp_per_level.max(1));
        Self {
            completed: done.len(),
            total_xp,
            level: u32::try_from(total_xp / per_level + 1).unwrap_or(u32::MAX),
            level_xp: (total_xp % per_level) as u32,
            xp_per_level: config.xp_per_level.max(1),
            streak_days: streak_ending(&days, today),
        }
    }
}

/// Consecutive completion days ending today.
///
/// A streak that reached yesterday is still alive until today is over.
fn streak_ending(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut cursor = if days.contains(&today) {
        today
    } else {
        match today.checked_sub_days(Days::new(1)) {
            Some(yesterday) if days.contains(&yesterday) => yesterday,
            _ => return 0,
        }
    };
    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        match cursor.checked_sub_days(Days::new(1)) {
            Some(prev) => cursor = prev,
            None => break,
        }
    }
    streak
}

/// What the celebration display shows after a completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Celebration {
    pub assignment_id: String,
    pub xp_gained: u64,
    pub total_xp: u64,
    pub level: u32,
    pub leveled_up: bool,
    pub streak_days: u32,
    pub streak_extended: bool,
}

impl Celebration {
    pub fn between(assignment_id: impl Into<String>, before: &Progress, after: &Progress) -> Self {
        Self {
            assignment_id: assignment_id.into(),
            xp_gained: after.total_xp.saturating_sub(before.total_xp),
            total_xp: after.total_xp,
            level: after.level,
            leveled_up: after.level > before.level,
            streak_days: after.streak_days,
            streak_extended: after.streak_days > before.streak_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::{parse_due_date, AssignmentPatch};

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn done_on(priority: Option<Priority>, when: &str) -> Assignment {
        let mut a = Assignment::new("Physics", "Problem set", parse_due_date("2026-02-01").unwrap())
            .unwrap()
            .with_priority(priority);
        a.apply(&AssignmentPatch::complete(parse_due_date(when).unwrap()));
        a
    }

    #[test]
    fn xp_by_priority() {
        let cfg = RewardsConfig::default();
        assert_eq!(cfg.xp_for(Some(Priority::High)), 30);
        assert_eq!(cfg.xp_for(Some(Priority::Medium)), 20);
        assert_eq!(cfg.xp_for(Some(Priority::Low)), 10);
        assert_eq!(cfg.xp_for(None), 10);
    }

    #[test]
    fn levels_every_hundred_xp() {
        let items: Vec<_> = (0..4)
            .map(|_| done_on(Some(Priority::High), "2026-02-05T10:00"))
            .collect();
        let p = Progress::from_assignments(&items, day("2026-02-05"), &RewardsConfig::default());
        assert_eq!(p.total_xp, 120);
        assert_eq!(p.level, 2);
        assert_eq!(p.level_xp, 20);
    }

    #[test]
    fn open_assignments_earn_nothing() {
        let open = Assignment::new("Physics", "Reading", parse_due_date("2026-02-01").unwrap())
            .unwrap()
            .with_priority(Some(Priority::High));
        let p = Progress::from_assignments(&[open], day("2026-02-05"), &RewardsConfig::default());
        assert_eq!(p.total_xp, 0);
        assert_eq!(p.level, 1);
        assert_eq!(p.streak_days, 0);
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let items = vec![
            done_on(None, "2026-02-02T10:00"),
            done_on(None, "2026-02-03T10:00"),
            done_on(None, "2026-02-04T10:00"),
            done_on(None, "2026-02-04T21:00"),
            done_on(None, "2026-02-05T08:00"),
        ];
        let p = Progress::from_assignments(&items, day("2026-02-05"), &RewardsConfig::default());
        assert_eq!(p.streak_days, 4);
    }

    #[test]
    fn streak_survives_until_end_of_today() {
        let items = vec![
            done_on(None, "2026-02-03T10:00"),
            done_on(None, "2026-02-04T10:00"),
        ];
        let cfg = RewardsConfig::default();
        assert_eq!(
            Progress::from_assignments(&items, day("2026-02-05"), &cfg).streak_days,
            2
        );
        assert_eq!(
            Progress::from_assignments(&items, day("2026-02-06"), &cfg).streak_days,
            0
        );
    }

    #[test]
    fn celebration_reports_level_up() {
        let cfg = RewardsConfig::default();
        let mut items: Vec<_> = (0..3)
            .map(|_| done_on(Some(Priority::High), "2026-02-04T10:00"))
            .collect();
        let before = Progress::from_assignments(&items, day("2026-02-05"), &cfg);
        items.push(done_on(Some(Priority::Medium), "2026-02-05T19:00"));
        let after = Progress::from_assignments(&items, day("2026-02-05"), &cfg);

        let c = Celebration::between("hw-4", &before, &after);
        assert_eq!(c.xp_gained, 20);
        assert_eq!(c.total_xp, 110);
        assert!(c.leveled_up);
        assert_eq!(c.level, 2);
        assert_eq!(c.streak_days, 2);
        assert!(c.streak_extended);
    }

    #[test]
    fn zero_level_size_is_invalid() {
        let cfg = RewardsConfig {
            xp_per_level: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
