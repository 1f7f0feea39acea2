//! Daily completion streaks.
//!
//! A streak counts consecutive calendar days with at least one completed
//! work session. Only the calendar date matters; time of day is ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakUpdate {
    pub streak: u32,
    pub last_completed_date: NaiveDate,
}

/// Fold a completion on `today` into the current streak.
///
/// - first completion ever: streak becomes 1
/// - same day again: unchanged
/// - exactly one day later: streak grows by 1
/// - any other gap, including dates in the past: streak restarts at 1
pub fn update_streak(
    streak: u32,
    last_completed_date: Option<NaiveDate>,
    today: NaiveDate,
) -> StreakUpdate {
    let restart = StreakUpdate {
        streak: 1,
        last_completed_date: today,
    };
    let Some(last) = last_completed_date else {
        return restart;
    };
    if last == today {
        return StreakUpdate {
            streak,
            last_completed_date: last,
        };
    }
    match (today - last).num_days() {
        1 => StreakUpdate {
            streak: streak.saturating_add(1),
            last_completed_date: today,
        },
        _ => restart,
    }
}
