//! Gamification reducers.
//!
//! Every function here is pure and takes "today" explicitly, so the whole
//! layer is independent of the wall clock and the local timezone. The
//! reducers run only when a work session completes.

mod badges;
mod level;
mod state;
mod streak;
mod weekly;

pub use badges::{check_badges, newly_earned, Badge, BadgeId, EarnedBadges, BADGES};
pub use level::{calculate_level, xp_in_current_level, XP_PER_LEVEL, XP_PER_POMODORO};
pub use state::{date_string, GamificationState};
pub use streak::{update_streak, StreakUpdate};
pub use weekly::{completed_in_week, update_weekly_stats, week_key, WeeklyEntry, WeeklyStats};
