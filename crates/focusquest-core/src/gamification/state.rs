use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::badges::{check_badges, EarnedBadges};
use super::level::{calculate_level, xp_in_current_level, XP_PER_POMODORO};
use super::streak::update_streak;
use super::weekly::{update_weekly_stats, WeeklyStats};

/// Persisted progress: XP, level, streak, weekly buckets and badges.
///
/// Serialized as
/// `{xp, level, streak, lastCompletedDate, earnedBadges, weeklyStats}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamificationState {
    pub xp: u64,
    /// Always `calculate_level(xp)`.
    pub level: u64,
    pub streak: u32,
    pub last_completed_date: Option<NaiveDate>,
    pub earned_badges: EarnedBadges,
    pub weekly_stats: WeeklyStats,
}

impl Default for GamificationState {
    fn default() -> Self {
        Self {
            xp: 0,
            level: calculate_level(0),
            streak: 0,
            last_completed_date: None,
            earned_badges: EarnedBadges::new(),
            weekly_stats: WeeklyStats::new(),
        }
    }
}

impl GamificationState {
    /// Fold one completed work session into the state.
    ///
    /// `total_completed` is the completed-session count after this
    /// completion, and `focus_seconds` the length of the finished session.
    /// Badges are evaluated against the already-updated streak and weekly
    /// buckets.
    pub fn record_completion(
        &self,
        total_completed: u32,
        focus_seconds: u64,
        today: NaiveDate,
    ) -> Self {
        let xp = self.xp.saturating_add(XP_PER_POMODORO);
        let streak = update_streak(self.streak, self.last_completed_date, today);
        let weekly_stats = update_weekly_stats(&self.weekly_stats, focus_seconds, today);
        let earned_badges = check_badges(
            &self.earned_badges,
            total_completed,
            streak.streak,
            &weekly_stats,
            today,
        );

        Self {
            xp,
            level: calculate_level(xp),
            streak: streak.streak,
            last_completed_date: Some(streak.last_completed_date),
            earned_badges,
            weekly_stats,
        }
    }

    pub fn xp_in_current_level(&self) -> u64 {
        xp_in_current_level(self.xp)
    }

    /// Completed sessions across every recorded week.
    pub fn lifetime_completed(&self) -> u64 {
        self.weekly_stats
            .values()
            .fold(0u64, |total, entry| total.saturating_add(entry.completed))
    }

    /// Focus seconds across every recorded week.
    pub fn lifetime_focus_seconds(&self) -> u64 {
        self.weekly_stats
            .values()
            .fold(0u64, |total, entry| total.saturating_add(entry.focus_seconds))
    }
}

/// `YYYY-MM-DD` for a calendar date.
pub fn date_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamification::badges::BadgeId;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn default_state() {
        let state = GamificationState::default();
        assert_eq!(state.xp, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.streak, 0);
        assert!(state.last_completed_date.is_none());
        assert!(state.earned_badges.is_empty());
        assert!(state.weekly_stats.is_empty());
    }

    #[test]
    fn first_completion_updates_everything() {
        let state =
            GamificationState::default().record_completion(1, 1500, date("2024-01-15"));
        assert_eq!(state.xp, 10);
        assert_eq!(state.level, 1);
        assert_eq!(state.streak, 1);
        assert_eq!(state.last_completed_date, Some(date("2024-01-15")));
        assert_eq!(state.weekly_stats["2024-W03"].completed, 1);
        assert_eq!(state.weekly_stats["2024-W03"].focus_seconds, 1500);
        assert!(state.earned_badges.is_earned(BadgeId::First));
    }

    #[test]
    fn level_up_after_ten_sessions() {
        let mut state = GamificationState::default();
        for n in 1..=10 {
            state = state.record_completion(n, 1500, date("2024-01-15"));
        }
        assert_eq!(state.xp, 100);
        assert_eq!(state.level, 2);
        assert_eq!(state.xp_in_current_level(), 0);
        assert_eq!(state.streak, 1);
        assert!(state.earned_badges.is_earned(BadgeId::Ten));
        assert!(state.earned_badges.is_earned(BadgeId::WeekTen));
        assert_eq!(state.lifetime_completed(), 10);
        assert_eq!(state.lifetime_focus_seconds(), 15_000);
    }

    #[test]
    fn streak_badge_uses_updated_streak() {
        let state = GamificationState {
            streak: 2,
            last_completed_date: Some(date("2024-01-14")),
            ..GamificationState::default()
        };
        let state = state.record_completion(1, 1500, date("2024-01-15"));
        assert_eq!(state.streak, 3);
        assert!(state.earned_badges.is_earned(BadgeId::Streak3));
    }

    #[test]
    fn oversized_stored_counters_saturate() {
        let stored = crate::storage::decode_lenient(
            r#"{"weeklyStats": {
                "2024-W02": {"completed": 18446744073709551615, "focusSeconds": 18446744073709551615},
                "2024-W03": {"completed": 1, "focusSeconds": 60}
            }}"#,
        )
        .unwrap();
        assert_eq!(stored.lifetime_completed(), u64::MAX);
        assert_eq!(stored.lifetime_focus_seconds(), u64::MAX);

        let stored = crate::storage::decode_lenient(
            r#"{"weeklyStats": {"2024-W03": {"completed": 18446744073709551615}}}"#,
        )
        .unwrap();
        let state = stored.record_completion(1, 1500, date("2024-01-15"));
        assert_eq!(state.weekly_stats["2024-W03"].completed, u64::MAX);
        assert_eq!(state.weekly_stats["2024-W03"].focus_seconds, 1500);
        assert_eq!(state.xp, 10);
    }

    #[test]
    fn date_string_is_iso() {
        assert_eq!(date_string(date("2024-06-15")), "2024-06-15");
    }

    #[test]
    fn serializes_with_persisted_field_names() {
        let state =
            GamificationState::default().record_completion(1, 1500, date("2024-01-15"));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "xp": 10,
                "level": 1,
                "streak": 1,
                "lastCompletedDate": "2024-01-15",
                "earnedBadges": { "first": true },
                "weeklyStats": { "2024-W03": { "completed": 1, "focusSeconds": 1500 } }
            })
        );
    }
}
