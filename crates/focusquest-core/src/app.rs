//! Combined application state.
//!
//! Glues the timer and the gamification layer together: a tick that
//! completes a work session feeds the completion into
//! [`GamificationState::record_completion`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::gamification::GamificationState;
use crate::timer::{Mode, TimerSettings, TimerState};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub timer: TimerState,
    pub gamification: GamificationState,
}

/// Result of [`AppState::tick`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppTick {
    pub state: AppState,
    pub phase_changed: Option<Mode>,
}

impl AppState {
    /// Fresh timer, seeded with previously persisted progress.
    pub fn seeded(settings: TimerSettings, gamification: Option<GamificationState>) -> Self {
        Self {
            timer: TimerState::new(settings),
            gamification: gamification.unwrap_or_default(),
        }
    }

    pub fn start(&self) -> Self {
        self.with_timer(self.timer.start())
    }

    pub fn stop(&self) -> Self {
        self.with_timer(self.timer.stop())
    }

    pub fn reset(&self) -> Self {
        self.with_timer(self.timer.reset())
    }

    pub fn switch_mode(&self, target: Mode) -> Self {
        self.with_timer(self.timer.switch_mode(target))
    }

    /// Advance the timer one second; a completed work session on `today`
    /// updates the gamification state.
    pub fn tick(&self, today: NaiveDate) -> AppTick {
        let tick = self.timer.tick();
        let gamification = match tick.phase_changed {
            Some(Mode::Break) => self.gamification.record_completion(
                tick.state.completed_count,
                tick.state.settings.work_seconds,
                today,
            ),
            _ => self.gamification.clone(),
        };

        AppTick {
            state: Self {
                timer: tick.state,
                gamification,
            },
            phase_changed: tick.phase_changed,
        }
    }

    fn with_timer(&self, timer: TimerState) -> Self {
        Self {
            timer,
            gamification: self.gamification.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn seeded_keeps_persisted_progress() {
        let persisted = GamificationState {
            xp: 120,
            level: 2,
            streak: 4,
            ..GamificationState::default()
        };
        let app = AppState::seeded(TimerSettings::default(), Some(persisted.clone()));
        assert_eq!(app.gamification, persisted);
        assert_eq!(app.timer, TimerState::default());
    }

    #[test]
    fn work_completion_awards_xp() {
        let app = AppState::seeded(TimerSettings::new(2, 1), None).start();
        let first = app.tick(today());
        assert_eq!(first.phase_changed, None);
        assert_eq!(first.state.gamification.xp, 0);

        let second = first.state.tick(today());
        assert_eq!(second.phase_changed, Some(Mode::Break));
        assert_eq!(second.state.gamification.xp, 10);
        assert_eq!(second.state.gamification.streak, 1);
        assert_eq!(second.state.gamification.weekly_stats["2024-W03"].focus_seconds, 2);
    }

    #[test]
    fn break_completion_leaves_gamification_alone() {
        let app = AppState::seeded(TimerSettings::new(2, 1), None)
            .switch_mode(Mode::Break)
            .start();
        let tick = app.tick(today());
        assert_eq!(tick.phase_changed, Some(Mode::Work));
        assert_eq!(tick.state.gamification, GamificationState::default());
    }

    #[test]
    fn stopped_tick_is_identity() {
        let app = AppState::default();
        let tick = app.tick(today());
        assert_eq!(tick.state, app);
        assert_eq!(tick.phase_changed, None);
    }
}
