//! Driver that wires the pure core to its collaborators.
//!
//! The driver owns the current [`AppState`], a [`GamificationStore`] and a
//! [`PhaseNotifier`]. Each `tick()` advances the state, persists progress
//! after a completed work session and notifies on every phase change. A
//! failed save is logged and skipped; it never reaches the caller.

use chrono::{NaiveDate, Utc};

use crate::app::AppState;
use crate::events::{Event, PhaseNotice};
use crate::gamification::newly_earned;
use crate::storage::GamificationStore;
use crate::timer::{Mode, TimerSettings};

/// Receives phase-change signals (sound, desktop notification, ...).
pub trait PhaseNotifier {
    fn phase_changed(&mut self, mode: Mode, notice: &PhaseNotice);
}

/// Notifier that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNotifier;

impl PhaseNotifier for SilentNotifier {
    fn phase_changed(&mut self, _mode: Mode, _notice: &PhaseNotice) {}
}

pub struct Driver<S, N> {
    state: AppState,
    store: S,
    notifier: N,
}

impl<S: GamificationStore, N: PhaseNotifier> Driver<S, N> {
    pub fn new(state: AppState, store: S, notifier: N) -> Self {
        Self {
            state,
            store,
            notifier,
        }
    }

    /// Fresh timer seeded with whatever the store holds.
    pub fn load(store: S, notifier: N, settings: TimerSettings) -> Self {
        let gamification = store.load();
        if gamification.is_none() {
            tracing::info!("No stored progress, starting from defaults");
        }
        Self::new(AppState::seeded(settings, gamification), store, notifier)
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn start(&mut self) {
        self.state = self.state.start();
    }

    pub fn stop(&mut self) {
        self.state = self.state.stop();
    }

    pub fn reset(&mut self) {
        self.state = self.state.reset();
    }

    pub fn switch_mode(&mut self, target: Mode) {
        self.state = self.state.switch_mode(target);
    }

    /// Advance one second on calendar day `today`.
    pub fn tick(&mut self, today: NaiveDate) -> Vec<Event> {
        let tick = self.state.tick(today);
        let previous = std::mem::replace(&mut self.state, tick.state);
        let before = &previous.gamification;

        let Some(mode) = tick.phase_changed else {
            return Vec::new();
        };

        let at = Utc::now();
        let mut events = vec![Event::PhaseChanged {
            mode,
            completed_count: self.state.timer.completed_count,
            at,
        }];

        if mode == Mode::Break {
            let after = &self.state.gamification;
            tracing::info!(
                completed = self.state.timer.completed_count,
                xp = after.xp,
                streak = after.streak,
                "Work session completed"
            );
            if after.level > before.level {
                events.push(Event::LevelUp {
                    level: after.level,
                    xp: after.xp,
                    at,
                });
            }
            for badge in newly_earned(&before.earned_badges, &after.earned_badges) {
                events.push(Event::BadgeUnlocked {
                    badge,
                    label: badge.badge().label.to_string(),
                    at,
                });
            }
            if let Err(e) = self.store.save(after) {
                tracing::warn!("Failed to save progress: {}. Skipping this round.", e);
            }
        }

        let notice = PhaseNotice::for_phase(mode, &self.state.timer.settings);
        self.notifier.phase_changed(mode, &notice);
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::gamification::{BadgeId, GamificationState};
    use crate::storage::MemoryStore;

    #[derive(Default)]
    struct RecordingNotifier {
        seen: Vec<(Mode, String)>,
    }

    impl PhaseNotifier for RecordingNotifier {
        fn phase_changed(&mut self, mode: Mode, notice: &PhaseNotice) {
            self.seen.push((mode, notice.title.clone()));
        }
    }

    struct BrokenStore;

    impl GamificationStore for BrokenStore {
        fn load(&self) -> Option<GamificationState> {
            None
        }

        fn save(&self, _state: &GamificationState) -> Result<(), StorageError> {
            Err(StorageError::DataDirUnavailable)
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn completion_saves_and_notifies() {
        crate::logging::init_test();
        let mut driver = Driver::load(
            MemoryStore::new(),
            RecordingNotifier::default(),
            TimerSettings::new(1, 1),
        );
        driver.start();
        let events = driver.tick(today());

        assert!(matches!(
            events[0],
            Event::PhaseChanged {
                mode: Mode::Break,
                completed_count: 1,
                ..
            }
        ));
        assert!(events.iter().any(|e| matches!(
            e,
            Event::BadgeUnlocked {
                badge: BadgeId::First,
                ..
            }
        )));
        assert_eq!(driver.store().load().unwrap().xp, 10);
        assert_eq!(
            driver.notifier().seen,
            vec![(Mode::Break, "休憩時間です".to_string())]
        );
    }

    #[test]
    fn break_completion_notifies_without_saving() {
        let mut driver = Driver::load(
            MemoryStore::new(),
            RecordingNotifier::default(),
            TimerSettings::new(1, 1),
        );
        driver.switch_mode(Mode::Break);
        driver.start();
        let events = driver.tick(today());
        assert_eq!(events.len(), 1);
        assert!(driver.store().raw().is_none());
        assert_eq!(driver.notifier().seen[0].0, Mode::Work);
    }

    #[test]
    fn level_up_event() {
        let seeded = GamificationState {
            xp: 90,
            ..GamificationState::default()
        };
        let store = MemoryStore::new();
        store.save(&seeded).unwrap();
        let mut driver = Driver::load(store, SilentNotifier, TimerSettings::new(1, 1));
        driver.start();
        let events = driver.tick(today());
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::LevelUp { level: 2, xp: 100, .. })));
    }

    #[test]
    fn save_failure_is_absorbed() {
        let mut driver = Driver::load(BrokenStore, SilentNotifier, TimerSettings::new(1, 1));
        driver.start();
        let events = driver.tick(today());
        assert!(!events.is_empty());
        assert_eq!(driver.state().gamification.xp, 10);
    }

    #[test]
    fn stopped_driver_emits_nothing() {
        let mut driver = Driver::load(MemoryStore::new(), SilentNotifier, TimerSettings::default());
        assert!(driver.tick(today()).is_empty());
        assert_eq!(driver.state().timer.remaining_seconds, 1500);
    }
}
