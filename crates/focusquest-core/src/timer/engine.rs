//! Timer state machine.
//!
//! The timer is a tick-driven value type. It does not use internal threads or
//! read the wall clock - the caller is responsible for calling `tick()` once
//! per elapsed second while the timer is running.
//!
//! ## State Transitions
//!
//! ```text
//! (Work, stopped) -start-> (Work, running) -tick to 0-> (Break, running)
//!        ^                                                    |
//!        +---------------------- tick to 0 -------------------+
//! ```
//!
//! Every command takes `&self` and returns a new snapshot, so a caller can
//! keep the previous value around and compare.
//!
//! ## Usage
//!
//! ```
//! use focusquest_core::timer::{Mode, TimerSettings, TimerState};
//!
//! let timer = TimerState::new(TimerSettings::default()).start();
//! let tick = timer.tick();
//! assert_eq!(tick.state.remaining_seconds, 1499);
//! assert_eq!(tick.phase_changed, None);
//! assert_eq!(tick.state.mode, Mode::Work);
//! ```

use serde::{Deserialize, Serialize};

/// Default work phase length (25 minutes).
pub const WORK_SECONDS: u64 = 25 * 60;
/// Default break phase length (5 minutes).
pub const BREAK_SECONDS: u64 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Work,
    Break,
}

impl Mode {
    /// Status label shown while the phase is active.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Work => "作業中",
            Mode::Break => "休憩中",
        }
    }

    /// The phase that follows this one.
    pub fn next(self) -> Self {
        match self {
            Mode::Work => Mode::Break,
            Mode::Break => Mode::Work,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Work => "work",
            Mode::Break => "break",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(Mode::Work),
            "break" => Ok(Mode::Break),
            other => Err(format!("unknown mode '{other}' (expected 'work' or 'break')")),
        }
    }
}

/// Phase durations in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSettings {
    pub work_seconds: u64,
    pub break_seconds: u64,
}

impl TimerSettings {
    pub fn new(work_seconds: u64, break_seconds: u64) -> Self {
        Self {
            work_seconds,
            break_seconds,
        }
    }

    pub fn duration(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Work => self.work_seconds,
            Mode::Break => self.break_seconds,
        }
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self::new(WORK_SECONDS, BREAK_SECONDS)
    }
}

/// Snapshot of the timer.
///
/// `remaining_seconds` always lies in `[0, settings.duration(mode)]`, and a
/// countdown that reaches zero is replaced by the next phase within the same
/// `tick()` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerState {
    pub mode: Mode,
    pub remaining_seconds: u64,
    pub running: bool,
    pub completed_count: u32,
    pub cycle_count: u32,
    pub total_focused_seconds: u64,
    pub total_break_seconds: u64,
    #[serde(default)]
    pub settings: TimerSettings,
}

/// Result of a single `tick()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub state: TimerState,
    /// The phase the timer switched into, if any.
    ///
    /// `Some(Mode::Break)` means a work session was just completed.
    pub phase_changed: Option<Mode>,
}

impl TimerState {
    /// Create a stopped timer at the start of a work phase.
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            mode: Mode::Work,
            remaining_seconds: settings.work_seconds,
            running: false,
            completed_count: 0,
            cycle_count: 0,
            total_focused_seconds: 0,
            total_break_seconds: 0,
            settings,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Full length of the current phase.
    pub fn phase_duration(&self) -> u64 {
        self.settings.duration(self.mode)
    }

    /// Fraction of the current phase still left, 0.0 ..= 1.0.
    pub fn remaining_ratio(&self) -> f64 {
        let total = self.phase_duration();
        if total == 0 {
            return 0.0;
        }
        (self.remaining_seconds as f64 / total as f64).clamp(0.0, 1.0)
    }

    pub fn status_text(&self) -> String {
        if self.running {
            self.mode.label().to_string()
        } else {
            format!("{}（停止中）", self.mode.label())
        }
    }

    /// Apply new phase durations, clamping the countdown into the new range.
    pub fn with_settings(&self, settings: TimerSettings) -> Self {
        let remaining_seconds = self.remaining_seconds.min(settings.duration(self.mode));
        Self {
            settings,
            remaining_seconds,
            ..*self
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&self) -> Self {
        if self.running {
            return *self;
        }
        Self {
            running: true,
            ..*self
        }
    }

    pub fn stop(&self) -> Self {
        if !self.running {
            return *self;
        }
        Self {
            running: false,
            ..*self
        }
    }

    /// Stop and rewind the current phase. Counters are left alone.
    pub fn reset(&self) -> Self {
        Self {
            running: false,
            remaining_seconds: self.phase_duration(),
            ..*self
        }
    }

    /// Jump to `target`, discarding any countdown in progress.
    pub fn switch_mode(&self, target: Mode) -> Self {
        Self {
            mode: target,
            running: false,
            remaining_seconds: self.settings.duration(target),
            ..*self
        }
    }

    /// Advance by one second.
    ///
    /// A stopped timer is returned unchanged. At most one phase transition
    /// happens per call.
    pub fn tick(&self) -> Tick {
        if !self.running {
            return Tick {
                state: *self,
                phase_changed: None,
            };
        }

        let mut next = *self;
        match next.mode {
            Mode::Work => next.total_focused_seconds += 1,
            Mode::Break => next.total_break_seconds += 1,
        }
        // Saturating: a countdown that is already at zero still completes.
        next.remaining_seconds = next.remaining_seconds.saturating_sub(1);

        if next.remaining_seconds > 0 {
            return Tick {
                state: next,
                phase_changed: None,
            };
        }

        if next.mode == Mode::Work {
            next.completed_count += 1;
            next.cycle_count += 1;
        }
        next.mode = next.mode.next();
        next.remaining_seconds = next.phase_duration();

        Tick {
            state: next,
            phase_changed: Some(next.mode),
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_at(mode: Mode, remaining_seconds: u64) -> TimerState {
        TimerState {
            mode,
            remaining_seconds,
            running: true,
            ..TimerState::default()
        }
    }

    #[test]
    fn initial_state_is_stopped_work() {
        let timer = TimerState::default();
        assert_eq!(timer.mode, Mode::Work);
        assert_eq!(timer.remaining_seconds, WORK_SECONDS);
        assert!(!timer.running);
        assert_eq!(timer.completed_count, 0);
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let timer = TimerState::default();
        let started = timer.start();
        assert!(started.running);
        assert_eq!(started.start(), started);

        let stopped = started.stop();
        assert!(!stopped.running);
        assert_eq!(stopped.stop(), stopped);
        assert_eq!(stopped, timer);
    }

    #[test]
    fn tick_while_stopped_is_noop() {
        let timer = TimerState::default();
        let tick = timer.tick();
        assert_eq!(tick.state, timer);
        assert_eq!(tick.phase_changed, None);
    }

    #[test]
    fn tick_counts_down_and_accumulates_focus() {
        let tick = TimerState::default().start().tick();
        assert_eq!(tick.state.remaining_seconds, WORK_SECONDS - 1);
        assert_eq!(tick.state.total_focused_seconds, 1);
        assert_eq!(tick.state.total_break_seconds, 0);
        assert_eq!(tick.phase_changed, None);
    }

    #[test]
    fn break_tick_accumulates_break_time() {
        let tick = running_at(Mode::Break, 10).tick();
        assert_eq!(tick.state.total_break_seconds, 1);
        assert_eq!(tick.state.total_focused_seconds, 0);
        assert_eq!(tick.state.remaining_seconds, 9);
    }

    #[test]
    fn work_completion_switches_to_break() {
        let tick = running_at(Mode::Work, 1).tick();
        assert_eq!(tick.phase_changed, Some(Mode::Break));
        assert_eq!(tick.state.mode, Mode::Break);
        assert_eq!(tick.state.remaining_seconds, BREAK_SECONDS);
        assert_eq!(tick.state.completed_count, 1);
        assert_eq!(tick.state.cycle_count, 1);
        assert!(tick.state.running);
    }

    #[test]
    fn break_completion_switches_to_work_without_counting() {
        let tick = running_at(Mode::Break, 1).tick();
        assert_eq!(tick.phase_changed, Some(Mode::Work));
        assert_eq!(tick.state.mode, Mode::Work);
        assert_eq!(tick.state.remaining_seconds, WORK_SECONDS);
        assert_eq!(tick.state.completed_count, 0);
        assert_eq!(tick.state.cycle_count, 0);
    }

    #[test]
    fn exhausted_countdown_still_transitions_once() {
        let tick = running_at(Mode::Work, 0).tick();
        assert_eq!(tick.phase_changed, Some(Mode::Break));
        assert_eq!(tick.state.completed_count, 1);
        assert_eq!(tick.state.remaining_seconds, BREAK_SECONDS);
    }

    #[test]
    fn reset_rewinds_current_mode_only() {
        let timer = running_at(Mode::Break, 42);
        let reset = timer.reset();
        assert_eq!(reset.mode, Mode::Break);
        assert_eq!(reset.remaining_seconds, BREAK_SECONDS);
        assert!(!reset.running);
    }

    #[test]
    fn switch_mode_discards_countdown() {
        let timer = running_at(Mode::Work, 17).switch_mode(Mode::Break);
        assert_eq!(timer.mode, Mode::Break);
        assert_eq!(timer.remaining_seconds, BREAK_SECONDS);
        assert!(!timer.running);
    }

    #[test]
    fn custom_settings_drive_durations() {
        let settings = TimerSettings::new(3, 2);
        let mut timer = TimerState::new(settings).start();
        let mut phases = Vec::new();
        for _ in 0..5 {
            let tick = timer.tick();
            if let Some(mode) = tick.phase_changed {
                phases.push(mode);
            }
            timer = tick.state;
        }
        assert_eq!(phases, vec![Mode::Break, Mode::Work]);
        assert_eq!(timer.total_focused_seconds, 3);
        assert_eq!(timer.total_break_seconds, 2);
        assert_eq!(timer.remaining_seconds, 3);
    }

    #[test]
    fn status_text_marks_stopped_timer() {
        let timer = TimerState::default();
        assert_eq!(timer.status_text(), "作業中（停止中）");
        assert_eq!(timer.start().status_text(), "作業中");
        assert_eq!(timer.switch_mode(Mode::Break).status_text(), "休憩中（停止中）");
    }

    #[test]
    fn remaining_ratio_tracks_progress() {
        let timer = TimerState::default();
        assert_eq!(timer.remaining_ratio(), 1.0);
        let half = TimerState {
            remaining_seconds: WORK_SECONDS / 2,
            ..timer
        };
        assert!((half.remaining_ratio() - 0.5).abs() < f64::EPSILON);
        let zero = TimerState::new(TimerSettings::new(0, 0));
        assert_eq!(zero.remaining_ratio(), 0.0);
    }

    #[test]
    fn with_settings_clamps_countdown() {
        let timer = running_at(Mode::Work, 1200);
        let shorter = timer.with_settings(TimerSettings::new(600, 120));
        assert_eq!(shorter.remaining_seconds, 600);
        assert_eq!(shorter.settings.break_seconds, 120);
        assert!(shorter.running);

        let longer = timer.with_settings(TimerSettings::new(3000, 600));
        assert_eq!(longer.remaining_seconds, 1200);
    }

    #[test]
    fn mode_parses_from_str() {
        assert_eq!("work".parse::<Mode>().unwrap(), Mode::Work);
        assert_eq!("Break".parse::<Mode>().unwrap(), Mode::Break);
        assert!("lunch".parse::<Mode>().is_err());
    }

    #[test]
    fn timer_state_serializes_camel_case() {
        let json = serde_json::to_value(TimerState::default()).unwrap();
        assert_eq!(json["mode"], "work");
        assert_eq!(json["remainingSeconds"], 1500);
        assert_eq!(json["settings"]["breakSeconds"], 300);
    }
}
