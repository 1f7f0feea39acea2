use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::gamification::BadgeId;
use crate::timer::{Mode, TimerSettings, TimerState};

/// Every noteworthy state change produced by the driver.
/// The CLI prints them; notifiers react to `PhaseChanged`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    PhaseChanged {
        mode: Mode,
        completed_count: u32,
        at: DateTime<Utc>,
    },
    LevelUp {
        level: u64,
        xp: u64,
        at: DateTime<Utc>,
    },
    BadgeUnlocked {
        badge: BadgeId,
        label: String,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: Mode,
        running: bool,
        status: String,
        remaining_seconds: u64,
        remaining: String,
        completed_count: u32,
        cycle_count: u32,
        total_focused_seconds: u64,
        total_break_seconds: u64,
        at: DateTime<Utc>,
    },
}

impl Event {
    pub fn snapshot(timer: &TimerState) -> Self {
        Event::StateSnapshot {
            mode: timer.mode,
            running: timer.running,
            status: timer.status_text(),
            remaining_seconds: timer.remaining_seconds,
            remaining: crate::timer::to_time_string(timer.remaining_seconds),
            completed_count: timer.completed_count,
            cycle_count: timer.cycle_count,
            total_focused_seconds: timer.total_focused_seconds,
            total_break_seconds: timer.total_break_seconds,
            at: Utc::now(),
        }
    }
}

/// Title and body for the notification sent when a phase begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseNotice {
    pub title: String,
    pub body: String,
}

impl PhaseNotice {
    pub fn for_phase(mode: Mode, settings: &TimerSettings) -> Self {
        match mode {
            Mode::Break => Self {
                title: "休憩時間です".to_string(),
                body: format!("{}分休憩しましょう。", settings.break_seconds / 60),
            },
            Mode::Work => Self {
                title: "作業時間です".to_string(),
                body: format!("{}分の作業を開始しましょう。", settings.work_seconds / 60),
            },
        }
    }
}
