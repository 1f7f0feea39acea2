//! # focusquest Core Library
//!
//! This library provides the core logic for the focusquest Pomodoro timer:
//! a tick-driven timer state machine plus a gamification layer (XP, levels,
//! daily streaks, weekly statistics and badges). The CLI binary is a thin
//! driver over the same library.
//!
//! ## Architecture
//!
//! - **Timer**: a value-type state machine. The caller invokes `tick()` once
//!   per second; each call returns a new snapshot and an optional phase change
//! - **Gamification**: pure reducers run when a work session completes
//! - **Driver**: feeds completions to the reducers, persists progress and
//!   notifies a collaborator on phase changes
//! - **Storage**: fail-soft JSON persistence and TOML configuration
//!
//! ## Key Components
//!
//! - [`TimerState`]: Core timer state machine
//! - [`GamificationState`]: Persisted progress
//! - [`AppState`]: Both of the above, advanced together
//! - [`Driver`]: Collaborator wiring
//! - [`Config`]: Application configuration management

pub mod app;
pub mod driver;
pub mod error;
pub mod events;
pub mod gamification;
pub mod logging;
pub mod storage;
pub mod timer;

pub use app::{AppState, AppTick};
pub use driver::{Driver, PhaseNotifier, SilentNotifier};
pub use error::{ConfigError, CoreError, Result, StorageError};
pub use events::{Event, PhaseNotice};
pub use gamification::{BadgeId, EarnedBadges, GamificationState, BADGES};
pub use storage::{Config, GamificationStore, JsonFileStore, MemoryStore};
pub use timer::{Mode, Tick, TimerSettings, TimerState};
