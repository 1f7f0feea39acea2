//! Helpers shared by the subcommands.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use focusquest_core::storage::data_dir;
use focusquest_core::{AppState, Config, GamificationStore, JsonFileStore, TimerState};

const TIMER_FILE: &str = "timer.json";

/// Calendar day used for streaks and weekly buckets.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn timer_path(dir: &Path) -> PathBuf {
    dir.join(TIMER_FILE)
}

/// Timer left behind by the previous invocation, or a fresh one.
///
/// Durations always follow the current config.
pub fn load_timer(dir: &Path, config: &Config) -> TimerState {
    let settings = config.timer_settings();
    let path = timer_path(dir);
    match std::fs::read_to_string(&path) {
        Ok(json) => match serde_json::from_str::<TimerState>(&json) {
            Ok(timer) => timer.with_settings(settings),
            Err(e) => {
                tracing::warn!("Ignoring unreadable timer state {:?}: {}", path, e);
                TimerState::new(settings)
            }
        },
        Err(_) => TimerState::new(settings),
    }
}

pub fn save_timer(dir: &Path, timer: &TimerState) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(timer)?;
    std::fs::write(timer_path(dir), json)?;
    Ok(())
}

/// Everything a command needs: data dir, config and the persisted state.
pub struct Session {
    pub dir: PathBuf,
    pub config: Config,
    pub store: JsonFileStore,
    pub state: AppState,
}

impl Session {
    pub fn open(config: Config) -> Result<Self, Box<dyn std::error::Error>> {
        let dir = data_dir()?;
        let store = JsonFileStore::in_dir(&dir);
        let state = AppState {
            timer: load_timer(&dir, &config),
            gamification: store.load().unwrap_or_default(),
        };
        Ok(Self {
            dir,
            config,
            store,
            state,
        })
    }
}

pub fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
