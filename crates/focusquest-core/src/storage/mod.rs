mod config;
mod gamification_store;

pub use config::{Config, GoalConfig, LoggingConfig, NotificationsConfig, TimerConfig};
pub use gamification_store::{decode_lenient, GamificationStore, JsonFileStore, MemoryStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the data directory, creating it if needed.
///
/// `FOCUSQUEST_DATA_DIR` overrides the location outright. Otherwise
/// `~/.config/focusquest[-dev]/` is used, with the `-dev` suffix when
/// `FOCUSQUEST_ENV=dev`.
///
/// # Errors
/// Returns an error if no home directory can be determined or if creating
/// the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("FOCUSQUEST_DATA_DIR") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let base_dir = dirs::home_dir()
                .ok_or(StorageError::DataDirUnavailable)?
                .join(".config");
            let env = std::env::var("FOCUSQUEST_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("focusquest-dev")
            } else {
                base_dir.join("focusquest")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
