//! Gamification persistence.
//!
//! Loading never fails outward: a missing, unreadable or malformed record
//! yields `None` and the caller proceeds with defaults. Individual fields are
//! coerced independently, so one bad field does not discard the rest.

use std::cell::RefCell;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use crate::error::StorageError;
use crate::gamification::{calculate_level, EarnedBadges, GamificationState, WeeklyEntry, WeeklyStats};

/// Where gamification progress is kept between runs.
pub trait GamificationStore {
    /// Previously saved state, or `None` when nothing usable is stored.
    fn load(&self) -> Option<GamificationState>;

    /// Persist `state`. Callers treat a failure as "skip this round".
    fn save(&self, state: &GamificationState) -> Result<(), StorageError>;
}

/// Decode a persisted record, defaulting each field that is missing or has
/// the wrong type. Returns `None` only for text that is not valid JSON.
///
/// `level` is recomputed from `xp` rather than trusted.
pub fn decode_lenient(raw: &str) -> Option<GamificationState> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Malformed gamification record: {}. Using defaults.", e);
            return None;
        }
    };
    let empty = Map::new();
    let obj = value.as_object().unwrap_or(&empty);

    let xp = obj.get("xp").map(coerce_u64).unwrap_or(0);
    let streak = obj
        .get("streak")
        .map(coerce_u64)
        .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
        .unwrap_or(0);
    let last_completed_date = obj
        .get("lastCompletedDate")
        .and_then(Value::as_str)
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok());

    let mut earned_badges = EarnedBadges::new();
    if let Some(badges) = obj.get("earnedBadges").and_then(Value::as_object) {
        for (id, earned) in badges {
            if earned.as_bool() == Some(true) {
                earned_badges.earn_raw(id.clone());
            }
        }
    }

    let mut weekly_stats = WeeklyStats::new();
    if let Some(weeks) = obj.get("weeklyStats").and_then(Value::as_object) {
        for (week, entry) in weeks {
            let Some(entry) = entry.as_object() else {
                continue;
            };
            weekly_stats.insert(
                week.clone(),
                WeeklyEntry {
                    completed: entry.get("completed").map(coerce_u64).unwrap_or(0),
                    focus_seconds: entry.get("focusSeconds").map(coerce_u64).unwrap_or(0),
                },
            );
        }
    }

    Some(GamificationState {
        xp,
        level: calculate_level(xp),
        streak,
        last_completed_date,
        earned_badges,
        weekly_stats,
    })
}

/// Non-negative integer from a JSON number or numeric string, else 0.
fn coerce_u64(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>()
                .ok()
                .or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite() && *f >= 0.0)
                        .map(|f| f as u64)
                })
                .unwrap_or(0)
        }
        _ => 0,
    }
}

/// JSON file store with atomic writes.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub const FILE_NAME: &'static str = "gamification.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/gamification.json`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GamificationStore for JsonFileStore {
    fn load(&self) -> Option<GamificationState> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No gamification file at {:?}", self.path);
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    "Unable to read gamification file {:?}: {}. Using defaults.",
                    self.path,
                    e
                );
                return None;
            }
        };
        let state = decode_lenient(&raw);
        if state.is_some() {
            tracing::debug!("Loaded gamification state from {:?}", self.path);
        }
        state
    }

    fn save(&self, state: &GamificationState) -> Result<(), StorageError> {
        let io_err = |source: std::io::Error| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(io_err)?;

        let contents = serde_json::to_string(state)?;
        let mut temp = NamedTempFile::new_in(parent).map_err(io_err)?;
        temp.write_all(contents.as_bytes()).map_err(io_err)?;
        temp.as_file().sync_all().map_err(io_err)?;
        temp.persist(&self.path).map_err(|e| StorageError::Persist {
            path: self.path.clone(),
            source: e.error,
        })?;

        tracing::debug!("Saved gamification state to {:?}", self.path);
        Ok(())
    }
}

/// In-memory store holding the serialized record, for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with raw text, as if written by an older build.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: RefCell::new(Some(raw.into())),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }
}

impl GamificationStore for MemoryStore {
    fn load(&self) -> Option<GamificationState> {
        self.raw.borrow().as_deref().and_then(decode_lenient)
    }

    fn save(&self, state: &GamificationState) -> Result<(), StorageError> {
        *self.raw.borrow_mut() = Some(serde_json::to_string(state)?);
        Ok(())
    }
}
