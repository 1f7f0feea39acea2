//! Per-week completion buckets keyed by ISO 8601 week.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyEntry {
    pub completed: u64,
    pub focus_seconds: u64,
}

/// Week id (`"2024-W03"`) to its bucket. Keys are never removed.
pub type WeeklyStats = BTreeMap<String, WeeklyEntry>;

/// ISO week id for a calendar date: `YYYY-Www`.
///
/// Weeks start on Monday and week 1 contains the year's first Thursday, so
/// early-January and late-December dates can belong to the neighbouring year.
pub fn week_key(date: NaiveDate) -> String {
    let week = date.iso_week();
    format!("{}-W{:02}", week.year(), week.week())
}

/// Record one completed session of `focus_seconds` in the week of `today`.
pub fn update_weekly_stats(
    weekly_stats: &WeeklyStats,
    focus_seconds: u64,
    today: NaiveDate,
) -> WeeklyStats {
    let mut updated = weekly_stats.clone();
    let entry = updated.entry(week_key(today)).or_default();
    // Persisted counters can be arbitrarily large.
    entry.completed = entry.completed.saturating_add(1);
    entry.focus_seconds = entry.focus_seconds.saturating_add(focus_seconds);
    updated
}

/// Completed count for the week containing `today`, 0 when absent.
pub fn completed_in_week(weekly_stats: &WeeklyStats, today: NaiveDate) -> u64 {
    weekly_stats
        .get(&week_key(today))
        .map(|entry| entry.completed)
        .unwrap_or(0)
}
