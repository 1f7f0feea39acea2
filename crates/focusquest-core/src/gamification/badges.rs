//! Badge catalog and unlock evaluation.
//!
//! Badges are monotonic: once an id is marked earned it is never cleared,
//! even if a later evaluation would not award it again.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::weekly::{completed_in_week, WeeklyStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BadgeId {
    #[serde(rename = "first")]
    First,
    #[serde(rename = "streak3")]
    Streak3,
    #[serde(rename = "streak7")]
    Streak7,
    #[serde(rename = "ten")]
    Ten,
    #[serde(rename = "weekTen")]
    WeekTen,
    #[serde(rename = "centurion")]
    Centurion,
}

impl BadgeId {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeId::First => "first",
            BadgeId::Streak3 => "streak3",
            BadgeId::Streak7 => "streak7",
            BadgeId::Ten => "ten",
            BadgeId::WeekTen => "weekTen",
            BadgeId::Centurion => "centurion",
        }
    }

    pub fn badge(self) -> &'static Badge {
        // Catalog order matches declaration order.
        &BADGES[self as usize]
    }
}

impl std::fmt::Display for BadgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static badge definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Badge {
    pub id: BadgeId,
    pub label: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
}

/// Full catalog, in display order.
pub const BADGES: [Badge; 6] = [
    Badge {
        id: BadgeId::First,
        label: "はじめの一歩",
        description: "初めてのポモドーロ完了",
        icon: "🌱",
    },
    Badge {
        id: BadgeId::Streak3,
        label: "3日連続",
        description: "3日連続でポモドーロを完了",
        icon: "🔥",
    },
    Badge {
        id: BadgeId::Streak7,
        label: "1週間継続",
        description: "7日連続でポモドーロを完了",
        icon: "⚡",
    },
    Badge {
        id: BadgeId::Ten,
        label: "10回達成",
        description: "累計10回のポモドーロを完了",
        icon: "🏆",
    },
    Badge {
        id: BadgeId::WeekTen,
        label: "週10回",
        description: "今週10回のポモドーロを完了",
        icon: "📅",
    },
    Badge {
        id: BadgeId::Centurion,
        label: "センチュリオン",
        description: "累計100回のポモドーロを完了",
        icon: "💯",
    },
];

/// Earned badges keyed by id string. Absence means not earned.
///
/// Unknown ids found in persisted data are carried along untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EarnedBadges(BTreeMap<String, bool>);

impl EarnedBadges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_earned(&self, id: BadgeId) -> bool {
        self.0.get(id.as_str()).copied().unwrap_or(false)
    }

    pub fn earn(&mut self, id: BadgeId) {
        self.0.insert(id.as_str().to_string(), true);
    }

    /// Mark an arbitrary id as earned. Used when decoding persisted data.
    pub fn earn_raw(&mut self, id: impl Into<String>) {
        self.0.insert(id.into(), true);
    }

    pub fn len(&self) -> usize {
        self.0.values().filter(|earned| **earned).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0
            .iter()
            .filter(|(_, earned)| **earned)
            .map(|(id, _)| id.as_str())
    }
}

impl FromIterator<BadgeId> for EarnedBadges {
    fn from_iter<T: IntoIterator<Item = BadgeId>>(iter: T) -> Self {
        let mut badges = Self::new();
        for id in iter {
            badges.earn(id);
        }
        badges
    }
}

/// Evaluate every threshold and merge the result onto `earned`.
pub fn check_badges(
    earned: &EarnedBadges,
    total_completed: u32,
    streak: u32,
    weekly_stats: &WeeklyStats,
    today: NaiveDate,
) -> EarnedBadges {
    let week_completed = completed_in_week(weekly_stats, today);
    let thresholds = [
        (BadgeId::First, total_completed >= 1),
        (BadgeId::Streak3, streak >= 3),
        (BadgeId::Streak7, streak >= 7),
        (BadgeId::Ten, total_completed >= 10),
        (BadgeId::WeekTen, week_completed >= 10),
        (BadgeId::Centurion, total_completed >= 100),
    ];

    let mut updated = earned.clone();
    for (id, reached) in thresholds {
        if reached {
            updated.earn(id);
        }
    }
    updated
}

/// Badges present in `after` but not in `before`, in catalog order.
pub fn newly_earned(before: &EarnedBadges, after: &EarnedBadges) -> Vec<BadgeId> {
    BADGES
        .iter()
        .map(|badge| badge.id)
        .filter(|id| after.is_earned(*id) && !before.is_earned(*id))
        .collect()
}
