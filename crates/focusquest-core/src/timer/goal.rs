use serde::{Deserialize, Serialize};

pub const DAILY_GOAL: u32 = 8;

/// Progress towards the daily session goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalProgress {
    /// `"completed/goal"`, with the raw completed count.
    pub text: String,
    /// 0.0 ..= 100.0
    pub percent: f64,
    /// Completed count clamped to the goal.
    pub value: u32,
    pub max: u32,
}

/// Compute goal progress. Completions past the goal do not push `percent`
/// beyond 100.
pub fn calculate_goal(completed_count: u32, goal: u32) -> GoalProgress {
    let value = completed_count.min(goal);
    let percent = if goal == 0 {
        100.0
    } else {
        (value as f64 / goal as f64 * 100.0).min(100.0)
    };
    GoalProgress {
        text: format!("{completed_count}/{goal}"),
        percent,
        value,
        max: goal,
    }
}
