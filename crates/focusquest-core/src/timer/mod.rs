mod engine;
mod format;
mod goal;

pub use engine::{Mode, Tick, TimerSettings, TimerState, BREAK_SECONDS, WORK_SECONDS};
pub use format::{to_duration_string, to_time_string};
pub use goal::{calculate_goal, GoalProgress, DAILY_GOAL};
