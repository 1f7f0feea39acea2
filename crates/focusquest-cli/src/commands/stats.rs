use clap::Subcommand;
use focusquest_core::gamification::{completed_in_week, date_string, week_key, XP_PER_LEVEL};
use focusquest_core::timer::{calculate_goal, to_duration_string};
use focusquest_core::Config;
use serde_json::json;

use crate::common::{print_json, today, Session};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Progress towards the daily goal in the current session
    Goal,
    /// Per-week completions and focus time
    Weekly,
    /// XP and level
    Level,
    /// Everything at once
    Summary,
}

pub fn run(action: StatsAction, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(config)?;
    let timer = &session.state.timer;
    let gamification = &session.state.gamification;
    let goal = calculate_goal(timer.completed_count, session.config.goal.daily);

    match action {
        StatsAction::Goal => print_json(&goal)?,
        StatsAction::Weekly => {
            let day = today();
            print_json(&json!({
                "currentWeek": week_key(day),
                "completedThisWeek": completed_in_week(&gamification.weekly_stats, day),
                "weeks": gamification.weekly_stats,
            }))?;
        }
        StatsAction::Level => {
            print_json(&json!({
                "xp": gamification.xp,
                "level": gamification.level,
                "xpInLevel": gamification.xp_in_current_level(),
                "xpPerLevel": XP_PER_LEVEL,
            }))?;
        }
        StatsAction::Summary => {
            print_json(&json!({
                "goal": goal,
                "completedCount": timer.completed_count,
                "cycleCount": timer.cycle_count,
                "focused": to_duration_string(timer.total_focused_seconds),
                "rested": to_duration_string(timer.total_break_seconds),
                "xp": gamification.xp,
                "level": gamification.level,
                "streak": gamification.streak,
                "lastCompletedDate": gamification.last_completed_date.map(date_string),
                "badges": gamification.earned_badges.len(),
                "lifetimeCompleted": gamification.lifetime_completed(),
                "lifetimeFocused": to_duration_string(gamification.lifetime_focus_seconds()),
            }))?;
        }
    }
    Ok(())
}
