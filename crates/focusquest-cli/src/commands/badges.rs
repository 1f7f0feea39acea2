use focusquest_core::{Config, BADGES};
use serde_json::json;

use crate::common::{print_json, Session};

pub fn run(earned_only: bool, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(config)?;
    let earned = &session.state.gamification.earned_badges;

    let listing: Vec<_> = BADGES
        .iter()
        .filter(|badge| !earned_only || earned.is_earned(badge.id))
        .map(|badge| {
            json!({
                "id": badge.id,
                "label": badge.label,
                "description": badge.description,
                "icon": badge.icon,
                "earned": earned.is_earned(badge.id),
            })
        })
        .collect();
    print_json(&listing)
}
