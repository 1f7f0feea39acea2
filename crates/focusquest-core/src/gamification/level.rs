/// XP granted for every completed work session.
pub const XP_PER_POMODORO: u64 = 10;
/// XP needed to climb one level.
pub const XP_PER_LEVEL: u64 = 100;

/// Level for a cumulative XP total. Starts at 1.
pub fn calculate_level(xp: u64) -> u64 {
    xp / XP_PER_LEVEL + 1
}

/// XP earned since the last level boundary.
pub fn xp_in_current_level(xp: u64) -> u64 {
    xp % XP_PER_LEVEL
}
