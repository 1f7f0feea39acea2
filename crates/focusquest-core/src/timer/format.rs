//! Display formatting for countdowns and accumulated time.

/// Render a countdown as zero-padded `MM:SS`.
///
/// Minutes are not wrapped into hours, so 6000 seconds renders as `100:00`.
pub fn to_time_string(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Render an accumulated duration as `H時間MM分SS秒`.
pub fn to_duration_string(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours}時間{minutes:02}分{secs:02}秒")
}
