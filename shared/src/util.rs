//! Small pure helpers shared by the server and its analytics

/// Percentage change from `previous` to `current`
///
/// Returns 0 when `previous` is zero, so callers never see infinity or NaN.
pub fn percentage_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}

/// Stable palette slot for a team name: sum of char codes modulo palette size
pub fn team_color_index(team_name: &str, palette_len: usize) -> usize {
    if palette_len == 0 {
        return 0;
    }
    let sum: u64 = team_name.chars().map(|c| u64::from(u32::from(c))).sum();
    (sum % palette_len as u64) as usize
}

/// First whitespace-separated token of a full name
pub fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or("")
}
