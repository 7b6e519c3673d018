/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Turnout color:
/// ≥ 50% → green
/// ≥ 25% → yellow
/// > 0   → red
/// 0     → grey (no data or zero denominator)
pub fn color_for_turnout(percentage: f64) -> &'static str {
    if percentage >= 50.0 {
        GREEN
    } else if percentage >= 25.0 {
        YELLOW
    } else if percentage > 0.0 {
        RED
    } else {
        GREY
    }
}
