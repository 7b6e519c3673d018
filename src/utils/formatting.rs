//! Formatting utilities used for CLI and export outputs.

/// Render a turnout percentage with two decimals, e.g. "42.57%".
pub fn fmt_percent(p: f64) -> String {
    format!("{:.2}%", p)
}
