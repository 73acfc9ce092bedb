//! Formatting utilities used for CLI and export outputs.

use crate::core::accountant::round_hours;

/// Hours with one decimal, the way durations are shown to users.
pub fn hours(h: f64) -> String {
    format!("{:.1}", round_hours(h))
}

pub fn percent(p: f64) -> String {
    format!("{:.1}%", p)
}

pub fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}

pub fn mins2readable(mins: i64) -> String {
    let abs_m = mins.abs();
    let sign = if mins < 0 { "-" } else { "" };
    format!("{}{:02}h {:02}m", sign, abs_m / 60, abs_m % 60)
}
