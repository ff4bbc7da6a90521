// File: ./src/model/display.rs
// Small formatting helpers shared by every screen.
use chrono::{Datelike, NaiveDateTime};

/// `6/1/2025`
pub fn format_date(dt: &NaiveDateTime) -> String {
    format!("{}/{}/{}", dt.month(), dt.day(), dt.year())
}

/// `14:05`
pub fn format_time(dt: &NaiveDateTime) -> String {
    dt.format("%H:%M").to_string()
}

pub fn format_date_time(dt: &NaiveDateTime) -> String {
    format!("{} {}", format_date(dt), format_time(dt))
}

/// Day-of-month badge used next to upcoming sessions: `(1, "JUN")`.
pub fn day_badge(dt: &NaiveDateTime) -> (u32, String) {
    (dt.day(), dt.format("%b").to_string().to_uppercase())
}

/// Cuts `text` to at most `max` characters, appending `...` when something was cut.
pub fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max).collect();
    format!("{}...", cut.trim_end())
}

pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn initials(first: &str, last: &str) -> String {
    first
        .chars()
        .next()
        .into_iter()
        .chain(last.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn rating(r: Option<f64>) -> String {
    format!("⭐ {:.1}/5.0", r.unwrap_or(0.0))
}
