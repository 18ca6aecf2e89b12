//! Common display utilities and helpers

use chrono::{DateTime, Utc};

/// Placeholder for missing values
pub const EMPTY: &str = "--";

/// Truncate string to max characters with ellipsis
pub fn truncate_string(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Format an optional timestamp as a date (YYYY-MM-DD)
pub fn format_date(timestamp: Option<DateTime<Utc>>) -> String {
    timestamp
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| EMPTY.to_string())
}

/// Checkmark for true, empty otherwise
pub fn checkmark(value: bool) -> String {
    if value {
        "\u{2713}".to_string()
    } else {
        String::new()
    }
}

pub fn or_empty(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or(EMPTY)
        .to_string()
}
