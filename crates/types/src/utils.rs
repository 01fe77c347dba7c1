//! Utility functions and helpers

use chrono::NaiveDate;

/// Separator between the section name and the setting key
pub const KEY_DELIMITER: char = ':';

/// Build the fully-qualified key `"<section>:<key>"`
pub fn qualify_key(section: &str, key: &str) -> String {
    if section.is_empty() {
        return key.to_string();
    }
    format!("{}{}{}", section, KEY_DELIMITER, key)
}

/// Check whether a URL uses an HTTP scheme
pub fn is_http_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Format a date the way the long-date display shows it, e.g.
/// `Monday, October 1, 2024`
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Sanitize string for logging (connection strings carry credentials)
pub fn sanitize_for_logging(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 10 {
        return s.to_string();
    }

    let head: String = chars[..10].iter().collect();
    format!("{}...", head)
}
