//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Mask a credential for display, keeping only its first four characters
pub fn redact_secret(secret: &str) -> String {
    if secret.is_empty() {
        return "<unset>".to_string();
    }

    let prefix: String = secret.chars().take(4).collect();
    format!("{}****", prefix)
}

/// Build display initials from name parts, e.g. for avatar placeholders
pub fn initials(first_name: &str, last_name: &str) -> String {
    [first_name, last_name]
        .iter()
        .filter_map(|part| part.trim().chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

/// Normalize whitespace in text
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
