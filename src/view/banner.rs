/// Error line shown in place of a unit's content.
pub fn error_banner(what: &str, key: &str, message: &str) -> String {
    format!("Error fetching {what} for \"{key}\": {message}")
}

pub const SEARCH_CLEARED: &str = "Search cleared. Enter a new term.";

/// Shorten to `max` characters, marking the cut with "...".
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
