//! Small shared helpers.

/// Truncate a string to `max_len` bytes with a trailing ellipsis, cutting
/// only at valid UTF-8 boundaries. Used for log lines and notice previews.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}
