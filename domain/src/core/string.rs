//! String utilities for the domain layer.

/// Take at most `max_chars` characters of `s`, appending `...` when cut.
///
/// Counts Unicode scalar values, so multibyte text is never split.
pub fn excerpt(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &s[..end]),
        None => s.to_string(),
    }
}

/// Count whitespace-separated words
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}
