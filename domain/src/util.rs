//! Shared utility functions.

/// One-line preview of `text` for log messages.
///
/// Newlines are folded into spaces and the result is cut to at most
/// `max_chars` characters (not bytes), with `...` appended when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    if flat.chars().count() <= max_chars {
        return flat;
    }

    let mut cut: String = flat.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}
