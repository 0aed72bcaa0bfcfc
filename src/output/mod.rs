// Output formatting — terminal display for the CLI and message previews.

pub mod terminal;

/// Shorten a message to at most `max_chars` characters, appending "..." when cut.
///
/// Counts chars rather than bytes, so previews of emoji-heavy chat messages
/// never split a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{truncated}...")
}
