// Content normalizer — raw message text to structured signals.
//
// Canonicalization strips zero-width characters, then runs NFKC, case
// folding and whitespace collapsing, in that order. Extraction of URLs, mentions and
// hashtags always runs against the untouched input so the extracted
// substrings keep their original case and punctuation.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// A URL-shaped token: explicit scheme, a `www.` prefix, or a bare
/// `label.tld` domain. Each alternative runs greedily to the next whitespace.
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://\S+|www\.\S+|[a-zA-Z0-9-]+\.[a-zA-Z]{2,}\S*").expect("valid URL regex")
});

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(\w+)").expect("valid mention regex"));

static HASHTAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\w+)").expect("valid hashtag regex"));

/// Characters that render as nothing but split tokens apart.
const ZERO_WIDTH_CHARS: &[char] = &[
    '\u{200B}', // zero-width space
    '\u{200C}', // zero-width non-joiner
    '\u{200D}', // zero-width joiner
    '\u{2060}', // word joiner
    '\u{FEFF}', // byte-order mark used as text
];

/// The structured result of normalizing one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedContent {
    /// The input exactly as it was received.
    pub original_text: String,
    /// NFKC, lowercased, zero-width free, single-spaced and trimmed.
    pub normalized_text: String,
    /// URL-like substrings of the original text, in order of appearance.
    pub urls: Vec<String>,
    /// Handle names without the leading `@`.
    pub mentions: Vec<String>,
    /// Tag names without the leading `#`.
    pub hashtags: Vec<String>,
}

/// Normalize a message and extract its URLs, mentions and hashtags.
///
/// Never fails: text with nothing to extract simply yields empty sequences.
pub fn normalize(text: &str) -> NormalizedContent {
    NormalizedContent {
        original_text: text.to_string(),
        normalized_text: canonicalize(text),
        urls: extract_urls(text),
        mentions: extract_captures(&MENTION_RE, text),
        hashtags: extract_captures(&HASHTAG_RE, text),
    }
}

/// Produce the canonical comparison form of `text`.
///
/// Idempotent: `canonicalize(&canonicalize(x)) == canonicalize(x)`.
/// Zero-width characters go first so NFKC sees every base letter next to
/// its combining marks.
pub fn canonicalize(text: &str) -> String {
    let stripped = strip_zero_width(text);
    let nfkc: String = stripped.nfkc().collect();
    collapse_whitespace(&nfkc.to_lowercase())
}

fn strip_zero_width(text: &str) -> String {
    text.chars().filter(|c| !ZERO_WIDTH_CHARS.contains(c)).collect()
}

/// Collapse every whitespace run to one ASCII space and trim both ends.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn extract_urls(text: &str) -> Vec<String> {
    URL_RE
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Collect capture group 1 of every match, in order.
fn extract_captures(re: &Regex, text: &str) -> Vec<String> {
    re.captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}
