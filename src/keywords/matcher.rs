// Multi-keyword matcher.
//
// Each keyword compiles to its own case-insensitive pattern, folded with
// Unicode rules so "ärger" also finds "ÄRGER". Word-shaped
// edges get a word boundary so "kill" never fires inside "skill", while
// punctuation edges match anywhere. Patterns are rebuilt synchronously on
// every mutation and are read-only during searches.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One occurrence of a keyword in a searched text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordMatch {
    /// The matched text, lowercased.
    pub keyword: String,
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset one past the last matched byte.
    pub end: usize,
}

struct CompiledKeyword {
    keyword: String,
    regex: Regex,
}

/// A set of keywords searchable as one unit.
///
/// Keywords are stored exactly as given; duplicates collapse. Iteration over
/// the set is sorted, so results for a given keyword set are deterministic.
#[derive(Default)]
pub struct KeywordMatcher {
    keywords: BTreeSet<String>,
    patterns: Vec<CompiledKeyword>,
}

impl KeywordMatcher {
    /// Create an empty matcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one keyword and recompile.
    pub fn add_keyword(&mut self, keyword: impl Into<String>) {
        self.keywords.insert(keyword.into());
        self.rebuild();
    }

    /// Add several keywords with a single recompile.
    pub fn add_keywords<I, S>(&mut self, keywords: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self.rebuild();
    }

    /// Remove a keyword (exact, case-sensitive) and recompile.
    /// Returns whether the keyword was present.
    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let removed = self.keywords.remove(keyword);
        if removed {
            self.rebuild();
        }
        removed
    }

    /// The current keyword set, sorted.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Find every occurrence of every keyword in `text`, sorted by start offset.
    ///
    /// Occurrences of a single keyword never overlap each other. Occurrences
    /// of different keywords may overlap or coincide; nothing is deduplicated.
    pub fn find_matches(&self, text: &str) -> Vec<KeywordMatch> {
        let mut matches = Vec::new();
        for pattern in &self.patterns {
            // find_iter steps past empty matches, so an empty keyword still terminates.
            for m in pattern.regex.find_iter(text) {
                matches.push(KeywordMatch {
                    keyword: m.as_str().to_lowercase(),
                    start: m.start(),
                    end: m.end(),
                });
            }
        }
        matches.sort_by_key(|m| m.start);
        matches
    }

    /// True if any keyword occurs anywhere in `text`. Stops at the first hit.
    pub fn has_match(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.regex.is_match(text))
    }

    fn rebuild(&mut self) {
        self.patterns = self
            .keywords
            .iter()
            .filter_map(|keyword| match Regex::new(&keyword_pattern(keyword)) {
                Ok(regex) => Some(CompiledKeyword {
                    keyword: keyword.clone(),
                    regex,
                }),
                Err(e) => {
                    warn!(keyword = %keyword, error = %e, "Skipping keyword that failed to compile");
                    None
                }
            })
            .collect();
        debug!(
            keywords = self.keywords.len(),
            patterns = self.patterns.len(),
            "Rebuilt keyword patterns"
        );
    }
}

impl std::fmt::Debug for KeywordMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeywordMatcher")
            .field(
                "compiled",
                &self.patterns.iter().map(|p| &p.keyword).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordMatcher {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut matcher = Self::new();
        matcher.add_keywords(iter);
        matcher
    }
}

// Edge checks use the engine's own Unicode `\w` so they agree with `\b`.
static STARTS_WITH_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w").expect("valid leading word regex"));

static ENDS_WITH_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w$").expect("valid trailing word regex"));

/// Build the search pattern for one keyword.
fn keyword_pattern(keyword: &str) -> String {
    let leading = STARTS_WITH_WORD.is_match(keyword);
    let trailing = ENDS_WITH_WORD.is_match(keyword);

    let mut pattern = String::from("(?i)");
    if leading {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(keyword));
    if trailing {
        pattern.push_str(r"\b");
    }
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(words: &[&str]) -> KeywordMatcher {
        words.iter().copied().collect()
    }

    #[test]
    fn test_word_boundaries_on_word_edges() {
        let m = matcher(&["kill"]);
        assert!(m.has_match("how to kill time"));
        assert!(!m.has_match("improve my skill"));
        assert!(!m.has_match("killer app"));
    }

    #[test]
    fn test_punctuation_edges_match_anywhere() {
        let m = matcher(&["!!!"]);
        let found = m.find_matches("wow!!!!");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].start, 3);
        assert_eq!(found[0].end, 6);
    }

    #[test]
    fn test_mixed_edges() {
        // Leading word char needs a boundary, trailing '$' does not.
        let m = matcher(&["free$"]);
        assert!(m.has_match("get free$$ now"));
        assert!(!m.has_match("carefree$"));
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let m = matcher(&["a.b", "(x)"]);
        assert!(!m.has_match("axb"));
        assert!(m.has_match("see a.b here"));
        assert!(m.has_match("call (x) now"));
    }

    #[test]
    fn test_case_insensitive_and_lowercased_output() {
        let m = matcher(&["Scam"]);
        let found = m.find_matches("SCAM and scam");
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|k| k.keyword == "scam"));
    }

    #[test]
    fn test_non_ascii_case_folding() {
        let m = matcher(&["ärger"]);
        let found = m.find_matches("viel ÄRGER hier");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].keyword, "ärger");
        assert_eq!((found[0].start, found[0].end), (5, 11));
    }

    #[test]
    fn test_non_ascii_letters_are_word_edges() {
        // 'é' is a word character, so "café" does not fire inside "cafés".
        let m = matcher(&["café"]);
        assert!(m.has_match("un café noir"));
        assert!(!m.has_match("deux cafés"));
    }

    #[test]
    fn test_overlapping_keywords_are_not_deduplicated() {
        let m = matcher(&["free money", "money"]);
        let found = m.find_matches("free money");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].start, 0);
        assert_eq!(found[0].keyword, "free money");
        assert_eq!(found[1].start, 5);
    }

    #[test]
    fn test_results_sorted_by_start() {
        let m = matcher(&["zeta", "alpha"]);
        let found = m.find_matches("zeta alpha zeta");
        let starts: Vec<usize> = found.iter().map(|k| k.start).collect();
        assert_eq!(starts, vec![0, 5, 11]);
    }

    #[test]
    fn test_duplicates_collapse_and_remove() {
        let mut m = KeywordMatcher::new();
        m.add_keyword("spam");
        m.add_keywords(["spam", "scam"]);
        assert_eq!(m.len(), 2);

        assert!(m.remove_keyword("spam"));
        assert!(!m.remove_keyword("spam"));
        assert!(!m.has_match("spam"));
        assert!(m.has_match("scam"));
    }

    #[test]
    fn test_storage_is_not_case_folded() {
        let mut m = matcher(&["Spam"]);
        assert!(!m.remove_keyword("spam"));
        assert!(m.remove_keyword("Spam"));
        assert!(m.is_empty());
    }

    #[test]
    fn test_empty_keyword_terminates() {
        let m = matcher(&[""]);
        let found = m.find_matches("abc");
        assert!(!found.is_empty());
        assert!(found.iter().all(|k| k.start == k.end));
        assert!(m.has_match("abc"));
    }

    #[test]
    fn test_empty_matcher() {
        let m = KeywordMatcher::new();
        assert!(m.find_matches("anything").is_empty());
        assert!(!m.has_match("anything"));
    }

    #[test]
    fn test_has_match_is_repeatable() {
        let m = matcher(&["alert"]);
        assert!(m.has_match("red alert"));
        assert!(m.has_match("red alert"));
        assert_eq!(m.find_matches("red alert").len(), 1);
    }
}
