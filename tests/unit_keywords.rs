// Unit tests for the keyword matcher: boundaries, overlap behavior,
// mutation, and the has_match/find_matches agreement.

use cinder::keywords::{KeywordMatch, KeywordMatcher};

fn matcher(words: &[&str]) -> KeywordMatcher {
    words.iter().copied().collect()
}

// ============================================================
// Boundaries
// ============================================================

#[test]
fn word_keyword_does_not_match_inside_words() {
    let m = matcher(&["scam"]);
    assert!(m.find_matches("scampi and scammer").is_empty());
    assert_eq!(m.find_matches("a scam.").len(), 1);
}

#[test]
fn keyword_at_string_edges() {
    let m = matcher(&["spam"]);
    let found = m.find_matches("spam");
    assert_eq!(
        found,
        vec![KeywordMatch {
            keyword: "spam".to_string(),
            start: 0,
            end: 4
        }]
    );
}

#[test]
fn punctuation_leading_keyword() {
    let m = matcher(&["$$$"]);
    assert!(m.has_match("win$$$"));
    assert_eq!(m.find_matches("$$$$$$").len(), 2);
}

#[test]
fn multi_word_keyword() {
    let m = matcher(&["click here"]);
    assert!(m.has_match("please CLICK HERE now"));
    assert!(!m.has_match("click   here"));
}

// ============================================================
// Non-ASCII text
// ============================================================

#[test]
fn non_ascii_keyword_ignores_case() {
    let m = matcher(&["ärger"]);
    let text = "viel ÄRGER hier";
    let found = m.find_matches(text);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].keyword, "ärger");
    assert_eq!(&text[found[0].start..found[0].end], "ÄRGER");
}

#[test]
fn uppercase_non_ascii_keyword_matches_lowercase_text() {
    let m = matcher(&["ΣΚΑΜ", "Überfall"]);
    assert!(m.has_match("ένα σκαμ εδώ"));
    assert!(m.has_match("ein überfall"));
}

#[test]
fn non_ascii_letters_count_as_word_characters() {
    let m = matcher(&["über"]);
    assert!(!m.has_match("überall"));
    assert!(!m.has_match("drüber"));
    assert!(m.has_match("(über)"));
}

// ============================================================
// Overlap and ordering
// ============================================================

#[test]
fn same_span_from_two_keywords_is_reported_twice() {
    let m = matcher(&["Alert", "alert"]);
    let found = m.find_matches("red alert");
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|k| k.start == 4 && k.end == 9 && k.keyword == "alert"));
}

#[test]
fn offsets_are_byte_offsets() {
    let m = matcher(&["scam"]);
    let text = "ça scam";
    let found = m.find_matches(text);
    assert_eq!(found.len(), 1);
    assert_eq!(&text[found[0].start..found[0].end], "scam");
}

#[test]
fn matches_sorted_across_keywords() {
    let m = matcher(&["c", "b", "a"]);
    let found = m.find_matches("a b c a");
    let starts: Vec<usize> = found.iter().map(|k| k.start).collect();
    assert_eq!(starts, vec![0, 2, 4, 6]);
}

// ============================================================
// Mutation
// ============================================================

#[test]
fn add_and_remove_rebuild_patterns() {
    let mut m = KeywordMatcher::new();
    assert!(!m.has_match("phishing link"));
    m.add_keyword("phishing");
    assert!(m.has_match("phishing link"));
    m.remove_keyword("phishing");
    assert!(!m.has_match("phishing link"));
    assert!(m.is_empty());
}

#[test]
fn keywords_listed_sorted() {
    let m = matcher(&["zebra", "apple", "apple"]);
    let listed: Vec<&str> = m.keywords().collect();
    assert_eq!(listed, vec!["apple", "zebra"]);
}

#[test]
fn has_match_agrees_with_find_matches() {
    let m = matcher(&["fraud", "!!", "x.y"]);
    for text in ["", "nothing here", "fraudulent", "FRAUD!", "wow!!", "x.y.z", "xzy"] {
        assert_eq!(
            m.has_match(text),
            !m.find_matches(text).is_empty(),
            "disagreement on {text:?}"
        );
    }
}
