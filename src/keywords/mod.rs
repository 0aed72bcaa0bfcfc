// Keyword search used by rule matchers.

pub mod matcher;

pub use matcher::{KeywordMatch, KeywordMatcher};
