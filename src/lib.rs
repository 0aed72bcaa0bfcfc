// Cinder: deterministic moderation pre-filter for short text.
//
// This is the library root. The pipeline runs raw text -> normalized
// content -> rule matches -> weighted verdict; each module below owns one
// stage or one ambient concern.

pub mod config;
pub mod content;
pub mod keywords;
pub mod output;
pub mod policy;
pub mod telemetry;

pub use content::{normalize, NormalizedContent};
pub use keywords::{KeywordMatch, KeywordMatcher};
pub use policy::{EvaluationMode, PolicyEngine, PolicyRule, PolicyVerdict, RuleMatcher, Verdict};
