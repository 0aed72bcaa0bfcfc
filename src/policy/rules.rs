// Policy rules and the built-in detection strategies.
//
// The reference rule set covers the three cheap signals the fast path
// relies on: denylisted terms, shouting, and link shorteners.

use std::sync::Arc;

use anyhow::Result;

use super::traits::RuleMatcher;
use crate::content::NormalizedContent;
use crate::keywords::KeywordMatcher;

pub const PROFANITY_RULE_ID: &str = "profanity";
pub const EXCESSIVE_CAPS_RULE_ID: &str = "excessive_caps";
pub const SUSPICIOUS_URLS_RULE_ID: &str = "suspicious_urls";

/// Rule ids the fast path evaluates. Rules with any other id are ignored there.
pub const FAST_PATH_RULE_IDS: &[&str] = &[
    PROFANITY_RULE_ID,
    EXCESSIVE_CAPS_RULE_ID,
    SUSPICIOUS_URLS_RULE_ID,
];

/// Terms the reference `profanity` rule looks for.
pub const DEFAULT_DENYLIST: &[&str] = &["alert", "fraud", "phishing", "scam", "spam"];

/// Link-shortener domains the reference `suspicious_urls` rule looks for.
pub const DEFAULT_SHORTENER_DOMAINS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "goo.gl",
    "ow.ly",
    "is.gd",
    "buff.ly",
    "cutt.ly",
    "rebrand.ly",
];

/// A weighted detection rule. Immutable once built; cloning shares the matcher.
#[derive(Clone)]
pub struct PolicyRule {
    /// Stable identifier, used as the score map key. Not required to be unique.
    pub id: String,
    /// Display name reported in matched-rule lists.
    pub name: String,
    pub description: String,
    /// Contribution to the total score when the rule matches.
    pub weight: f64,
    matcher: Arc<dyn RuleMatcher>,
}

impl PolicyRule {
    /// Build a rule. Negative or non-finite weights are clamped to zero.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        weight: f64,
        matcher: impl RuleMatcher + 'static,
    ) -> Self {
        let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            weight,
            matcher: Arc::new(matcher),
        }
    }

    /// Run this rule's matcher.
    pub fn matches(&self, content: &NormalizedContent) -> Result<bool> {
        self.matcher.matches(content)
    }
}

impl std::fmt::Debug for PolicyRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyRule")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish_non_exhaustive()
    }
}

/// Fires when any keyword occurs in the normalized text.
#[derive(Debug)]
pub struct KeywordRuleMatcher {
    keywords: KeywordMatcher,
}

impl KeywordRuleMatcher {
    pub fn new(keywords: KeywordMatcher) -> Self {
        Self { keywords }
    }
}

impl RuleMatcher for KeywordRuleMatcher {
    fn matches(&self, content: &NormalizedContent) -> Result<bool> {
        Ok(self.keywords.has_match(&content.normalized_text))
    }
}

/// Fires when the original text is long enough and mostly uppercase.
#[derive(Debug, Clone)]
pub struct CapsRatioMatcher {
    /// Texts must be strictly longer than this (in chars).
    pub min_length: usize,
    /// Uppercase share must be strictly greater than this.
    pub max_ratio: f64,
}

impl Default for CapsRatioMatcher {
    fn default() -> Self {
        Self {
            min_length: 10,
            max_ratio: 0.7,
        }
    }
}

impl CapsRatioMatcher {
    /// Uppercase letters divided by total length (chars), over the original text.
    pub fn caps_ratio(text: &str) -> f64 {
        let total = text.chars().count();
        if total == 0 {
            return 0.0;
        }
        let upper = text.chars().filter(|c| c.is_uppercase()).count();
        upper as f64 / total as f64
    }
}

impl RuleMatcher for CapsRatioMatcher {
    fn matches(&self, content: &NormalizedContent) -> Result<bool> {
        let text = &content.original_text;
        Ok(text.chars().count() > self.min_length && Self::caps_ratio(text) > self.max_ratio)
    }
}

/// Fires when any extracted URL mentions a known shortener domain.
#[derive(Debug, Clone)]
pub struct ShortenerUrlMatcher {
    domains: Vec<String>,
}

impl ShortenerUrlMatcher {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.into().to_lowercase())
                .collect(),
        }
    }
}

impl Default for ShortenerUrlMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_SHORTENER_DOMAINS.iter().copied())
    }
}

impl RuleMatcher for ShortenerUrlMatcher {
    fn matches(&self, content: &NormalizedContent) -> Result<bool> {
        Ok(content.urls.iter().any(|url| {
            let lower = url.to_lowercase();
            self.domains.iter().any(|d| lower.contains(d.as_str()))
        }))
    }
}

/// Reference `profanity` rule over the given denylist.
pub fn profanity_rule<I, S>(terms: I) -> PolicyRule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    PolicyRule::new(
        PROFANITY_RULE_ID,
        "Profanity",
        "Denylisted term appears as a whole word",
        80.0,
        KeywordRuleMatcher::new(terms.into_iter().collect()),
    )
}

/// Reference `excessive_caps` rule.
pub fn excessive_caps_rule() -> PolicyRule {
    PolicyRule::new(
        EXCESSIVE_CAPS_RULE_ID,
        "Excessive Caps",
        "More than 70% uppercase in a message longer than 10 characters",
        30.0,
        CapsRatioMatcher::default(),
    )
}

/// Reference `suspicious_urls` rule over the given shortener domains.
pub fn suspicious_urls_rule<I, S>(domains: I) -> PolicyRule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    PolicyRule::new(
        SUSPICIOUS_URLS_RULE_ID,
        "Suspicious URLs",
        "Link goes through a known URL shortener",
        60.0,
        ShortenerUrlMatcher::new(domains),
    )
}

/// The reference rule set with default term and domain lists.
pub fn default_rules() -> Vec<PolicyRule> {
    vec![
        profanity_rule(DEFAULT_DENYLIST.iter().copied()),
        excessive_caps_rule(),
        suspicious_urls_rule(DEFAULT_SHORTENER_DOMAINS.iter().copied()),
    ]
}
