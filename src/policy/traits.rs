// Rule matcher trait — the detection strategy behind a policy rule.
//
// Rules keep their id, name and weight as plain data; what a rule actually
// looks for lives behind this trait, so new strategies plug in without
// touching the engine.

use anyhow::Result;

use crate::content::NormalizedContent;

/// A predicate over normalized content.
///
/// Implementations should be total. If one does return an error, the engine
/// logs it and treats the rule as unmatched for that evaluation.
pub trait RuleMatcher: Send + Sync {
    /// Decide whether this rule fires for `content`.
    fn matches(&self, content: &NormalizedContent) -> Result<bool>;
}

/// Closures work as ad-hoc matchers for host-defined rules.
impl<F> RuleMatcher for F
where
    F: Fn(&NormalizedContent) -> Result<bool> + Send + Sync,
{
    fn matches(&self, content: &NormalizedContent) -> Result<bool> {
        self(content)
    }
}
