// Policy engine — normalize once, run every rule, sum the weights.
//
// The engine owns its rule collection. Evaluation only borrows it, so
// concurrent `evaluate` calls are fine; mutation needs `&mut self`, which
// forces hosts to serialize configuration changes (or swap a snapshot,
// e.g. behind an `Arc<RwLock<PolicyEngine>>`).

use std::collections::BTreeMap;

use tracing::{debug, debug_span, warn};

use super::rules::{default_rules, PolicyRule, FAST_PATH_RULE_IDS};
use super::verdict::{EvaluationMode, PolicyVerdict};
use crate::content::{normalize, NormalizedContent};

/// An ordered collection of weighted rules.
#[derive(Debug, Clone, Default)]
pub struct PolicyEngine {
    rules: Vec<PolicyRule>,
}

impl PolicyEngine {
    /// An engine with no rules. Everything evaluates to allow.
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine preloaded with the reference rule set.
    pub fn with_default_rules() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    /// Append a rule. Ids are not deduplicated.
    pub fn add_rule(&mut self, rule: PolicyRule) {
        debug!(rule = %rule.id, weight = rule.weight, "Adding policy rule");
        self.rules.push(rule);
    }

    /// Remove every rule with the given id. Returns how many were removed.
    pub fn remove_rule(&mut self, id: &str) -> usize {
        let before = self.rules.len();
        self.rules.retain(|rule| rule.id != id);
        before - self.rules.len()
    }

    pub fn rules(&self) -> &[PolicyRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluate `text` against every registered rule.
    pub fn evaluate(&self, text: &str) -> PolicyVerdict {
        self.evaluate_in(text, EvaluationMode::Full)
    }

    /// Evaluate `text` against the fast-path rules only, with the more
    /// conservative fast-path thresholds.
    pub fn evaluate_fast_path(&self, text: &str) -> PolicyVerdict {
        self.evaluate_in(text, EvaluationMode::FastPath)
    }

    /// Evaluate `text` in the given mode.
    pub fn evaluate_in(&self, text: &str, mode: EvaluationMode) -> PolicyVerdict {
        let span = debug_span!("evaluate", mode = %mode);
        let _guard = span.enter();

        let content = normalize(text);
        self.score(&content, mode)
    }

    /// Score already-normalized content. Callers that need the extracted
    /// signals as well can normalize once and reuse them here.
    pub fn score(&self, content: &NormalizedContent, mode: EvaluationMode) -> PolicyVerdict {
        let mut scores = BTreeMap::new();
        let mut rules_matched = Vec::new();
        let mut total_score = 0.0;

        for rule in self.rules.iter().filter(|rule| mode_allows(mode, rule)) {
            match rule.matches(content) {
                Ok(true) => {
                    debug!(rule = %rule.id, weight = rule.weight, "Rule matched");
                    scores.insert(rule.id.clone(), rule.weight);
                    rules_matched.push(rule.name.clone());
                    total_score += rule.weight;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(rule = %rule.id, error = %e, "Rule matcher failed, treating as unmatched");
                }
            }
        }

        let verdict = PolicyVerdict::new(mode, total_score, scores, rules_matched);
        debug!(
            verdict = %verdict.verdict,
            total_score,
            matched = verdict.rules_matched.len(),
            "Evaluation complete"
        );
        verdict
    }
}

fn mode_allows(mode: EvaluationMode, rule: &PolicyRule) -> bool {
    match mode {
        EvaluationMode::Full => true,
        EvaluationMode::FastPath => FAST_PATH_RULE_IDS.contains(&rule.id.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::verdict::Verdict;
    use anyhow::Result;

    fn always(id: &str, weight: f64) -> PolicyRule {
        PolicyRule::new(id, id.to_uppercase(), "", weight, |_: &NormalizedContent| -> Result<bool> {
            Ok(true)
        })
    }

    #[test]
    fn test_empty_engine_allows() {
        let verdict = PolicyEngine::new().evaluate("anything at all");
        assert_eq!(verdict.verdict, Verdict::Allow);
        assert_eq!(verdict.total_score, 0.0);
        assert!(verdict.scores.is_empty());
        assert!(verdict.rules_matched.is_empty());
    }

    #[test]
    fn test_weights_sum_in_rule_order() {
        let mut engine = PolicyEngine::new();
        engine.add_rule(always("b", 30.0));
        engine.add_rule(always("a", 25.0));
        let verdict = engine.evaluate("x");
        assert_eq!(verdict.total_score, 55.0);
        assert_eq!(verdict.verdict, Verdict::Review);
        assert_eq!(verdict.rules_matched, vec!["B", "A"]);
    }

    #[test]
    fn test_duplicate_ids_overwrite_score_but_both_count() {
        let mut engine = PolicyEngine::new();
        engine.add_rule(always("dup", 50.0));
        engine.add_rule(always("dup", 40.0));
        let verdict = engine.evaluate("x");
        assert_eq!(verdict.total_score, 90.0);
        assert_eq!(verdict.scores.get("dup"), Some(&40.0));
        assert_eq!(verdict.rules_matched.len(), 2);
        assert_eq!(verdict.verdict, Verdict::Block);
    }

    #[test]
    fn test_remove_rule_removes_all_with_id() {
        let mut engine = PolicyEngine::new();
        engine.add_rule(always("dup", 10.0));
        engine.add_rule(always("keep", 10.0));
        engine.add_rule(always("dup", 10.0));
        assert_eq!(engine.remove_rule("dup"), 2);
        assert_eq!(engine.len(), 1);
        assert_eq!(engine.remove_rule("missing"), 0);
    }

    #[test]
    fn test_failing_matcher_is_skipped() {
        let mut engine = PolicyEngine::new();
        engine.add_rule(PolicyRule::new(
            "broken",
            "Broken",
            "",
            100.0,
            |_: &NormalizedContent| -> Result<bool> { anyhow::bail!("lookup unavailable") },
        ));
        engine.add_rule(always("ok", 60.0));
        let verdict = engine.evaluate("x");
        assert_eq!(verdict.total_score, 60.0);
        assert_eq!(verdict.rules_matched, vec!["OK"]);
        assert_eq!(verdict.verdict, Verdict::Review);
    }

    #[test]
    fn test_fast_path_ignores_other_ids() {
        let mut engine = PolicyEngine::new();
        engine.add_rule(always("custom", 500.0));
        engine.add_rule(always("excessive_caps", 30.0));
        let verdict = engine.evaluate_fast_path("x");
        assert_eq!(verdict.total_score, 30.0);
        assert_eq!(verdict.rules_matched, vec!["EXCESSIVE_CAPS"]);
        assert_eq!(verdict.mode, EvaluationMode::FastPath);

        let full = engine.evaluate("x");
        assert_eq!(full.total_score, 530.0);
        assert_eq!(full.verdict, Verdict::Block);
    }

    #[test]
    fn test_matcher_sees_normalized_content() {
        let mut engine = PolicyEngine::new();
        engine.add_rule(PolicyRule::new(
            "mentions",
            "Mentions",
            "",
            50.0,
            |c: &NormalizedContent| -> Result<bool> {
                Ok(c.normalized_text == "hi @bob" && c.mentions == ["Bob"])
            },
        ));
        assert_eq!(engine.evaluate("  Hi   @Bob ").verdict, Verdict::Review);
    }
}
