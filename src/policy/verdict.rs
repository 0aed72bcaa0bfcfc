// Verdicts, evaluation modes and the threshold function between them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The action a host should take for a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Allow,
    Review,
    Block,
}

impl Verdict {
    /// Map a total risk score to a verdict. Both bounds are inclusive.
    pub fn from_score(score: f64, thresholds: &Thresholds) -> Self {
        match score {
            s if s >= thresholds.block => Verdict::Block,
            s if s >= thresholds.review => Verdict::Review,
            _ => Verdict::Allow,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Allow => "allow",
            Verdict::Review => "review",
            Verdict::Block => "block",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Score cut-offs for one evaluation mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Scores at or above this block outright.
    pub block: f64,
    /// Scores at or above this (but below `block`) go to review.
    pub review: f64,
}

/// Which rule set and thresholds an evaluation used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationMode {
    /// Every registered rule, standard thresholds.
    Full,
    /// Only the built-in cheap rules, with higher thresholds that lean
    /// toward review instead of block.
    FastPath,
}

impl EvaluationMode {
    pub fn thresholds(&self) -> Thresholds {
        match self {
            EvaluationMode::Full => Thresholds {
                block: 80.0,
                review: 50.0,
            },
            EvaluationMode::FastPath => Thresholds {
                block: 100.0,
                review: 70.0,
            },
        }
    }

    /// Label used in verdict reasons.
    pub fn label(&self) -> &'static str {
        match self {
            EvaluationMode::Full => "Risk score",
            EvaluationMode::FastPath => "Fast-path risk score",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationMode::Full => "full",
            EvaluationMode::FastPath => "fast_path",
        }
    }
}

impl std::fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The outcome of evaluating one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyVerdict {
    pub verdict: Verdict,
    /// Human-readable summary embedding the mode and total score.
    pub reason: String,
    /// Weight per matched rule id. When two matched rules share an id, the
    /// later one's weight is the one shown here; `total_score` counts both.
    pub scores: BTreeMap<String, f64>,
    /// Display names of matched rules, in evaluation order.
    pub rules_matched: Vec<String>,
    /// Sum of all matched weights.
    pub total_score: f64,
    pub mode: EvaluationMode,
}

impl PolicyVerdict {
    pub(crate) fn new(
        mode: EvaluationMode,
        total_score: f64,
        scores: BTreeMap<String, f64>,
        rules_matched: Vec<String>,
    ) -> Self {
        let verdict = Verdict::from_score(total_score, &mode.thresholds());
        Self {
            verdict,
            reason: format!("{}: {}", mode.label(), total_score),
            scores,
            rules_matched,
            total_score,
            mode,
        }
    }
}
