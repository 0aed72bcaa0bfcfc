// Verdict records — the structured form of a verdict handed to logging.
//
// Records are always redacted before they reach a tracing subscriber.
// Rule ids land as keys in the score map, so a rule named e.g.
// `api_key_leak` has its score hidden like any other sensitive field.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::redact::redact;
use crate::output::truncate_chars;
use crate::policy::{EvaluationMode, PolicyVerdict, Verdict};

/// How much of the message text a record keeps.
pub const PREVIEW_CHARS: usize = 80;

/// A loggable snapshot of one evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct VerdictRecord {
    pub evaluated_at: DateTime<Utc>,
    pub mode: EvaluationMode,
    pub verdict: Verdict,
    pub total_score: f64,
    pub scores: BTreeMap<String, f64>,
    pub rules_matched: Vec<String>,
    pub text_preview: String,
    /// Caller-supplied metadata (channel, message id, ...).
    #[serde(skip_serializing_if = "Value::is_null")]
    pub context: Value,
}

impl VerdictRecord {
    pub fn new(text: &str, verdict: &PolicyVerdict) -> Self {
        Self {
            evaluated_at: Utc::now(),
            mode: verdict.mode,
            verdict: verdict.verdict,
            total_score: verdict.total_score,
            scores: verdict.scores.clone(),
            rules_matched: verdict.rules_matched.clone(),
            text_preview: truncate_chars(text, PREVIEW_CHARS),
            context: Value::Null,
        }
    }

    /// Attach host metadata. It is redacted along with the rest of the record.
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = context;
        self
    }

    /// Serialize and redact.
    pub fn to_redacted_json(&self) -> Result<Value> {
        let value = serde_json::to_value(self).context("Failed to serialize verdict record")?;
        Ok(redact(value))
    }
}

/// Emit a redacted verdict record at info level.
pub fn log_verdict(record: &VerdictRecord) -> Result<()> {
    let json = record.to_redacted_json()?;
    info!(
        verdict = %record.verdict,
        mode = %record.mode,
        record = %json,
        "Content evaluated"
    );
    Ok(())
}
