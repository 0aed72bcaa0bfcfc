use std::env;

use anyhow::Result;

use crate::policy::rules::{
    excessive_caps_rule, profanity_rule, suspicious_urls_rule, DEFAULT_DENYLIST,
    DEFAULT_SHORTENER_DOMAINS,
};
use crate::policy::{EvaluationMode, PolicyEngine};

/// Host configuration loaded from environment variables.
///
/// The binary loads a `.env` file first via dotenvy, so any of these can
/// live there instead of the shell environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Evaluation mode used when the CLI is not told otherwise (CINDER_MODE).
    pub default_mode: EvaluationMode,
    /// Extra denylist terms for the profanity rule (CINDER_EXTRA_TERMS).
    pub extra_terms: Vec<String>,
    /// Extra shortener domains for the suspicious URL rule (CINDER_EXTRA_SHORTENERS).
    pub extra_shorteners: Vec<String>,
    /// Emit a redacted verdict record per evaluation (CINDER_LOG_VERDICTS).
    pub log_verdicts: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_mode: EvaluationMode::Full,
            extra_terms: Vec::new(),
            extra_shorteners: Vec::new(),
            log_verdicts: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables. Everything is optional.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable source. `load` uses the process
    /// environment; tests pass a map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let default_mode = match lookup("CINDER_MODE").as_deref().map(str::trim) {
            None | Some("") | Some("full") => EvaluationMode::Full,
            Some("fast") | Some("fast_path") => EvaluationMode::FastPath,
            Some(other) => anyhow::bail!(
                "CINDER_MODE must be `full` or `fast`, got `{other}`.\n\
                 Fix the value in your environment or .env file."
            ),
        };

        let log_verdicts = matches!(
            lookup("CINDER_LOG_VERDICTS").as_deref().map(str::trim),
            Some("1") | Some("true") | Some("yes")
        );

        Ok(Self {
            default_mode,
            extra_terms: split_list(lookup("CINDER_EXTRA_TERMS")),
            extra_shorteners: split_list(lookup("CINDER_EXTRA_SHORTENERS")),
            log_verdicts,
        })
    }

    /// Build the reference engine, extended with the configured extras.
    pub fn build_engine(&self) -> PolicyEngine {
        let terms = DEFAULT_DENYLIST
            .iter()
            .map(|t| t.to_string())
            .chain(self.extra_terms.iter().cloned());
        let domains = DEFAULT_SHORTENER_DOMAINS
            .iter()
            .map(|d| d.to_string())
            .chain(self.extra_shorteners.iter().cloned());

        let mut engine = PolicyEngine::new();
        engine.add_rule(profanity_rule(terms));
        engine.add_rule(excessive_caps_rule());
        engine.add_rule(suspicious_urls_rule(domains));
        engine
    }
}

/// Split a comma-separated list, dropping blanks.
fn split_list(raw: Option<String>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}
