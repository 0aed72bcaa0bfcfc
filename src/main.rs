use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use cinder::config::Config;
use cinder::content::urls::{extract_domain, get_etld_plus_one, normalize_url};
use cinder::output::terminal::{self, BatchSummary};
use cinder::telemetry::{log_verdict, VerdictRecord};
use cinder::{EvaluationMode, PolicyEngine, PolicyVerdict};

/// Cinder: fast, deterministic moderation pre-filter.
///
/// Classifies short messages as allow, review or block by scoring them
/// against weighted detection rules.
#[derive(Parser)]
#[command(name = "cinder", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single message
    Check {
        /// The message text
        text: String,

        /// Use the fast-path rule set and thresholds
        #[arg(long)]
        fast: bool,

        /// Print the verdict as JSON instead of a colored summary
        #[arg(long)]
        json: bool,
    },

    /// Evaluate every line of a file as a separate message
    Batch {
        /// Path to a file with one message per line
        file: PathBuf,

        /// Use the fast-path rule set and thresholds
        #[arg(long)]
        fast: bool,
    },

    /// Show how a message is normalized and what gets extracted
    Normalize {
        /// The message text
        text: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Canonicalize a URL and show its domain
    Url {
        /// The URL to inspect
        url: String,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cinder=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { text, fast, json } => {
            let config = Config::load()?;
            let engine = config.build_engine();
            let mode = select_mode(&config, fast);

            let verdict = engine.evaluate_in(&text, mode);
            record_verdict(&config, &text, &verdict);

            if json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                terminal::display_verdict(&text, &verdict);
            }
        }

        Commands::Batch { file, fast } => {
            let config = Config::load()?;
            let engine = config.build_engine();
            let mode = select_mode(&config, fast);

            let contents = fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let messages: Vec<(usize, &str)> = contents
                .lines()
                .enumerate()
                .filter(|(_, line)| !line.trim().is_empty())
                .map(|(i, line)| (i + 1, line))
                .collect();

            info!(messages = messages.len(), mode = %mode, "Starting batch evaluation");
            run_batch(&engine, &config, mode, &messages)?;
        }

        Commands::Normalize { text, json } => {
            let content = cinder::normalize(&text);
            if json {
                println!("{}", serde_json::to_string_pretty(&content)?);
            } else {
                terminal::display_normalized(&content);
            }
        }

        Commands::Url { url } => {
            println!("{}", "=== URL ===".bold());
            println!("  Canonical: {}", normalize_url(&url));
            match extract_domain(&url) {
                Some(domain) => {
                    println!("  Domain: {domain}");
                    println!(
                        "  Registrable (naive): {}",
                        get_etld_plus_one(&domain)
                    );
                }
                None => println!("  Domain: {}", "(unparsable)".dimmed()),
            }
        }
    }

    Ok(())
}

/// `--fast` wins; otherwise the configured default applies.
fn select_mode(config: &Config, fast: bool) -> EvaluationMode {
    if fast {
        EvaluationMode::FastPath
    } else {
        config.default_mode
    }
}

/// Log a redacted record if configured. Logging failures never fail the command.
fn record_verdict(config: &Config, text: &str, verdict: &PolicyVerdict) {
    if !config.log_verdicts {
        return;
    }
    if let Err(e) = log_verdict(&VerdictRecord::new(text, verdict)) {
        warn!(error = %e, "Failed to log verdict record");
    }
}

fn run_batch(
    engine: &PolicyEngine,
    config: &Config,
    mode: EvaluationMode,
    messages: &[(usize, &str)],
) -> Result<()> {
    let progress = ProgressBar::new(messages.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("  [{bar:40}] {pos}/{len} messages")
            .context("Invalid progress bar template")?
            .progress_chars("=> "),
    );

    let mut summary = BatchSummary::default();
    let mut flagged = Vec::new();
    for &(line_no, text) in messages {
        let verdict = engine.evaluate_in(text, mode);
        record_verdict(config, text, &verdict);
        summary.record(verdict.verdict);
        if verdict.verdict != cinder::Verdict::Allow {
            flagged.push((line_no, text, verdict));
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    if !flagged.is_empty() {
        println!("\n{}", "Flagged messages:".bold());
        for (line_no, text, verdict) in &flagged {
            terminal::display_batch_line(*line_no, text, verdict);
        }
    }
    terminal::display_batch_summary(&summary);
    Ok(())
}
