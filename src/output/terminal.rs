// Colored terminal output for verdicts, batch summaries and normalized content.
//
// main.rs delegates all formatting here so the CLI arms stay short.

use colored::Colorize;

use crate::content::NormalizedContent;
use crate::policy::{PolicyVerdict, Verdict};

/// Counts per verdict for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub allow: usize,
    pub review: usize,
    pub block: usize,
}

impl BatchSummary {
    pub fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Allow => self.allow += 1,
            Verdict::Review => self.review += 1,
            Verdict::Block => self.block += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.allow + self.review + self.block
    }
}

/// Display one verdict in detail.
pub fn display_verdict(text: &str, verdict: &PolicyVerdict) {
    println!(
        "\n{}",
        format!("=== Verdict ({}) ===", verdict.mode).bold()
    );
    println!("  Message: {}", super::truncate_chars(text, 120).dimmed());
    println!("  Verdict: {}", colorize_verdict(verdict.verdict));
    println!("  {}", verdict.reason);

    if verdict.rules_matched.is_empty() {
        println!("  No rules matched.");
        return;
    }

    println!("\n  Matched rules:");
    for name in &verdict.rules_matched {
        println!("    - {name}");
    }
    println!("\n  Scores by rule id:");
    for (id, weight) in &verdict.scores {
        println!("    {:<24} {:>6.1}", id, weight);
    }
}

/// Display one line of batch output: verdict, score and a preview.
pub fn display_batch_line(line_no: usize, text: &str, verdict: &PolicyVerdict) {
    println!(
        "  {:>5}  {:<8} {:>6.1}  {}",
        line_no,
        colorize_verdict(verdict.verdict),
        verdict.total_score,
        super::truncate_chars(text, 60).dimmed()
    );
}

/// Display the verdict totals for a batch run.
pub fn display_batch_summary(summary: &BatchSummary) {
    println!(
        "\n{}",
        format!("=== Batch Summary ({} messages) ===", summary.total()).bold()
    );
    if summary.block > 0 {
        println!("  {} {} blocked", "!!".red().bold(), summary.block);
    }
    if summary.review > 0 {
        println!("  {} {} flagged for review", "!".yellow(), summary.review);
    }
    println!("  {} {} allowed", "ok".green(), summary.allow);
}

/// Display the extracted signals for one message.
pub fn display_normalized(content: &NormalizedContent) {
    println!("{}", "=== Normalized Content ===".bold());
    println!("  Normalized: {}", content.normalized_text);
    print_list("URLs", &content.urls);
    print_list("Mentions", &content.mentions);
    print_list("Hashtags", &content.hashtags);
}

fn print_list(label: &str, items: &[String]) {
    if items.is_empty() {
        println!("  {label}: {}", "(none)".dimmed());
    } else {
        println!("  {label}: {}", items.join(", "));
    }
}

/// Colorize a verdict by severity.
fn colorize_verdict(verdict: Verdict) -> colored::ColoredString {
    match verdict {
        Verdict::Block => verdict.as_str().red().bold(),
        Verdict::Review => verdict.as_str().yellow(),
        Verdict::Allow => verdict.as_str().green(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_summary_counts() {
        let mut summary = BatchSummary::default();
        summary.record(Verdict::Allow);
        summary.record(Verdict::Block);
        summary.record(Verdict::Allow);
        assert_eq!(summary.allow, 2);
        assert_eq!(summary.block, 1);
        assert_eq!(summary.total(), 3);
    }
}
