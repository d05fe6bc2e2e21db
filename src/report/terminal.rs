// Colored terminal summary printed at the end of a run.

use colored::Colorize;

/// Per-tier counts gathered while the pipeline runs.
#[derive(Debug, Clone)]
pub struct TierSummary {
    pub label: &'static str,
    pub cutoff: f64,
    /// Terms surviving the internal pass.
    pub internal_kept: usize,
    /// Terms suppressed as internal exact duplicates.
    pub internal_suppressed: usize,
    /// Rows surviving the master comparison.
    pub vs_master_kept: usize,
    /// Surviving rows annotated with a master match.
    pub master_matched: usize,
}

/// Whole-run counts for the terminal summary.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub terms: usize,
    pub master_entries: usize,
    pub tiers: Vec<TierSummary>,
}

/// Display the run summary as a small table.
pub fn display_summary(summary: &RunSummary) {
    println!(
        "\n{}",
        format!(
            "=== Duplicate detection: {} terms vs {} master entries ===",
            summary.terms, summary.master_entries
        )
        .bold()
    );
    println!();
    println!(
        "  {:<6} {:>10} {:>12} {:>10} {:>9}",
        "Tier".dimmed(),
        "Survived".dimmed(),
        "Suppressed".dimmed(),
        "vs Master".dimmed(),
        "Matched".dimmed(),
    );
    println!("  {}", "-".repeat(52).dimmed());

    for tier in &summary.tiers {
        println!(
            "  {:<6} {:>10} {:>12} {:>10} {:>9}",
            format!("{}%", tier.label).bold(),
            tier.internal_kept,
            tier.internal_suppressed,
            tier.vs_master_kept,
            tier.master_matched,
        );
    }
    println!();
}
