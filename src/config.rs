// Central configuration: similarity thresholds, the tier table, and the
// options a single run carries through the pipeline.
//
// The three tiers share one similarity matrix; only the suppression cutoff
// (and the output file names) differ between them.

use std::path::PathBuf;

use anyhow::Result;

/// Similarity floor below which no match is ever reported.
///
/// Below this value (near-)duplicates are very rare, so candidates under it
/// are treated as unique rather than annotated with a weak match.
pub const CANDIDATE_FLOOR: f64 = 0.8;

/// Character n-gram length used for vectorization.
pub const NGRAM_LEN: usize = 2;

/// Default number of reference rows per chunk in the cross-similarity
/// computation. Bounds peak memory when the master glossary is large.
pub const DEFAULT_CHUNK_SIZE: usize = 30_000;

/// Default number of context snippets rendered per term in the HTML report.
pub const DEFAULT_MAX_CONTEXTS: usize = 5;

/// One suppression tier: scores above `cutoff` are treated as already-captured
/// exact duplicates and dropped from that tier's report entirely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub cutoff: f64,
    /// Percent label used in output file names ("99", "90", "80").
    pub label: &'static str,
}

/// The three report tiers, most restrictive suppression first.
pub const TIERS: [Tier; 3] = [
    Tier { cutoff: 0.99, label: "99" },
    Tier { cutoff: 0.90, label: "90" },
    Tier { cutoff: 0.80, label: "80" },
];

impl Tier {
    /// Internal candidate-duplicates file (written to the subdir, no header).
    pub fn internal_filename(&self) -> String {
        format!("02_internal_candidate_duplicates_{}_cutoff.txt", self.label)
    }

    /// Master-comparison file (written to the subdir, no header).
    pub fn vs_master_filename(&self) -> String {
        format!("03_candidate_duplicates_vs_master_{}_cutoff.txt", self.label)
    }

    /// Final reviewer-facing table (written to the output dir, with header).
    pub fn report_filename(&self) -> String {
        format!("duplicates_{}_percent.txt", self.label)
    }

    /// HTML context report (written to the output dir).
    pub fn html_filename(&self) -> String {
        format!("contexts_{}_percent.html", self.label)
    }
}

/// How colliding corpus entries (same lowercase key) are merged into one Term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum AggregationPolicy {
    /// Keep the first entry; extend its contexts only when the colliding
    /// entry comes from the same source (historical behavior).
    FirstSourceWins,
    /// Merge contexts from every colliding entry regardless of source.
    MergeAll,
}

/// Options for one full pipeline run, built from CLI arguments.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// JSON corpus mapping term -> { contexts, source }.
    pub corpus_path: PathBuf,
    /// Pipe-delimited `term|identifier` master glossary.
    pub master_path: PathBuf,
    /// Directory for the final reports (headered tables + HTML).
    pub output_dir: PathBuf,
    /// Directory for the intermediate 02_/03_ tables.
    pub subdir: PathBuf,
    /// Maximum context snippets rendered per term in the HTML report.
    pub max_contexts: usize,
    /// Collision policy for corpus entries sharing a lowercase key.
    pub aggregation: AggregationPolicy,
    /// Reference rows per chunk in the cross-similarity computation.
    pub chunk_size: usize,
}

impl RunOptions {
    /// Check the inputs exist before doing any work. The tool is a batch
    /// run-to-completion job, so a missing input is simply fatal.
    pub fn validate(&self) -> Result<()> {
        if !self.corpus_path.is_file() {
            anyhow::bail!("corpus file not found: {}", self.corpus_path.display());
        }
        if !self.master_path.is_file() {
            anyhow::bail!("master glossary not found: {}", self.master_path.display());
        }
        if self.chunk_size == 0 {
            anyhow::bail!("--chunk-size must be at least 1");
        }
        Ok(())
    }
}
