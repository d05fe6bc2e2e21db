// Tiered duplicate classification.
//
// Two thresholds govern every decision: the fixed candidate floor (0.8),
// below which no match is ever reported, and the tier's suppression cutoff,
// above which a term is treated as an already-captured exact duplicate and
// dropped from that tier's report. The same similarity matrix serves all
// three tiers; only the cutoff varies, so suppression sets are monotone in
// the cutoff.

pub mod cross;
pub mod internal;

pub use cross::{classify_vs_master, CrossRecord, MasterMatch};
pub use internal::{classify_internal, InternalMatch, InternalRecord};

/// Round a similarity score to 3 decimals for reporting.
pub fn round3(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}
