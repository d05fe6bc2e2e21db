// Internal (self-comparison) classification.
//
// Each unordered term pair is considered exactly once: term i is compared
// only against later-indexed candidates, so there is no double counting and
// no self-match. The in-order scan breaks score ties toward the lowest
// candidate index.

use ndarray::Array2;

use crate::config::CANDIDATE_FLOOR;

use super::round3;

/// The best internal match found for a term.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalMatch {
    /// Index of the matched (later) term.
    pub index: usize,
    /// The matched term, original casing.
    pub term: String,
    /// Cosine similarity, rounded to 3 decimals.
    pub score: f64,
}

/// One surviving term in a tier's internal report. Suppressed terms produce
/// no record at all.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalRecord {
    pub index: usize,
    pub term: String,
    pub matched: Option<InternalMatch>,
}

/// Classify every term against the tier cutoff.
///
/// For term i, among candidates j > i with similarity above the candidate
/// floor, the maximum decides:
/// - above `cutoff`: term i is suppressed (an exact duplicate, no record);
/// - above the floor: reported with its best match;
/// - no candidate above the floor: reported bare.
///
/// The raw (unrounded) maximum is compared against the cutoff; rounding
/// happens only for display. Note the asymmetry with the master comparison,
/// which rounds first — both reproduce long-standing report behavior.
pub fn classify_internal(
    terms: &[&str],
    sims: &Array2<f64>,
    cutoff: f64,
) -> Vec<InternalRecord> {
    debug_assert_eq!(terms.len(), sims.nrows());
    debug_assert_eq!(sims.nrows(), sims.ncols());

    let mut records = Vec::new();

    for (i, term) in terms.iter().enumerate() {
        // Forward-only scan; strict > keeps the first (lowest-index) max.
        let mut best: Option<(usize, f64)> = None;
        for j in (i + 1)..terms.len() {
            let s = sims[[i, j]];
            if s > CANDIDATE_FLOOR && best.map_or(true, |(_, b)| s > b) {
                best = Some((j, s));
            }
        }

        match best {
            Some((_, score)) if score > cutoff => continue, // suppressed
            Some((j, score)) => records.push(InternalRecord {
                index: i,
                term: term.to_string(),
                matched: Some(InternalMatch {
                    index: j,
                    term: terms[j].to_string(),
                    score: round3(score),
                }),
            }),
            None => records.push(InternalRecord {
                index: i,
                term: term.to_string(),
                matched: None,
            }),
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn sims_3x3(s01: f64, s02: f64, s12: f64) -> Array2<f64> {
        array![[1.0, s01, s02], [s01, 1.0, s12], [s02, s12, 1.0]]
    }

    #[test]
    fn near_duplicate_reported_with_match() {
        let sims = sims_3x3(0.94, 0.1, 0.2);
        let records = classify_internal(&["A", "B", "C"], &sims, 0.99);
        assert_eq!(records.len(), 3);
        let m = records[0].matched.as_ref().unwrap();
        assert_eq!(m.index, 1);
        assert_eq!(m.term, "B");
        assert!((m.score - 0.94).abs() < 1e-12);
        assert!(records[1].matched.is_none());
        assert!(records[2].matched.is_none());
    }

    #[test]
    fn score_above_cutoff_suppresses_term() {
        let sims = sims_3x3(0.95, 0.1, 0.2);
        let records = classify_internal(&["A", "B", "C"], &sims, 0.90);
        // A is suppressed; B and C survive bare
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].term, "B");
        assert_eq!(records[1].term, "C");
    }

    #[test]
    fn comparison_is_forward_only() {
        // B's only strong pair is with the earlier A, so B itself reports bare
        let sims = sims_3x3(0.85, 0.0, 0.0);
        let records = classify_internal(&["A", "B", "C"], &sims, 0.99);
        assert!(records[0].matched.is_some());
        assert!(records[1].matched.is_none());
    }

    #[test]
    fn ties_break_toward_lowest_index() {
        let sims = array![
            [1.0, 0.9, 0.9],
            [0.9, 1.0, 0.0],
            [0.9, 0.0, 1.0],
        ];
        let records = classify_internal(&["A", "B", "C"], &sims, 0.99);
        assert_eq!(records[0].matched.as_ref().unwrap().index, 1);
    }

    #[test]
    fn score_at_floor_is_not_a_candidate() {
        // Strictly-greater floor: exactly 0.8 reports bare
        let sims = sims_3x3(0.8, 0.0, 0.0);
        let records = classify_internal(&["A", "B", "C"], &sims, 0.99);
        assert!(records[0].matched.is_none());
    }

    #[test]
    fn suppression_sets_are_monotone_in_cutoff() {
        let sims = array![
            [1.0, 0.995, 0.0, 0.0],
            [0.995, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.85],
            [0.0, 0.0, 0.85, 1.0],
        ];
        let terms = ["A", "B", "C", "D"];
        let suppressed = |cutoff: f64| -> Vec<usize> {
            let kept: Vec<usize> = classify_internal(&terms, &sims, cutoff)
                .iter()
                .map(|r| r.index)
                .collect();
            (0..terms.len()).filter(|i| !kept.contains(i)).collect()
        };
        let s99 = suppressed(0.99);
        let s90 = suppressed(0.90);
        let s80 = suppressed(0.80);
        assert_eq!(s99, vec![0]);
        assert_eq!(s90, vec![0]);
        assert_eq!(s80, vec![0, 2]);
        assert!(s99.iter().all(|i| s90.contains(i)));
        assert!(s90.iter().all(|i| s80.contains(i)));
    }

    #[test]
    fn cutoff_above_one_disables_suppression() {
        // check mode runs with cutoff 2.0: every match is reported, none dropped
        let sims = sims_3x3(1.0, 0.0, 0.0);
        let records = classify_internal(&["A", "B", "C"], &sims, 2.0);
        assert_eq!(records.len(), 3);
        assert!((records[0].matched.as_ref().unwrap().score - 1.0).abs() < 1e-12);
    }
}
