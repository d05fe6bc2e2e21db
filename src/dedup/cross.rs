// Cross-reference classification: surviving terms vs the master glossary.
//
// A second, independent application of the same two-threshold policy. Each
// row of the similarity table corresponds to one surviving internal record;
// the argmax master column decides whether the row is dropped (verbatim
// match already in the glossary), annotated with the matched entry, or
// passed through with empty match fields.
//
// The master list is an explicit parameter everywhere — scores and matched
// lines both come from the slice the caller passes in.

use ndarray::Array2;

use crate::config::CANDIDATE_FLOOR;
use crate::corpus::MasterEntry;

use super::{round3, InternalMatch, InternalRecord};

/// The best master-glossary match found for a term.
#[derive(Debug, Clone, PartialEq)]
pub struct MasterMatch {
    /// The matched entry's original `term|identifier` line.
    pub line: String,
    /// Cosine similarity, rounded to 3 decimals.
    pub score: f64,
}

/// One row of a tier's vs-master report.
#[derive(Debug, Clone, PartialEq)]
pub struct CrossRecord {
    pub index: usize,
    pub term: String,
    /// Best master match above the candidate floor, if any.
    pub master: Option<MasterMatch>,
    /// Internal near-duplicate carried over from the internal tier.
    pub internal: Option<InternalMatch>,
}

/// Annotate each surviving internal record with its best master match.
///
/// `sims` rows align with `records` (row k scores record k against every
/// master entry). A rounded argmax score above `cutoff` drops the record
/// entirely; above the candidate floor it is annotated; otherwise the match
/// fields stay empty. Unlike the internal pass, the score is rounded to 3
/// decimals before the cutoff comparison — historical behavior that the
/// report format preserves.
pub fn classify_vs_master(
    records: &[InternalRecord],
    sims: &Array2<f64>,
    master: &[MasterEntry],
    cutoff: f64,
) -> Vec<CrossRecord> {
    debug_assert_eq!(records.len(), sims.nrows());
    debug_assert_eq!(master.len(), sims.ncols());

    let mut out = Vec::new();

    for (k, record) in records.iter().enumerate() {
        let row = sims.row(k);
        let any_candidate = row.iter().any(|&s| s > CANDIDATE_FLOOR);

        let master_match = if any_candidate {
            // First-max argmax over the whole row
            let mut best = (0usize, f64::NEG_INFINITY);
            for (j, &s) in row.iter().enumerate() {
                if s > best.1 {
                    best = (j, s);
                }
            }
            let score = round3(best.1);
            if score > cutoff {
                continue; // verbatim match already in master
            }
            Some(MasterMatch {
                line: master[best.0].line.clone(),
                score,
            })
        } else {
            None
        };

        out.push(CrossRecord {
            index: record.index,
            term: record.term.clone(),
            master: master_match,
            internal: record.matched.clone(),
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn entry(line: &str) -> MasterEntry {
        MasterEntry {
            key: line.split('|').next().unwrap().to_lowercase(),
            line: line.to_string(),
        }
    }

    fn bare(index: usize, term: &str) -> InternalRecord {
        InternalRecord {
            index,
            term: term.to_string(),
            matched: None,
        }
    }

    #[test]
    fn annotates_best_master_entry() {
        let records = [bare(0, "Safety Standards")];
        let master = [entry("Safety Standard|W001"), entry("Hazard|W002")];
        let sims = array![[0.95, 0.3]];
        let out = classify_vs_master(&records, &sims, &master, 0.99);
        let m = out[0].master.as_ref().unwrap();
        assert_eq!(m.line, "Safety Standard|W001");
        assert!((m.score - 0.95).abs() < 1e-12);
    }

    #[test]
    fn rounded_score_above_cutoff_drops_row() {
        let records = [bare(0, "Safety Standards"), bare(1, "New Term")];
        let master = [entry("Safety Standard|W001")];
        let sims = array![[0.95], [0.2]];
        let out = classify_vs_master(&records, &sims, &master, 0.90);
        // First row dropped, second passes through with empty match fields
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].term, "New Term");
        assert!(out[0].master.is_none());
    }

    #[test]
    fn rounding_happens_before_cutoff_comparison() {
        // Raw 0.9004 rounds to 0.9, which is not > 0.9: annotated, not dropped
        let records = [bare(0, "A")];
        let master = [entry("a|1")];
        let sims = array![[0.9004]];
        let out = classify_vs_master(&records, &sims, &master, 0.90);
        assert_eq!(out.len(), 1);
        assert!((out[0].master.as_ref().unwrap().score - 0.9).abs() < 1e-12);

        // Raw 0.8996 rounds to 0.9 as well — same outcome even though the
        // raw value is below the cutoff
        let sims = array![[0.8996]];
        let out = classify_vs_master(&records, &sims, &master, 0.90);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn no_candidate_above_floor_keeps_empty_fields() {
        let records = [bare(0, "Novel Term")];
        let master = [entry("Unrelated|W009")];
        let sims = array![[0.5]];
        let out = classify_vs_master(&records, &sims, &master, 0.99);
        assert!(out[0].master.is_none());
    }

    #[test]
    fn internal_match_carried_through() {
        let records = [InternalRecord {
            index: 3,
            term: "A".to_string(),
            matched: Some(InternalMatch {
                index: 7,
                term: "B".to_string(),
                score: 0.85,
            }),
        }];
        let master = [entry("x|1")];
        let sims = array![[0.0]];
        let out = classify_vs_master(&records, &sims, &master, 0.99);
        assert_eq!(out[0].index, 3);
        assert_eq!(out[0].internal.as_ref().unwrap().term, "B");
    }

    #[test]
    fn empty_master_yields_empty_fields() {
        let records = [bare(0, "A")];
        let sims = Array2::<f64>::zeros((1, 0));
        let out = classify_vs_master(&records, &sims, &[], 0.99);
        assert_eq!(out.len(), 1);
        assert!(out[0].master.is_none());
    }

    #[test]
    fn argmax_tie_breaks_toward_first_entry() {
        let records = [bare(0, "A")];
        let master = [entry("first|1"), entry("second|2")];
        let sims = array![[0.9, 0.9]];
        let out = classify_vs_master(&records, &sims, &master, 0.99);
        assert_eq!(out[0].master.as_ref().unwrap().line, "first|1");
    }
}
