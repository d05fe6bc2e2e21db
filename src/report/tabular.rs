// Tab-separated table rendering.
//
// Row and header shapes are consumed by downstream review tooling and must
// not drift. In particular the header is derived arithmetically from the
// widest row of the result set — it is not carried as a flag anywhere — and
// that derivation is part of the output contract.

use crate::dedup::{CrossRecord, InternalRecord};

/// Render a similarity score the way historical reports did: rounded to 3
/// decimals, printed in shortest form (`0.9`, not `0.900`), with integral
/// values keeping one decimal place (`1.0`).
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{score:.1}")
    } else {
        format!("{score}")
    }
}

/// Rows for a tier's internal report: `idx\tterm` for unique terms,
/// `idx\tterm\tidx2\tmatched\tscore` for near-duplicates.
pub fn internal_rows(records: &[InternalRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| match &r.matched {
            Some(m) => format!(
                "{}\t{}\t{}\t{}\t{}",
                r.index,
                r.term,
                m.index,
                m.term,
                format_score(m.score)
            ),
            None => format!("{}\t{}", r.index, r.term),
        })
        .collect()
}

/// Rows for a tier's vs-master report. The master columns are always
/// present — two empty fields when there is no match — followed by the
/// internal-duplicate columns when the record carries one.
pub fn cross_rows(records: &[CrossRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| {
            let mut fields = vec![r.index.to_string(), r.term.clone()];
            match &r.master {
                Some(m) => {
                    fields.push(m.line.clone());
                    fields.push(format_score(m.score));
                }
                None => {
                    fields.push(String::new());
                    fields.push(String::new());
                }
            }
            if let Some(m) = &r.internal {
                fields.push(m.index.to_string());
                fields.push(m.term.clone());
                fields.push(format_score(m.score));
            }
            fields.join("\t")
        })
        .collect()
}

/// Derive the header for a rendered vs-master table.
///
/// Let W be one more than the widest row's trimmed field count (trailing
/// empty fields do not count, matching how consumers parse these files).
/// W == 3 means no row carries any match: emit the bare two-column header.
/// Otherwise emit the full four-column header plus one repeated
/// three-column group per internal-duplicate tier present, (W − 5) / 3 of
/// them. The arithmetic goes negative on an empty result set; the repeat
/// count clamps to zero and the four-column header stands alone.
pub fn derive_header(rows: &[String]) -> String {
    let max_width = rows
        .iter()
        .map(|row| row.trim().split('\t').count() + 1)
        .max()
        .unwrap_or(0);

    if max_width == 3 {
        return "idx\tterm".to_string();
    }

    let groups = ((max_width as i64 - 5) / 3).max(0) as usize;
    let mut header = String::from("idx\tterm\tmatched_master_entry\tscore");
    header.push_str(&"\tidx2\tinternal_duplicate\tsim_score".repeat(groups));
    header
}
