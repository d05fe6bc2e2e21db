// Cosine similarity matrices.
//
// Rows coming out of the vectorizer are L2-normalized (or all-zero), so
// cosine similarity is a plain dot product and two zero rows score 0, never
// NaN. Every matrix element is one independent row-pair dot product, which
// makes the chunked cross computation bit-identical to an unchunked one for
// any chunk size.

use ndarray::Array2;

/// Dense n×n self-similarity matrix. Symmetric by construction: each
/// unordered pair is computed once and mirrored.
pub fn internal_similarity(rows: &Array2<f64>) -> Array2<f64> {
    let n = rows.nrows();
    let mut out = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        let row_i = rows.row(i);
        for j in i..n {
            let s = row_i.dot(&rows.row(j));
            out[[i, j]] = s;
            out[[j, i]] = s;
        }
    }
    out
}

/// Dense m×p query-vs-reference similarity, computed in column chunks.
///
/// The reference side may be far larger than the query side (a master
/// glossary of tens of thousands of entries), so its rows are processed in
/// contiguous chunks of `chunk_size` to bound peak working-set size. The
/// result is assembled into the matching column slice of a preallocated
/// m×p matrix; the last chunk is whatever remainder is left.
pub fn cross_similarity(
    query: &Array2<f64>,
    reference: &Array2<f64>,
    chunk_size: usize,
) -> Array2<f64> {
    assert!(chunk_size >= 1, "chunk size must be at least 1");
    let m = query.nrows();
    let p = reference.nrows();
    let mut out = Array2::<f64>::zeros((m, p));

    for (start, end) in chunk_ranges(p, chunk_size) {
        for i in 0..m {
            let row_i = query.row(i);
            for j in start..end {
                out[[i, j]] = row_i.dot(&reference.row(j));
            }
        }
    }
    out
}

/// Contiguous (start, end) chunk bounds covering `0..len`. The final chunk
/// holds the remainder when `chunk_size` does not divide `len`.
pub fn chunk_ranges(len: usize, chunk_size: usize) -> Vec<(usize, usize)> {
    (0..len)
        .step_by(chunk_size)
        .map(|start| (start, (start + chunk_size).min(len)))
        .collect()
}
