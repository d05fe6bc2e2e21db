// Character n-gram TF-IDF vectorization.
//
// Terms are short strings, so whitespace tokenization is useless for
// near-duplicate detection ("safety standard" vs "safety standards").
// Instead each string becomes a bag of overlapping character bigrams, TF-IDF
// weighted and L2-normalized so cosine similarity is a plain dot product.
//
// The weighting reproduces the historical formula exactly — raw n-gram count
// times smoothed idf `ln((1 + n_docs) / (1 + df)) + 1` — so scores stay
// comparable to previously published reports.

use std::collections::BTreeSet;

use anyhow::Result;
use indexmap::IndexMap;
use ndarray::Array2;
use tracing::debug;

use crate::config::NGRAM_LEN;

/// Builder for a fitted vectorizer. Carries only the n-gram length.
#[derive(Debug, Clone, Copy)]
pub struct NgramVectorizer {
    n: usize,
}

impl Default for NgramVectorizer {
    fn default() -> Self {
        Self { n: NGRAM_LEN }
    }
}

impl NgramVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit on a reference corpus, fixing the vocabulary and idf weights.
    ///
    /// Every distinct n-gram is kept (minimum document frequency 1). Fails if
    /// the corpus is empty or yields no n-grams at all — no vocabulary can be
    /// derived, and every later transform would be a matrix of zeros.
    pub fn fit<S: AsRef<str>>(&self, corpus: &[S]) -> Result<FittedVectorizer> {
        if corpus.is_empty() {
            anyhow::bail!("Cannot fit vectorizer on an empty corpus");
        }

        // Document frequency per n-gram. The vocabulary is sorted so the
        // column order (and everything downstream) is deterministic.
        let mut all_grams: BTreeSet<String> = BTreeSet::new();
        let doc_grams: Vec<BTreeSet<String>> = corpus
            .iter()
            .map(|s| ngrams(s.as_ref(), self.n).into_iter().collect())
            .collect();
        for grams in &doc_grams {
            all_grams.extend(grams.iter().cloned());
        }

        if all_grams.is_empty() {
            anyhow::bail!(
                "Corpus of {} strings produced no {}-grams — no vocabulary derivable",
                corpus.len(),
                self.n
            );
        }

        let vocabulary: IndexMap<String, usize> = all_grams
            .into_iter()
            .enumerate()
            .map(|(i, g)| (g, i))
            .collect();

        let mut df = vec![0u64; vocabulary.len()];
        for grams in &doc_grams {
            for gram in grams {
                df[vocabulary[gram]] += 1;
            }
        }

        // Smoothed idf, matching the historical weighting.
        let n_docs = corpus.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n_docs) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        debug!(
            docs = corpus.len(),
            vocabulary = vocabulary.len(),
            "Fitted n-gram vectorizer"
        );

        Ok(FittedVectorizer {
            n: self.n,
            vocabulary,
            idf,
        })
    }
}

/// A vectorizer with a fixed vocabulary and idf weights.
///
/// Batches are transformed against the fitted vocabulary — never refit — so
/// scores stay comparable across batches and across tiers. N-grams unseen at
/// fit time are ignored.
#[derive(Debug, Clone)]
pub struct FittedVectorizer {
    n: usize,
    vocabulary: IndexMap<String, usize>,
    idf: Vec<f64>,
}

impl FittedVectorizer {
    pub fn vocab_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Transform a batch of strings into L2-normalized TF-IDF rows.
    ///
    /// A string with fewer than n characters after stripping yields a zero
    /// row: similarity 0 to everything, never a false match.
    pub fn transform<S: AsRef<str>>(&self, batch: &[S]) -> Array2<f64> {
        let mut rows = Array2::<f64>::zeros((batch.len(), self.vocabulary.len()));

        for (i, s) in batch.iter().enumerate() {
            let mut row = rows.row_mut(i);
            for gram in ngrams(s.as_ref(), self.n) {
                if let Some(&j) = self.vocabulary.get(&gram) {
                    row[j] += 1.0;
                }
            }
            for (j, idf) in self.idf.iter().enumerate() {
                row[j] *= idf;
            }
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|v| v / norm);
            }
        }

        rows
    }
}

/// All overlapping character n-grams of a string, after stripping the fixed
/// punctuation/quote/whitespace character class.
///
/// The character class must not change: it is part of the scoring contract
/// that keeps output comparable to historical reports.
pub fn ngrams(text: &str, n: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().filter(|c| !is_stripped(*c)).collect();
    if chars.len() < n {
        return Vec::new();
    }
    chars
        .windows(n)
        .map(|w| w.iter().collect::<String>())
        .collect()
}

fn is_stripped(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '\u{201C}' | '\u{201D}' | '"' | ',' | '-' | '.' | '/' | '#' | '!' | '&' | '(' | ')'
        )
}
