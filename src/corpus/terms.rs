// The candidate term corpus: terms with their review contexts.
//
// The corpus is a JSON map from term (original casing preserved) to its
// recorded context snippets and source identifier, produced upstream by the
// extraction step. Map order is the corpus order and matters: internal
// comparison is forward-only over term indices.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;

use crate::config::AggregationPolicy;

/// One candidate vocabulary entry.
#[derive(Debug, Clone)]
pub struct Term {
    /// The term as extracted, original casing preserved for reporting.
    pub raw: String,
    /// Lowercase normalized key; unique within a TermIndex.
    pub key: String,
    /// Context snippets recorded around occurrences of the term,
    /// deduplicated in first-seen order.
    pub contexts: Vec<String>,
    /// Identifier of the source the term was extracted from.
    pub source: String,
}

/// Insertion-ordered collection of Terms with unique lowercase keys.
#[derive(Debug, Default)]
pub struct TermIndex {
    entries: IndexMap<String, Term>,
}

impl TermIndex {
    /// Build an index from (term, contexts, source) records.
    ///
    /// Records whose lowercase key collides with an earlier one are merged
    /// according to `policy`. Contexts are deduplicated order-preservingly,
    /// so the index (and every report derived from it) is reproducible.
    pub fn from_records<I, S>(records: I, policy: AggregationPolicy) -> Self
    where
        I: IntoIterator<Item = (S, Vec<String>, String)>,
        S: Into<String>,
    {
        let mut entries: IndexMap<String, Term> = IndexMap::new();

        for (raw, contexts, source) in records {
            let raw = raw.into();
            let key = raw.to_lowercase();

            match entries.get_mut(&key) {
                None => {
                    entries.insert(
                        key.clone(),
                        Term {
                            raw,
                            key,
                            contexts: dedup_preserving_order(contexts),
                            source,
                        },
                    );
                }
                Some(existing) => {
                    let merge = match policy {
                        AggregationPolicy::MergeAll => true,
                        AggregationPolicy::FirstSourceWins => existing.source == source,
                    };
                    if merge {
                        existing.contexts.extend(contexts);
                        existing.contexts =
                            dedup_preserving_order(std::mem::take(&mut existing.contexts));
                    } else {
                        debug!(term = %raw, source = %source, "Dropping colliding entry from later source");
                    }
                }
            }
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Term> {
        self.entries.values()
    }

    /// Look up a term by any casing of its text.
    pub fn get(&self, term: &str) -> Option<&Term> {
        self.entries.get(&term.to_lowercase())
    }

    /// Original-cased terms in corpus order.
    pub fn raw_terms(&self) -> Vec<&str> {
        self.entries.values().map(|t| t.raw.as_str()).collect()
    }

    /// Lowercase keys in corpus order — the strings fed to the vectorizer.
    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(|k| k.as_str()).collect()
    }
}

/// Shape of one corpus JSON value. The current extractor writes an object
/// with contexts and a source identifier; older corpora carry a bare context
/// array, which is still accepted (with an empty source).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CorpusEntry {
    Detailed {
        contexts: Vec<String>,
        #[serde(alias = "filename")]
        source: String,
    },
    Bare(Vec<String>),
}

/// Load the term/context corpus from a JSON file.
///
/// Fatal on unreadable files or malformed JSON — this is an offline batch
/// tool and there is nothing sensible to do with a broken corpus.
pub fn load_corpus(path: &Path, policy: AggregationPolicy) -> Result<TermIndex> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus file {}", path.display()))?;
    let raw: IndexMap<String, CorpusEntry> = serde_json::from_str(&text)
        .with_context(|| format!("Malformed corpus JSON in {}", path.display()))?;

    let records = raw.into_iter().map(|(term, entry)| match entry {
        CorpusEntry::Detailed { contexts, source } => (term, contexts, source),
        CorpusEntry::Bare(contexts) => (term, contexts, String::new()),
    });

    Ok(TermIndex::from_records(records, policy))
}

fn dedup_preserving_order(contexts: Vec<String>) -> Vec<String> {
    let mut seen = indexmap::IndexSet::new();
    for c in contexts {
        seen.insert(c);
    }
    seen.into_iter().collect()
}
