// The full detection pipeline: corpus -> vectors -> similarity -> tiers ->
// reports, plus the lightweight `check` mode for comparing two glossary
// files directly.
//
// Everything is synchronous and single-pass. Each tier's outputs are written
// as soon as that tier's full result set exists in memory; a crash mid-run
// can leave a partial report set, which is accepted for an offline batch
// tool.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::{RunOptions, DEFAULT_CHUNK_SIZE, TIERS};
use crate::corpus::{load_corpus, load_master};
use crate::dedup::{classify_internal, classify_vs_master};
use crate::report::html::render_contexts;
use crate::report::tabular::{cross_rows, derive_header, internal_rows};
use crate::report::terminal::{RunSummary, TierSummary};
use crate::report::write_lines;
use crate::similarity::{cross_similarity, internal_similarity, NgramVectorizer};

/// Run the full pipeline: internal tiers, master comparison, all report
/// files. Returns counts for the terminal summary.
pub fn run(options: &RunOptions) -> Result<RunSummary> {
    options.validate()?;
    fs::create_dir_all(&options.output_dir)
        .with_context(|| format!("Failed to create {}", options.output_dir.display()))?;
    fs::create_dir_all(&options.subdir)
        .with_context(|| format!("Failed to create {}", options.subdir.display()))?;

    // Corpus and master glossary are loaded once and immutable afterwards
    let terms = load_corpus(&options.corpus_path, options.aggregation)?;
    info!(terms = terms.len(), "Loaded term corpus");

    let master = load_master(&options.master_path)?;
    info!(entries = master.len(), "Loaded master glossary");

    // Internal similarity: fit on the candidate terms themselves
    let keys = terms.keys();
    let internal_fitted = NgramVectorizer::new().fit(&keys)?;
    let term_matrix = internal_fitted.transform(&keys);
    let internal_sims = internal_similarity(&term_matrix);
    info!(vocabulary = internal_fitted.vocab_len(), "Computed internal similarity matrix");

    // Master similarity space: fit once on the glossary, reuse for every tier
    let master_keys: Vec<&str> = master.iter().map(|e| e.key.as_str()).collect();
    let master_fitted = NgramVectorizer::new().fit(&master_keys)?;
    let master_matrix = master_fitted.transform(&master_keys);

    let raw_terms = terms.raw_terms();
    let mut tier_summaries = Vec::new();

    for tier in TIERS {
        let records = classify_internal(&raw_terms, &internal_sims, tier.cutoff);
        write_lines(
            &options.subdir.join(tier.internal_filename()),
            &internal_rows(&records),
        )?;
        info!(
            tier = tier.label,
            kept = records.len(),
            suppressed = raw_terms.len() - records.len(),
            "Classified internal duplicates"
        );

        // Survivors of this tier, lowercased, in the fixed master vocabulary
        let survivor_keys: Vec<String> =
            records.iter().map(|r| r.term.to_lowercase()).collect();
        let query = master_fitted.transform(&survivor_keys);
        let sims = cross_similarity(&query, &master_matrix, options.chunk_size);

        let cross = classify_vs_master(&records, &sims, &master, tier.cutoff);
        let rows = cross_rows(&cross);
        write_lines(&options.subdir.join(tier.vs_master_filename()), &rows)?;

        write_lines(
            &options.output_dir.join(tier.html_filename()),
            &render_contexts(&cross, &terms, options.max_contexts),
        )?;

        let mut headered = vec![derive_header(&rows)];
        headered.extend(rows);
        write_lines(&options.output_dir.join(tier.report_filename()), &headered)?;

        let master_matched = cross.iter().filter(|r| r.master.is_some()).count();
        info!(
            tier = tier.label,
            kept = cross.len(),
            matched = master_matched,
            "Classified against master glossary"
        );

        tier_summaries.push(TierSummary {
            label: tier.label,
            cutoff: tier.cutoff,
            internal_kept: records.len(),
            internal_suppressed: raw_terms.len() - records.len(),
            vs_master_kept: cross.len(),
            master_matched,
        });
    }

    Ok(RunSummary {
        terms: terms.len(),
        master_entries: master.len(),
        tiers: tier_summaries,
    })
}

/// Cutoff above any possible cosine score: reports every match, drops nothing.
const KEEP_ALL_CUTOFF: f64 = 2.0;

/// Compare a new-terms file (master glossary format) against the master with
/// suppression disabled and write one annotated table.
pub fn check(new_terms_path: &Path, master_path: &Path, out_path: &Path) -> Result<()> {
    let new_entries = load_master(new_terms_path)?;
    info!(terms = new_entries.len(), "Loaded new-terms file");

    // Internal pass over the new terms; the full original lines are what the
    // reviewer sees in the output
    let new_keys: Vec<&str> = new_entries.iter().map(|e| e.key.as_str()).collect();
    let new_lines: Vec<&str> = new_entries.iter().map(|e| e.line.as_str()).collect();
    let fitted = NgramVectorizer::new().fit(&new_keys)?;
    let sims = internal_similarity(&fitted.transform(&new_keys));
    let records = classify_internal(&new_lines, &sims, KEEP_ALL_CUTOFF);

    let master = load_master(master_path)?;
    info!(entries = master.len(), "Loaded master glossary");

    let master_keys: Vec<&str> = master.iter().map(|e| e.key.as_str()).collect();
    let master_fitted = NgramVectorizer::new().fit(&master_keys)?;
    let master_matrix = master_fitted.transform(&master_keys);

    // No suppression means the record list aligns with the full key list
    let query = master_fitted.transform(&new_keys);
    let cross_sims = cross_similarity(&query, &master_matrix, DEFAULT_CHUNK_SIZE);
    let cross = classify_vs_master(&records, &cross_sims, &master, KEEP_ALL_CUTOFF);

    write_lines(out_path, &cross_rows(&cross))?;
    info!(rows = cross.len(), out = %out_path.display(), "Wrote check report");
    Ok(())
}
