// Termsieve: near-duplicate detection for controlled-vocabulary curation.
//
// This is the library root. Each module corresponds to a stage of the
// duplicate-detection pipeline: load the candidate corpus and master
// glossary, vectorize, score similarity, classify per tier, render reports.

pub mod config;
pub mod corpus;
pub mod dedup;
pub mod pipeline;
pub mod report;
pub mod similarity;
