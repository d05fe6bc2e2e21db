// Lexical similarity scoring: character n-gram TF-IDF vectors and cosine
// similarity matrices. Both the internal (term vs term) and cross-reference
// (term vs master) comparisons go through this one capability, so their
// scores are numerically comparable.

pub mod matrix;
pub mod vectorizer;

pub use matrix::{chunk_ranges, cross_similarity, internal_similarity};
pub use vectorizer::{FittedVectorizer, NgramVectorizer};
