// Input corpora: the candidate term/context map and the master glossary.
//
// Both are loaded once at the start of a run and are immutable afterwards.

pub mod master;
pub mod terms;

pub use master::{load_master, MasterEntry};
pub use terms::{load_corpus, Term, TermIndex};
