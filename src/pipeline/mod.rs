// End-to-end orchestration of a detection run.

pub mod run;

pub use run::{check, run};
