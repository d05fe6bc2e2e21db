// Report rendering: tab-separated tables, HTML context reports, and the
// terminal summary shown at the end of a run.

pub mod html;
pub mod tabular;
pub mod terminal;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Write lines to a file, one per line with a trailing newline.
pub fn write_lines(path: &Path, lines: &[String]) -> Result<()> {
    let mut out = String::new();
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    fs::write(path, out).with_context(|| format!("Failed to write {}", path.display()))
}
