// Master glossary loading.
//
// The master glossary is a line-oriented `term|identifier` file. The part
// before the first pipe, lowercased, is the comparison key; the whole
// original line is kept for reporting so a reviewer sees the entry exactly
// as it appears in the glossary.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// One reference vocabulary line.
#[derive(Debug, Clone)]
pub struct MasterEntry {
    /// Lowercase term used for vectorization.
    pub key: String,
    /// The original line (`term|identifier`), trimmed, for reporting.
    pub line: String,
}

/// Load a pipe-delimited glossary file. Blank lines are ignored.
pub fn load_master(path: &Path) -> Result<Vec<MasterEntry>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read master glossary {}", path.display()))?;

    let mut entries = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let term = line.split('|').next().unwrap_or(line).trim();
        entries.push(MasterEntry {
            key: term.to_lowercase(),
            line: line.to_string(),
        });
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_keys_and_keeps_original_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Safety Standard|W001").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  Risk Assessment |W002 ").unwrap();

        let entries = load_master(file.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "safety standard");
        assert_eq!(entries[0].line, "Safety Standard|W001");
        assert_eq!(entries[1].key, "risk assessment");
        assert_eq!(entries[1].line, "Risk Assessment |W002");
    }

    #[test]
    fn line_without_pipe_uses_whole_line_as_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Bare Term").unwrap();

        let entries = load_master(file.path()).unwrap();
        assert_eq!(entries[0].key, "bare term");
        assert_eq!(entries[0].line, "Bare Term");
    }

    #[test]
    fn missing_file_is_fatal() {
        assert!(load_master(Path::new("/nonexistent/master.txt")).is_err());
    }
}
