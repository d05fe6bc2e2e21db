// HTML context report.
//
// One bordered table per tier, one row per rendered context snippet, with
// every case-insensitive occurrence of the term wrapped in a highlight span
// so a reviewer can see the candidate in situ.
//
// Terms with no recorded contexts are silently omitted here but remain in
// the tabular report. That asymmetry is deliberate: the HTML exists purely
// for context review, and a term without contexts has nothing to show.

use regex_lite::Regex;

use crate::corpus::TermIndex;
use crate::dedup::CrossRecord;

/// Highlight background for matched terms.
const HIGHLIGHT_COLOR: &str = "FFFF70";

/// Visible stand-in for embedded newlines and tabs; the report is
/// line-oriented and a raw control character would break both the HTML rows
/// and anything that greps them.
const PLACEHOLDER: char = '\u{00B6}';

/// Render a tier's vs-master records into HTML table lines.
///
/// At most `max_contexts` snippets are rendered per term; the first carries
/// the index and term cells, continuation rows leave them blank. Context
/// lookup misses are skipped, not errors.
pub fn render_contexts(
    records: &[CrossRecord],
    terms: &TermIndex,
    max_contexts: usize,
) -> Vec<String> {
    let mut lines = vec![
        "<table border='1'>".to_string(),
        "<tr><th>Index</th><th>Term</th><th>Context</th></tr>".to_string(),
    ];

    for record in records {
        let contexts = match terms.get(&record.term) {
            Some(term) if !term.contexts.is_empty() => &term.contexts,
            _ => continue,
        };

        let first = highlight_term(&replace_control(&contexts[0]), &record.term);
        lines.push(format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            record.index, record.term, first
        ));

        if max_contexts > 1 && contexts.len() > 1 {
            let end = contexts.len().min(max_contexts);
            for context in &contexts[1..end] {
                let highlighted = highlight_term(&replace_control(context), &record.term);
                lines.push(format!(
                    "<tr><td> </td><td> </td><td>{highlighted}</td></tr>"
                ));
            }
        }
    }

    lines.push("</table>".to_string());
    lines
}

/// Wrap every case-insensitive occurrence of `term` in a highlight span,
/// preserving the casing found in the context.
fn highlight_term(context: &str, term: &str) -> String {
    let pattern = format!("(?i)({})", regex_lite::escape(term));
    match Regex::new(&pattern) {
        Ok(re) => re
            .replace_all(
                context,
                format!("<span style='background-color: #{HIGHLIGHT_COLOR}'>$1</span>"),
            )
            .into_owned(),
        // An unparsable pattern can only come from a pathological term;
        // show the context unhighlighted rather than fail the report.
        Err(_) => context.to_string(),
    }
}

fn replace_control(context: &str) -> String {
    context
        .chars()
        .map(|c| if c == '\n' || c == '\t' { PLACEHOLDER } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AggregationPolicy;
    use crate::corpus::terms::TermIndex;

    fn index_with(term: &str, contexts: &[&str]) -> TermIndex {
        TermIndex::from_records(
            vec![(
                term.to_string(),
                contexts.iter().map(|c| c.to_string()).collect(),
                "doc".to_string(),
            )],
            AggregationPolicy::FirstSourceWins,
        )
    }

    fn record(index: usize, term: &str) -> CrossRecord {
        CrossRecord {
            index,
            term: term.to_string(),
            master: None,
            internal: None,
        }
    }

    #[test]
    fn highlight_preserves_matched_casing() {
        let out = highlight_term("the Safety Standard applies", "safety standard");
        assert_eq!(
            out,
            "the <span style='background-color: #FFFF70'>Safety Standard</span> applies"
        );
    }

    #[test]
    fn highlight_wraps_every_occurrence() {
        let out = highlight_term("risk, RISK, Risk", "risk");
        assert_eq!(out.matches("<span").count(), 3);
    }

    #[test]
    fn highlight_escapes_regex_metacharacters() {
        let out = highlight_term("cost (net) rose", "cost (net)");
        assert!(out.contains("<span style='background-color: #FFFF70'>cost (net)</span>"));
    }

    #[test]
    fn control_characters_become_pilcrows() {
        assert_eq!(replace_control("a\nb\tc"), "a\u{00B6}b\u{00B6}c");
    }

    #[test]
    fn first_row_carries_index_and_term() {
        let terms = index_with("Widget", &["a Widget appeared", "another widget"]);
        let lines = render_contexts(&[record(4, "Widget")], &terms, 5);
        assert_eq!(lines[0], "<table border='1'>");
        assert!(lines[2].starts_with("<tr><td>4</td><td>Widget</td><td>"));
        assert!(lines[3].starts_with("<tr><td> </td><td> </td><td>"));
        assert_eq!(lines.last().unwrap(), "</table>");
    }

    #[test]
    fn contexts_capped_at_max() {
        let terms = index_with("W", &["W one", "W two", "W three", "W four"]);
        let lines = render_contexts(&[record(0, "W")], &terms, 2);
        // table open + header + 2 context rows + table close
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn max_contexts_of_one_still_renders_first() {
        let terms = index_with("W", &["W one", "W two"]);
        let lines = render_contexts(&[record(0, "W")], &terms, 1);
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn term_without_contexts_is_omitted() {
        let terms = index_with("Known", &["Known context"]);
        let lines = render_contexts(&[record(0, "Unknown"), record(1, "Known")], &terms, 5);
        // Only the Known row appears
        assert_eq!(lines.len(), 4);
        assert!(lines[2].contains("Known"));
    }
}
