//! Boilerplate trimming: drop the legal/footer block at the end of a guide.
//!
//! Guides end with regional-availability notes and legal text that starts
//! with a known marker sentence. Everything from the first marker line on
//! is discarded, including the marker itself. Matching is a plain prefix
//! test after whitespace normalization; markers are configured, not
//! hard-coded, because they differ per operator.

use tracing::debug;

/// Truncate `lines` at the first line starting with any of `markers`.
///
/// Returns the sequence unchanged when no marker is found. An empty marker
/// list disables trimming entirely.
pub fn trim_boilerplate(lines: &[String], markers: &[String]) -> Vec<String> {
    if markers.is_empty() {
        return lines.to_vec();
    }

    for (i, line) in lines.iter().enumerate() {
        let line = line.trim_start();
        if markers.iter().any(|m| line.starts_with(m.as_str())) {
            debug!("Boilerplate marker at row {}, dropping {} rows", i, lines.len() - i);
            return lines[..i].to_vec();
        }
    }

    lines.to_vec()
}
