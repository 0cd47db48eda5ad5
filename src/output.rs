//! Output types: the synthesised listing, per-document info, and run stats.

use serde::{Deserialize, Serialize};

/// What a final row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowKind {
    /// A channel entry: leading channel number plus descriptive tokens.
    Channel,
    /// A bare section header consisting solely of a known phrase's tokens.
    Section,
    /// Anything else that survived cleaning (rare; kept for inspection).
    Other,
}

/// One row of the synthesised listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideRow {
    /// Space-joined tokens of the row.
    pub text: String,
    pub kind: RowKind,
}

/// Facts about the source document, gathered during extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// File stem the output and section-list paths derive from.
    pub stem: String,
    pub page_count: usize,
    /// Raw text spans extracted across all pages.
    pub span_count: usize,
}

/// Statistics for one document's synthesis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthStats {
    /// Raw spans pulled out of the PDF.
    pub raw_spans: usize,
    /// Logical lines after normalization.
    pub logical_lines: usize,
    /// Rows in the final listing.
    pub emitted_rows: usize,
    /// Rows classified as section headers.
    pub section_rows: usize,
    /// Rows classified as channel entries.
    pub channel_rows: usize,
    /// Whether the section-aware passes ran (a companion list was found).
    pub sections_applied: bool,
    /// Whether an output file was written (false when extraction was empty).
    pub output_written: bool,
    pub extract_duration_ms: u64,
    pub total_duration_ms: u64,
}

/// The complete result of synthesising one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideOutput {
    pub rows: Vec<GuideRow>,
    pub info: DocumentInfo,
    pub stats: SynthStats,
}

impl GuideOutput {
    /// Render the listing as the newline-delimited output format:
    /// one row per line, space-joined tokens, trailing newline.
    pub fn to_tsv(&self) -> String {
        let mut out = String::with_capacity(self.rows.len() * 24);
        for row in &self.rows {
            out.push_str(&row.text);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_tsv_one_row_per_line() {
        let output = GuideOutput {
            rows: vec![
                GuideRow {
                    text: "12 La Une B".into(),
                    kind: RowKind::Channel,
                },
                GuideRow {
                    text: "Généralistes".into(),
                    kind: RowKind::Section,
                },
            ],
            info: DocumentInfo {
                stem: "guide".into(),
                page_count: 1,
                span_count: 5,
            },
            stats: SynthStats::default(),
        };
        assert_eq!(output.to_tsv(), "12 La Une B\nGénéralistes\n");
    }

    #[test]
    fn to_tsv_empty_is_empty() {
        let output = GuideOutput {
            rows: vec![],
            info: DocumentInfo {
                stem: "guide".into(),
                page_count: 0,
                span_count: 0,
            },
            stats: SynthStats::default(),
        };
        assert_eq!(output.to_tsv(), "");
    }

    #[test]
    fn output_round_trips_through_json() {
        let output = GuideOutput {
            rows: vec![GuideRow {
                text: "01 RTBF".into(),
                kind: RowKind::Channel,
            }],
            info: DocumentInfo {
                stem: "g".into(),
                page_count: 2,
                span_count: 9,
            },
            stats: SynthStats::default(),
        };
        let json = serde_json::to_string(&output).unwrap();
        let back: GuideOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rows, output.rows);
        assert_eq!(back.info.page_count, 2);
    }
}
