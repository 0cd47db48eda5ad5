//! Boundary splitting: carve merged lines back into discrete records.
//!
//! Three cooperating behaviours, all driven by the code table and only
//! active when section phrases are configured for the document:
//!
//! * **Code-boundary trim** — a channel record ends at its last package
//!   code; anything after a trailing "code followed by non-code" boundary
//!   is bleed-over from the neighbouring column and is cut off.
//! * **Section-row extraction** — a section phrase embedded inside a record
//!   line is hoisted out into its own standalone row.
//! * **Oversized split** — a line longer than the threshold is several
//!   records merged into one span; it is re-cut at every code→non-code
//!   boundary.
//!
//! The oversized split has an optional follower re-interleave rule (see
//! [`split_oversized`]) that is fragile by nature and therefore lives
//! behind an explicit config toggle.

use crate::codes::CodeTable;
use crate::pipeline::sections::SectionList;

/// Cut a line at its last code boundary.
///
/// Scans tokens left to right recording the last code-token index; a
/// non-code token right after a code marks the natural end of the
/// descriptive segment, so scanning stops there. When a boundary was found
/// the line is truncated to it, and the earliest section-phrase match
/// *beyond* the cut (if any) is re-appended so the label survives the trim.
/// A line with no code tokens passes through unmodified.
pub fn trim_after_last_code(line: &str, codes: &CodeTable, sections: &SectionList) -> String {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let mut last_code: Option<usize> = None;

    for (i, token) in tokens.iter().enumerate() {
        if codes.is_code(token) {
            last_code = Some(i);
            if let Some(next) = tokens.get(i + 1) {
                if !codes.is_code(next) {
                    break;
                }
            }
        }
    }

    let Some(cut) = last_code else {
        return line.to_string();
    };

    let mut kept: Vec<&str> = tokens[..=cut].to_vec();
    if let Some(m) = sections.earliest_match(&tokens) {
        // Only re-append a label the cut actually removed; a phrase inside
        // the kept range is already present.
        if m.start > cut {
            kept.extend_from_slice(&tokens[m.start..=m.end]);
        }
    }
    kept.join(" ")
}

/// Hoist embedded section phrases into standalone rows.
///
/// For each line whose earliest phrase match is a strict sub-range, two
/// rows are emitted: the remainder with the phrase tokens removed (when
/// non-empty), then the phrase itself. A line that *is* a phrase stays a
/// single row. The phrase is relocated, never duplicated.
pub fn extract_section_rows(lines: &[String], sections: &SectionList) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());

    for line in lines {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        match sections.earliest_match(&tokens) {
            Some(m) if m.start > 0 || m.end + 1 < tokens.len() => {
                let remainder: Vec<&str> = tokens[..m.start]
                    .iter()
                    .chain(&tokens[m.end + 1..])
                    .copied()
                    .collect();
                if !remainder.is_empty() {
                    out.push(remainder.join(" "));
                }
                out.push(tokens[m.start..=m.end].join(" "));
            }
            _ => out.push(line.clone()),
        }
    }

    out
}

/// Split every segment of `line` that ends at a code→non-code boundary.
///
/// A cut happens after a code token whose successor exists and is not a
/// code; the trailing remainder (if any) becomes the final segment. A line
/// without any boundary comes back as a single segment.
pub fn split_at_code_boundaries(line: &str, codes: &CodeTable) -> Vec<String> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for (i, &token) in tokens.iter().enumerate() {
        current.push(token);
        let boundary = codes.is_code(token)
            && tokens.get(i + 1).is_some_and(|next| !codes.is_code(next));
        if boundary {
            segments.push(current.join(" "));
            current.clear();
        }
    }

    if !current.is_empty() {
        segments.push(current.join(" "));
    }

    segments
}

/// Re-split oversized merged lines into one row per record.
///
/// Lines longer than `threshold` characters are cut at every code→non-code
/// boundary. With `interleave_follower` on, the row immediately following
/// the oversized line (in the pre-split sequence) is re-inserted between
/// the first split segment and the rest — in the fragmented layout that
/// follower is the channel-number row that visually preceded the long
/// description. The follower is consumed, not duplicated.
pub fn split_oversized(
    lines: &[String],
    codes: &CodeTable,
    threshold: usize,
    interleave_follower: bool,
) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut skip_next = false;

    for (i, line) in lines.iter().enumerate() {
        if skip_next {
            skip_next = false;
            continue;
        }

        if line.chars().count() <= threshold {
            out.push(line.clone());
            continue;
        }

        let segments = split_at_code_boundaries(line, codes);
        let mut segments = segments.into_iter();
        if let Some(first) = segments.next() {
            out.push(first);
        }
        if interleave_follower {
            if let Some(follower) = lines.get(i + 1) {
                out.push(follower.clone());
                skip_next = true;
            }
        }
        out.extend(segments);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes() -> CodeTable {
        CodeTable::voo()
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ── Code-boundary trim ───────────────────────────────────────────────

    #[test]
    fn trailing_junk_after_code_is_cut() {
        let sections = SectionList::default();
        let trimmed = trim_after_last_code("12 VS Sport XYZ more words", &codes(), &sections);
        assert_eq!(trimmed, "12 VS");
    }

    #[test]
    fn line_without_codes_passes_through() {
        let sections = SectionList::default();
        let line = "12 La Une rien à couper";
        assert_eq!(trim_after_last_code(line, &codes(), &sections), line);
    }

    #[test]
    fn consecutive_codes_are_all_kept() {
        let sections = SectionList::default();
        let trimmed = trim_after_last_code("12 La Une Pa B junk", &codes(), &sections);
        assert_eq!(trimmed, "12 La Une Pa B");
    }

    #[test]
    fn section_phrase_beyond_cut_is_reappended() {
        let sections = SectionList::from_lines(["Chaînes généralistes"]);
        let trimmed = trim_after_last_code(
            "12 La Une B bleed Chaînes généralistes",
            &codes(),
            &sections,
        );
        assert_eq!(trimmed, "12 La Une B Chaînes généralistes");
    }

    #[test]
    fn section_phrase_inside_kept_range_is_not_duplicated() {
        let sections = SectionList::from_lines(["La Une"]);
        let trimmed = trim_after_last_code("12 La Une B junk", &codes(), &sections);
        assert_eq!(trimmed, "12 La Une B");
    }

    // ── Section-row extraction ───────────────────────────────────────────

    #[test]
    fn embedded_phrase_becomes_its_own_row() {
        let sections = SectionList::from_lines(["Chaînes généralistes"]);
        let rows = extract_section_rows(
            &lines(&["12 La Une B Chaînes généralistes"]),
            &sections,
        );
        assert_eq!(rows, vec!["12 La Une B", "Chaînes généralistes"]);
    }

    #[test]
    fn full_line_phrase_stays_single_row() {
        let sections = SectionList::from_lines(["Chaînes généralistes"]);
        let rows = extract_section_rows(&lines(&["Chaînes généralistes"]), &sections);
        assert_eq!(rows, vec!["Chaînes généralistes"]);
    }

    #[test]
    fn leading_phrase_leaves_remainder_after_it() {
        let sections = SectionList::from_lines(["Musique"]);
        let rows = extract_section_rows(&lines(&["Musique 45 Classic 21"]), &sections);
        assert_eq!(rows, vec!["45 Classic 21", "Musique"]);
    }

    #[test]
    fn unmatched_lines_pass_through() {
        let sections = SectionList::from_lines(["Musique"]);
        let input = lines(&["12 La Une B", "13 La Deux B"]);
        assert_eq!(extract_section_rows(&input, &sections), input);
    }

    // ── Oversized split ──────────────────────────────────────────────────

    #[test]
    fn boundary_cut_after_each_code_run() {
        let segs = split_at_code_boundaries("12 La Une B 13 La Deux B 14 La Trois", &codes());
        assert_eq!(segs, vec!["12 La Une B", "13 La Deux B", "14 La Trois"]);
    }

    #[test]
    fn no_boundary_yields_single_segment() {
        let segs = split_at_code_boundaries("rien de spécial ici", &codes());
        assert_eq!(segs, vec!["rien de spécial ici"]);
    }

    #[test]
    fn trailing_code_does_not_cut() {
        // Boundary requires a successor token that is not a code.
        let segs = split_at_code_boundaries("12 La Une B", &codes());
        assert_eq!(segs, vec!["12 La Une B"]);
    }

    #[test]
    fn short_lines_are_untouched() {
        let input = lines(&["12 La Une B", "13 Deux"]);
        let out = split_oversized(&input, &codes(), 15, true);
        assert_eq!(out, input);
    }

    #[test]
    fn oversized_line_splits_with_follower_interleaved() {
        let input = lines(&["12 La Une Pa B 13 La Deux Pa B", "14", "15 La Trois"]);
        let out = split_oversized(&input, &codes(), 15, true);
        assert_eq!(
            out,
            vec!["12 La Une Pa B", "14", "13 La Deux Pa B", "15 La Trois"]
        );
    }

    #[test]
    fn interleave_off_keeps_segments_contiguous() {
        let input = lines(&["12 La Une Pa B 13 La Deux Pa B", "14", "15 La Trois"]);
        let out = split_oversized(&input, &codes(), 15, false);
        assert_eq!(
            out,
            vec!["12 La Une Pa B", "13 La Deux Pa B", "14", "15 La Trois"]
        );
    }

    #[test]
    fn oversized_last_line_has_no_follower_to_interleave() {
        let input = lines(&["12 La Une Pa B 13 La Deux Pa B"]);
        let out = split_oversized(&input, &codes(), 15, true);
        assert_eq!(out, vec!["12 La Une Pa B", "13 La Deux Pa B"]);
    }
}
