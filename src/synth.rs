//! Orchestration: run the full pass sequence over one document or a batch.
//!
//! The pipeline itself is pure; this module owns everything with side
//! effects — PDF extraction, the companion section-list lookup, output
//! writing, and batch fan-out. [`run_passes`] is the seam between the two
//! worlds: it takes raw lines already in memory and produces final rows,
//! so every cleaning rule is testable without a single PDF on disk.

use crate::config::{SourceProfile, SynthConfig, OUTPUT_SUFFIX, SECTION_SUFFIX};
use crate::error::SynthError;
use crate::output::{DocumentInfo, GuideOutput, GuideRow, RowKind, SynthStats};
use crate::pipeline::extract::extract_spans;
use crate::pipeline::normalize::{is_channel_number, normalize};
use crate::pipeline::sections::SectionList;
use crate::pipeline::split::{extract_section_rows, split_oversized, trim_after_last_code};
use crate::pipeline::trim::trim_boilerplate;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Where the output listing for `input` is written.
///
/// `<output_dir or input's directory>/<stem>_channels.tsv`.
pub fn output_path(input: &Path, config: &SynthConfig) -> PathBuf {
    let stem = document_stem(input);
    let dir = config
        .output_dir
        .clone()
        .unwrap_or_else(|| input.parent().unwrap_or(Path::new(".")).to_path_buf());
    dir.join(format!("{stem}{OUTPUT_SUFFIX}"))
}

/// Where the companion section list for `input` is looked up.
///
/// `<section_dir or input's directory>/<stem>_sections.tsv`.
pub fn section_list_path(input: &Path, config: &SynthConfig) -> PathBuf {
    let stem = document_stem(input);
    let dir = config
        .section_dir
        .clone()
        .unwrap_or_else(|| input.parent().unwrap_or(Path::new(".")).to_path_buf());
    dir.join(format!("{stem}{SECTION_SUFFIX}"))
}

fn document_stem(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "guide".to_string())
}

/// Run every cleaning pass over raw lines already in memory.
///
/// The section-aware passes (code-boundary trim, section-row hoisting, and
/// the oversized split) run only when a section list is supplied — a guide
/// without one gets normalization and boilerplate trimming, nothing more.
/// The oversized split additionally applies to the fragmented profile only;
/// bounded-profile lines are short by construction and re-splitting them
/// would only corrupt legitimate long channel names.
pub fn run_passes(
    raw: &[String],
    sections: Option<&SectionList>,
    config: &SynthConfig,
) -> Vec<GuideRow> {
    let mut lines = normalize(raw, config);
    debug!("Normalized {} spans into {} lines", raw.len(), lines.len());

    if let Some(sections) = sections.filter(|s| !s.is_empty()) {
        lines = lines
            .iter()
            .map(|l| trim_after_last_code(l, &config.codes, sections))
            .collect();
        lines = extract_section_rows(&lines, sections);
        if config.profile == SourceProfile::Fragmented {
            lines = split_oversized(
                &lines,
                &config.codes,
                config.long_line_threshold,
                config.interleave_follower,
            );
        }
    }

    lines = trim_boilerplate(&lines, &config.boilerplate_markers);

    lines
        .into_iter()
        .map(|text| {
            let kind = classify(&text, sections, config);
            GuideRow { text, kind }
        })
        .collect()
}

fn classify(text: &str, sections: Option<&SectionList>, config: &SynthConfig) -> RowKind {
    if sections.is_some_and(|s| s.is_section_line(text)) {
        return RowKind::Section;
    }
    let leads_with_number = text
        .split_whitespace()
        .next()
        .is_some_and(|t| is_channel_number(t, config.channel_number_digits));
    if leads_with_number {
        RowKind::Channel
    } else {
        RowKind::Other
    }
}

/// Synthesise one document into an in-memory listing.
///
/// A missing section list is not an error: the section-aware passes are
/// skipped and the run proceeds. A PDF that yields no spans at all produces
/// an empty listing with a warning; the caller (and [`synthesize_to_file`])
/// treat that as "nothing to write", not as a failure.
pub fn synthesize(path: &Path, config: &SynthConfig) -> Result<GuideOutput, SynthError> {
    let started = Instant::now();

    let extract_started = Instant::now();
    let extracted = extract_spans(path, config.password.as_deref())?;
    let extract_duration_ms = extract_started.elapsed().as_millis() as u64;

    let stem = document_stem(path);

    if extracted.lines.is_empty() {
        warn!(
            "{}: no text spans extracted ({} pages) — nothing to synthesise",
            path.display(),
            extracted.page_count
        );
        return Ok(GuideOutput {
            rows: Vec::new(),
            info: DocumentInfo {
                stem,
                page_count: extracted.page_count,
                span_count: 0,
            },
            stats: SynthStats {
                extract_duration_ms,
                total_duration_ms: started.elapsed().as_millis() as u64,
                ..SynthStats::default()
            },
        });
    }

    let section_path = section_list_path(path, config);
    let sections = if section_path.exists() {
        Some(SectionList::load(&section_path)?)
    } else {
        debug!(
            "{}: no section list at {} — section passes skipped",
            path.display(),
            section_path.display()
        );
        None
    };

    let raw_spans = extracted.lines.len();
    let logical_lines = normalize(&extracted.lines, config).len();
    let rows = run_passes(&extracted.lines, sections.as_ref(), config);

    let section_rows = rows.iter().filter(|r| r.kind == RowKind::Section).count();
    let channel_rows = rows.iter().filter(|r| r.kind == RowKind::Channel).count();

    info!(
        "{}: {} rows ({} channels, {} sections) from {} spans",
        path.display(),
        rows.len(),
        channel_rows,
        section_rows,
        raw_spans
    );

    Ok(GuideOutput {
        info: DocumentInfo {
            stem,
            page_count: extracted.page_count,
            span_count: raw_spans,
        },
        stats: SynthStats {
            raw_spans,
            logical_lines,
            emitted_rows: rows.len(),
            section_rows,
            channel_rows,
            sections_applied: sections.is_some(),
            output_written: false,
            extract_duration_ms,
            total_duration_ms: started.elapsed().as_millis() as u64,
        },
        rows,
    })
}

/// Synthesise one document and write the listing next to it (or into the
/// configured output directory).
///
/// The write is atomic: the listing goes to a temporary sibling first and
/// is renamed into place, so a crash mid-write never leaves a truncated
/// output file. When the document produced no rows, no file is written.
pub fn synthesize_to_file(path: &Path, config: &SynthConfig) -> Result<GuideOutput, SynthError> {
    let mut output = synthesize(path, config)?;

    if output.rows.is_empty() {
        warn!("{}: empty listing — output not written", path.display());
        return Ok(output);
    }

    let target = output_path(path, config);
    write_atomic(&target, &output.to_tsv())?;
    output.stats.output_written = true;
    info!("{} → {}", path.display(), target.display());

    Ok(output)
}

fn write_atomic(target: &Path, content: &str) -> Result<(), SynthError> {
    let map_err = |source: std::io::Error| SynthError::OutputWriteFailed {
        path: target.to_path_buf(),
        source,
    };

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(map_err)?;
        }
    }

    let tmp = target.with_extension("tsv.tmp");
    std::fs::write(&tmp, content).map_err(map_err)?;
    std::fs::rename(&tmp, target).map_err(map_err)?;
    Ok(())
}

/// Synthesise a batch of documents in parallel.
///
/// Each document is fully independent, so failures are isolated: one
/// corrupt PDF yields an `Err` in its slot and every other document still
/// completes. Results come back in input order regardless of which worker
/// finished first.
pub fn synthesize_batch(
    paths: &[PathBuf],
    config: &SynthConfig,
) -> Vec<(PathBuf, Result<GuideOutput, SynthError>)> {
    paths
        .par_iter()
        .map(|path| {
            let result = synthesize_to_file(path, config);
            if let Err(ref e) = result {
                warn!("{}: {}", path.display(), e);
            }
            (path.clone(), result)
        })
        .collect()
}
