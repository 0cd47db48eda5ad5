//! Line normalization: collapse the raw span stream into logical lines.
//!
//! ## Why two variants?
//!
//! The two guide families fragment their text in opposite ways. The
//! fragmented family splits one channel record across several spans (the
//! channel number often printed twice, once per column), so spans must be
//! *merged*. The bounded family emits one short line per record but mixes
//! in long paragraph text, so lines must be *filtered*. Both variants are
//! pure `&[String] → Vec<String>` transforms.
//!
//! ## Idempotence
//!
//! Re-running either variant on its own output must be a no-op. For the
//! merge variant this falls out of one rule: a line whose first token is
//! numeric and which already carries descriptive tokens is a completed
//! logical line — it is emitted as-is instead of being absorbed into the
//! accumulation buffer. Without that rule a second pass would glue every
//! already-merged record into one giant line.

use crate::config::{SourceProfile, SynthConfig};
use once_cell::sync::Lazy;
use regex::Regex;

static RE_NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").unwrap());

/// True if the whole line is one run of digits (a channel number or a page
/// footer number).
pub fn is_numeric_line(line: &str) -> bool {
    RE_NUMERIC.is_match(line)
}

/// True if `token` looks like a channel number: all digits, at most
/// `max_digits` of them.
pub fn is_channel_number(token: &str, max_digits: usize) -> bool {
    RE_NUMERIC.is_match(token) && token.len() <= max_digits
}

/// Normalize the raw span stream according to the configured profile.
pub fn normalize(raw: &[String], config: &SynthConfig) -> Vec<String> {
    match config.profile {
        SourceProfile::Fragmented => merge_fragments(raw),
        SourceProfile::Bounded => filter_bounded(
            raw,
            config.max_line_chars,
            &config.noise_fragment,
            config.channel_number_digits,
        ),
    }
}

/// Merge variant (fragmented profile): rebuild logical lines from spans.
///
/// Scans in order, keeping an accumulation buffer and the last purely
/// numeric span seen:
///
/// * A numeric span equal to the previous numeric span is a column-layout
///   duplicate — it continues the current record rather than starting a new
///   one, so it is appended to the buffer.
/// * Any other numeric span flushes the buffer and seeds a fresh one.
/// * A text span is appended to the open buffer; with no buffer open it is
///   already a standalone line and passes through.
/// * A line that starts with a numeric token but carries more tokens is a
///   completed record from an earlier pass; it flushes the buffer and
///   passes through (this is what makes the pass idempotent).
pub fn merge_fragments(raw: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(raw.len());
    let mut buffer: Vec<String> = Vec::new();
    let mut last_number: Option<String> = None;

    for line in raw {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if is_numeric_line(line) {
            if last_number.as_deref() == Some(line) {
                buffer.push(line.to_string());
            } else {
                flush(&mut buffer, &mut merged);
                buffer.push(line.to_string());
            }
            last_number = Some(line.to_string());
        } else if starts_with_number(line) {
            // Already a complete "number + description" record.
            flush(&mut buffer, &mut merged);
            merged.push(line.to_string());
        } else if buffer.is_empty() {
            merged.push(line.to_string());
        } else {
            buffer.push(line.to_string());
        }
    }

    flush(&mut buffer, &mut merged);
    merged
}

fn starts_with_number(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(first), Some(_)) => RE_NUMERIC.is_match(first),
        _ => false,
    }
}

fn flush(buffer: &mut Vec<String>, out: &mut Vec<String>) {
    if !buffer.is_empty() {
        out.push(buffer.join(" "));
        buffer.clear();
    }
}

/// Filter variant (bounded profile): keep number/description row pairs.
///
/// Drops paragraph noise (lines over `max_chars`), strips the inline
/// `noise` glyph marker, then keeps a line only if it starts with a short
/// numeric channel token — or if it immediately follows such a line, which
/// pairs each channel number with its description.
pub fn filter_bounded(
    raw: &[String],
    max_chars: usize,
    noise: &str,
    max_digits: usize,
) -> Vec<String> {
    let mut kept: Vec<String> = Vec::new();
    let mut previous_was_number = false;

    for line in raw {
        let line = line.trim();
        if line.chars().count() > max_chars {
            previous_was_number = false;
            continue;
        }

        let line = if noise.is_empty() {
            line.to_string()
        } else {
            line.replace(noise, "").trim().to_string()
        };
        if line.is_empty() {
            continue;
        }

        let leads_with_number = line
            .split_whitespace()
            .next()
            .is_some_and(|t| is_channel_number(t, max_digits));

        if leads_with_number {
            kept.push(line);
            previous_was_number = true;
        } else if previous_was_number {
            kept.push(line);
            previous_was_number = false;
        }
    }

    kept
}
