//! Pipeline passes for guide-PDF synthesis.
//!
//! Each submodule implements exactly one transformation. Every pass after
//! extraction is a pure function over an in-memory row sequence, which keeps
//! the passes independently testable and rules out hidden I/O ordering
//! between them — serialization happens only at the pipeline's outer edges.
//!
//! ## Data Flow
//!
//! ```text
//! extract ──▶ normalize ──▶ [split + sections] ──▶ trim
//! (pdfium)    (merge/filter)  (code boundaries)    (boilerplate)
//! ```
//!
//! 1. [`extract`]   — pull the raw span stream out of the PDF, one line per
//!    text object, in document reading order
//! 2. [`normalize`] — collapse spans into logical lines (profile-dependent)
//! 3. [`sections`]  — locate known multi-word section phrases in a line
//! 4. [`split`]     — trim trailing junk at code boundaries, hoist section
//!    phrases into standalone rows, re-split oversized merged lines
//! 5. [`trim`]      — drop the legal/footer boilerplate block
//!
//! Passes 3–4 only run when a companion section list exists for the
//! document; pass 5 always runs.

pub mod extract;
pub mod normalize;
pub mod sections;
pub mod split;
pub mod trim;
