//! # channel-synth
//!
//! Reconstruct clean channel listings from operator guide PDFs.
//!
//! ## Why this crate?
//!
//! Operator channel guides are laid out for print: multi-column tables,
//! duplicated channel numbers, package-code badges, section headers floating
//! between columns, and pages of legal boilerplate. Generic PDF text
//! extraction turns that into a soup of fragments in the wrong order. This
//! crate extracts the raw span stream and runs a sequence of small,
//! deterministic heuristics over it — merging fragments back into records,
//! cutting merged records apart at package-code boundaries, hoisting section
//! headers into their own rows, and dropping the boilerplate tail — to
//! produce one clean row per channel.
//!
//! ## Pipeline Overview
//!
//! ```text
//! guide PDF
//!  │
//!  ├─ 1. Extract    raw text spans via pdfium, one line per text object
//!  ├─ 2. Normalize  merge fragments (or filter noise) into logical lines
//!  ├─ 3. Split      trim at code boundaries, hoist section-header rows,
//!  │                re-split oversized merged lines
//!  ├─ 4. Trim       cut everything from the boilerplate marker on
//!  └─ 5. Output     classified rows + stats, written as `<stem>_channels.tsv`
//! ```
//!
//! Step 3 runs only when a companion section list (`<stem>_sections.tsv`)
//! sits next to the document; a guide without one is still synthesised,
//! just without the section-aware passes.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use channel_synth::{synthesize_to_file, SynthConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SynthConfig::default();
//!     let output = synthesize_to_file("voo_fr.pdf".as_ref(), &config)?;
//!     eprintln!(
//!         "{} rows ({} channels, {} sections)",
//!         output.stats.emitted_rows,
//!         output.stats.channel_rows,
//!         output.stats.section_rows
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `chansynth` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! channel-synth = { version = "0.3", default-features = false }
//! ```
//!
//! ## Guide Families
//!
//! | Profile | Layout | Normalization |
//! |---------|--------|---------------|
//! | `Fragmented` | record split across spans, numbers duplicated per column | merge, then re-split oversized lines |
//! | `Bounded`    | one short line per record, paragraph noise mixed in      | length/shape filter |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod codes;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod synth;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use codes::{CodeEntry, CodeTable};
pub use config::{SourceProfile, SynthConfig, SynthConfigBuilder, OUTPUT_SUFFIX, SECTION_SUFFIX};
pub use error::SynthError;
pub use output::{DocumentInfo, GuideOutput, GuideRow, RowKind, SynthStats};
pub use pipeline::sections::SectionList;
pub use synth::{
    output_path, run_passes, section_list_path, synthesize, synthesize_batch, synthesize_to_file,
};
