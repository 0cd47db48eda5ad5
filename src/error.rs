//! Error types for the channel-synth library.
//!
//! Every variant of [`SynthError`] is fatal *for one document*: the
//! document's pipeline aborts and no output file is written. Batch
//! processing isolates failures per document, so one unreadable PDF never
//! aborts the rest of the run.
//!
//! Two conditions are deliberately **not** errors:
//!
//! * A missing companion section-name list — the section-aware passes are
//!   skipped and bare cleaning still runs.
//! * A heuristic pass finding no match — absence of a match is a valid
//!   outcome everywhere in the pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal per-document errors returned by the channel-synth library.
#[derive(Debug, Error)]
pub enum SynthError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Guide PDF not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    CorruptPdf { path: PathBuf, detail: String },

    /// PDF requires a password but none was provided.
    #[error("PDF '{path}' is encrypted and requires a password.\nProvide it with --password <PASSWORD>.")]
    PasswordRequired { path: PathBuf },

    /// A password was provided but it is wrong.
    #[error("Wrong password for PDF '{path}'")]
    WrongPassword { path: PathBuf },

    /// pdfium returned an error while walking a page's text objects.
    #[error("Text extraction failed on page {page} of '{path}': {detail}")]
    ExtractionFailed {
        path: PathBuf,
        page: usize,
        detail: String,
    },

    // ── Companion-file errors ─────────────────────────────────────────────
    /// A section-name list exists on disk but could not be read.
    ///
    /// A *missing* list is fine (section passes are skipped); a present but
    /// unreadable one is a real problem the user should hear about.
    #[error("Section list '{path}' exists but could not be read: {source}")]
    SectionListUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output listing file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
