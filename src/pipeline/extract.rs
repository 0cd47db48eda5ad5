//! Span extraction: pull the raw text-span stream out of a guide PDF.
//!
//! ## Why per-object, not per-page text?
//!
//! `PdfPage::text().all()` flattens a page into one string using pdfium's
//! own layout heuristics, which silently merges the very fragments the
//! pipeline needs to see individually. Iterating the page's text *objects*
//! instead yields one string per positioned span in content order (page,
//! then block, then line, then span) — the granularity the normalizer's
//! merge heuristics are written against. No reordering or merging happens
//! here; this pass is deliberately dumb.

use crate::error::SynthError;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Result of walking one document: the raw span lines plus page count.
#[derive(Debug, Clone)]
pub struct ExtractedSpans {
    /// One entry per text span, in document reading order. Spans containing
    /// embedded newlines are split so the sequence stays line-per-span.
    pub lines: Vec<String>,
    pub page_count: usize,
}

/// Validate the path and check the `%PDF` magic bytes before handing the
/// file to pdfium, so callers get a meaningful error rather than an opaque
/// binding failure.
pub fn validate_document(path: &Path) -> Result<(), SynthError> {
    if !path.exists() {
        return Err(SynthError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(mut f) => {
            use std::io::Read;
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(SynthError::NotAPdf {
                    path: path.to_path_buf(),
                    magic,
                });
            }
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            Err(SynthError::PermissionDenied {
                path: path.to_path_buf(),
            })
        }
        Err(_) => Err(SynthError::FileNotFound {
            path: path.to_path_buf(),
        }),
    }
}

/// Extract every text span from the document, in reading order.
///
/// Fatal for the document on any pdfium error — no partial span stream is
/// ever returned. An empty result is *not* an error here; the orchestrator
/// decides what an empty document means.
pub fn extract_spans(path: &Path, password: Option<&str>) -> Result<ExtractedSpans, SynthError> {
    validate_document(path)?;

    let pdfium = Pdfium::default();

    let document = pdfium.load_pdf_from_file(path, password).map_err(|e| {
        let err_str = format!("{:?}", e);
        if err_str.contains("Password") || err_str.contains("password") {
            if password.is_some() {
                SynthError::WrongPassword {
                    path: path.to_path_buf(),
                }
            } else {
                SynthError::PasswordRequired {
                    path: path.to_path_buf(),
                }
            }
        } else {
            SynthError::CorruptPdf {
                path: path.to_path_buf(),
                detail: err_str,
            }
        }
    })?;

    let pages = document.pages();
    let page_count = pages.len() as usize;
    info!("PDF loaded: {} pages", page_count);

    let mut lines = Vec::new();

    for index in 0..page_count {
        let page = pages
            .get(index as u16)
            .map_err(|e| SynthError::ExtractionFailed {
                path: path.to_path_buf(),
                page: index + 1,
                detail: format!("{:?}", e),
            })?;

        let mut page_spans = 0usize;

        for object in page.objects().iter() {
            if let Some(text_object) = object.as_text_object() {
                let text = text_object.text();
                for line in text.lines() {
                    let line = line.trim();
                    if !line.is_empty() {
                        lines.push(line.to_string());
                        page_spans += 1;
                    }
                }
            }
        }

        debug!("Page {}: {} spans", index + 1, page_spans);
    }

    info!("Extracted {} spans from {} pages", lines.len(), page_count);

    Ok(ExtractedSpans { lines, page_count })
}
