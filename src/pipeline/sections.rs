//! Section-phrase loading and matching.
//!
//! Guides group channels under multi-word headers ("Chaînes généralistes",
//! "Musique", …). Which headers exist varies per document, so the list is
//! supplied as a companion file — one phrase per line, UTF-8 — located next
//! to the document. The matcher finds every contiguous token window in a
//! line that exactly equals some phrase; finding nothing is a normal
//! outcome, never an error.

use crate::error::SynthError;
use std::path::Path;
use tracing::debug;

/// The section phrases configured for one document.
///
/// Each phrase is kept tokenized since all matching is token-window based.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionList {
    phrases: Vec<Vec<String>>,
}

/// A contiguous token range `[start, end]` (inclusive) matching a phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhraseMatch {
    pub start: usize,
    pub end: usize,
}

impl SectionList {
    /// Load a section list from its companion file.
    ///
    /// Callers check existence first; a file that exists but cannot be read
    /// is an error the user should see.
    pub fn load(path: &Path) -> Result<Self, SynthError> {
        let content =
            std::fs::read_to_string(path).map_err(|source| SynthError::SectionListUnreadable {
                path: path.to_path_buf(),
                source,
            })?;
        let list = Self::from_lines(content.lines());
        debug!("Loaded {} section phrases from {}", list.phrases.len(), path.display());
        Ok(list)
    }

    /// Build a list from phrase strings, ignoring blank entries.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = lines
            .into_iter()
            .filter_map(|line| {
                let tokens: Vec<String> = line
                    .as_ref()
                    .split_whitespace()
                    .map(str::to_string)
                    .collect();
                (!tokens.is_empty()).then_some(tokens)
            })
            .collect();
        Self { phrases }
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    /// True if the line's tokens exactly equal one configured phrase.
    pub fn is_section_line(&self, line: &str) -> bool {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        self.phrases
            .iter()
            .any(|p| p.len() == tokens.len() && p.iter().zip(&tokens).all(|(a, b)| a == b))
    }

    /// Every window `[start, end]` in `tokens` equal to some phrase.
    ///
    /// Multiple phrases may match at different offsets; overlapping matches
    /// are all reported. An empty result means "no section label present".
    pub fn find_matches(&self, tokens: &[&str]) -> Vec<PhraseMatch> {
        let mut matches = Vec::new();
        for start in 0..tokens.len() {
            for phrase in &self.phrases {
                let end = start + phrase.len();
                if end <= tokens.len()
                    && phrase.iter().zip(&tokens[start..end]).all(|(a, b)| a == b)
                {
                    matches.push(PhraseMatch {
                        start,
                        end: end - 1,
                    });
                }
            }
        }
        matches
    }

    /// The earliest-starting match, which wins when a single insertion
    /// point is needed.
    pub fn earliest_match(&self, tokens: &[&str]) -> Option<PhraseMatch> {
        self.find_matches(tokens).into_iter().min_by_key(|m| m.start)
    }
}
