//! The package-code table: abbreviation → full bouquet label.
//!
//! Guide PDFs mark each channel row with short package codes ("VS", "Doc",
//! "Enf", …) whose expansions ("VOOsport", "Be Bouquet Documentaires", …)
//! also appear verbatim in some layouts. The table therefore serves double
//! duty: it names the package a channel belongs to, *and* it acts as the
//! delimiter the boundary splitter cuts on — a code token followed by a
//! non-code token marks the end of one channel record.
//!
//! The table is a fixed format contract, never mutated at runtime, and is
//! passed explicitly into every pass that tests code membership. Changing
//! its contents changes splitting behaviour, so treat edits as a format
//! change, not a tweak.

use serde::{Deserialize, Serialize};

/// The known package codes for the primary (VOO-family) guide format.
///
/// Order matters only for display; membership testing is what the pipeline
/// relies on.
const VOO_CODES: &[(&str, &str)] = &[
    ("VS", "VOOsport"),
    ("w VS", "VOOsport World"),
    ("Pa", "Bouquet Panorama"),
    ("Ci", "Option Ciné Pass"),
    ("Doc", "Be Bouquet Documentaires"),
    ("Div", "Be Bouquet Divertissement"),
    ("Co", "Be Cool"),
    ("Enf", "Be Bouquet Enfant"),
    ("Sp", "Be Bouquet Sport"),
    ("Sel", "Be Bouquet Selection"),
    ("Inf", "Option Infos"),
    ("Sen", "Option Sensation"),
    ("Ch", "Option Charme"),
    ("FF", "Family Fun"),
    ("DM", "Discover More"),
    ("CX", "Classé X"),
    ("MX", "Man-X"),
    ("B", "Bruxelles"),
    ("G", "Comm. German"),
    ("W", "Wallonie"),
];

/// One abbreviation → full label pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeEntry {
    /// Short marker as printed in the guide margin, e.g. "VS".
    pub abbr: String,
    /// Full package label, e.g. "VOOsport".
    pub label: String,
}

/// An ordered, immutable set of package codes.
///
/// Both the abbreviation and the full label count as code tokens for
/// [`CodeTable::is_code`] — merged lines may carry either form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeTable {
    entries: Vec<CodeEntry>,
}

impl CodeTable {
    /// Build a table from `(abbreviation, label)` pairs.
    pub fn new<I, A, L>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (A, L)>,
        A: Into<String>,
        L: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(a, l)| CodeEntry {
                    abbr: a.into(),
                    label: l.into(),
                })
                .collect(),
        }
    }

    /// The built-in table for VOO-family guides (~20 entries).
    pub fn voo() -> Self {
        Self::new(VOO_CODES.iter().copied())
    }

    /// True if `token` equals any abbreviation or any full label.
    pub fn is_code(&self, token: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.abbr == token || e.label == token)
    }

    /// Full label for an abbreviation, if known.
    pub fn label_for(&self, abbr: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.abbr == abbr)
            .map(|e| e.label.as_str())
    }

    /// Iterate entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &CodeEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CodeTable {
    fn default() -> Self {
        Self::voo()
    }
}
