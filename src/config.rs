//! Configuration types for guide-PDF synthesis.
//!
//! All pipeline behaviour is controlled through [`SynthConfig`], built via
//! its [`SynthConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs across worker threads, serialise them for
//! logging, and diff two runs to understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! A ten-field constructor breaks on every new field. The builder lets
//! callers set only what they care about and rely on documented defaults.

use crate::codes::CodeTable;
use crate::error::SynthError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Suffix appended to the document stem for the output listing.
pub const OUTPUT_SUFFIX: &str = "_channels.tsv";

/// Suffix the companion section-name list is looked up under.
pub const SECTION_SUFFIX: &str = "_sections.tsv";

/// Which guide family a document belongs to.
///
/// The two families produce very different span streams and therefore need
/// different normalization and boundary policies. They share the code table
/// and the section matcher; everything else is profile-dependent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SourceProfile {
    /// Fragmented multi-line spans: channel numbers, names, and codes arrive
    /// as separate (sometimes duplicated) spans that must be merged back
    /// into logical lines, then re-split at code boundaries. (default)
    #[default]
    Fragmented,
    /// Bounded merged descriptions: each record is already one short line,
    /// but the stream is polluted with paragraph text that must be filtered
    /// by length and leading-channel-number shape.
    Bounded,
}

/// Configuration for one synthesis run.
///
/// Built via [`SynthConfig::builder()`] or [`SynthConfig::default()`].
///
/// # Example
/// ```rust
/// use channel_synth::{SourceProfile, SynthConfig};
///
/// let config = SynthConfig::builder()
///     .profile(SourceProfile::Fragmented)
///     .long_line_threshold(15)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthConfig {
    /// Guide family the document belongs to. Default: [`SourceProfile::Fragmented`].
    pub profile: SourceProfile,

    /// The package-code table used as splitting delimiter. Default: [`CodeTable::voo`].
    ///
    /// Threaded explicitly into every pass that tests code membership; there
    /// is no ambient global lookup anywhere in the pipeline.
    pub codes: CodeTable,

    /// Character length above which a merged line is considered oversized
    /// and re-split at code boundaries. Default: 15.
    ///
    /// Channel rows in the fragmented format are short ("12 La Une B"); a
    /// longer line almost always means several records were merged into one
    /// span by the PDF's layout.
    pub long_line_threshold: usize,

    /// Maximum character length a line may have in the bounded profile
    /// before it is dropped as paragraph noise. Default: 35.
    pub max_line_chars: usize,

    /// Maximum digit count for a token to qualify as a channel number.
    /// Default: 3.
    pub channel_number_digits: usize,

    /// Literal noise fragment stripped from every line in the bounded
    /// profile (the guide prints an "app" glyph marker inline). Default: "app".
    pub noise_fragment: String,

    /// Boilerplate markers: the first row whose prefix equals one of these
    /// strings is discarded along with every row after it.
    pub boilerplate_markers: Vec<String>,

    /// Follower re-interleave rule for the oversized-line splitter.
    /// Default: true. Ignored by the bounded profile.
    ///
    /// When an oversized merged line is split, the row that immediately
    /// followed it in the pre-split sequence is re-inserted between the
    /// first split segment and the rest. This recovers a channel-number row
    /// that visually preceded the long description in the source layout.
    /// The rule is coupled to one specific guide layout, hence the toggle.
    pub interleave_follower: bool,

    /// Directory the output listing is written to.
    /// Default: the input document's directory.
    pub output_dir: Option<PathBuf>,

    /// Directory the companion section-name list is looked up in.
    /// Default: the input document's directory.
    pub section_dir: Option<PathBuf>,

    /// PDF user password for encrypted documents.
    pub password: Option<String>,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            profile: SourceProfile::default(),
            codes: CodeTable::voo(),
            long_line_threshold: 15,
            max_line_chars: 35,
            channel_number_digits: 3,
            noise_fragment: "app".to_string(),
            boilerplate_markers: vec![
                "Retrouvez votre chaîne locale ici".to_string(),
                "Retrouvez les chaînes".to_string(),
            ],
            interleave_follower: true,
            output_dir: None,
            section_dir: None,
            password: None,
        }
    }
}

impl SynthConfig {
    /// Create a new builder for `SynthConfig`.
    pub fn builder() -> SynthConfigBuilder {
        SynthConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`SynthConfig`].
#[derive(Debug)]
pub struct SynthConfigBuilder {
    config: SynthConfig,
}

impl SynthConfigBuilder {
    pub fn profile(mut self, profile: SourceProfile) -> Self {
        self.config.profile = profile;
        self
    }

    pub fn codes(mut self, codes: CodeTable) -> Self {
        self.config.codes = codes;
        self
    }

    pub fn long_line_threshold(mut self, chars: usize) -> Self {
        self.config.long_line_threshold = chars;
        self
    }

    pub fn max_line_chars(mut self, chars: usize) -> Self {
        self.config.max_line_chars = chars;
        self
    }

    pub fn channel_number_digits(mut self, digits: usize) -> Self {
        self.config.channel_number_digits = digits.max(1);
        self
    }

    pub fn noise_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.config.noise_fragment = fragment.into();
        self
    }

    pub fn boilerplate_markers<I, S>(mut self, markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.boilerplate_markers = markers.into_iter().map(Into::into).collect();
        self
    }

    pub fn interleave_follower(mut self, on: bool) -> Self {
        self.config.interleave_follower = on;
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    pub fn section_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.section_dir = Some(dir.into());
        self
    }

    pub fn password(mut self, pwd: impl Into<String>) -> Self {
        self.config.password = Some(pwd.into());
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<SynthConfig, SynthError> {
        let c = &self.config;
        if c.codes.is_empty() {
            return Err(SynthError::InvalidConfig(
                "Code table must not be empty — splitting has no delimiters without it".into(),
            ));
        }
        if c.long_line_threshold == 0 {
            return Err(SynthError::InvalidConfig(
                "long_line_threshold must be ≥ 1".into(),
            ));
        }
        if c.max_line_chars == 0 {
            return Err(SynthError::InvalidConfig(
                "max_line_chars must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds() {
        let config = SynthConfig::builder().build().expect("valid defaults");
        assert_eq!(config.profile, SourceProfile::Fragmented);
        assert_eq!(config.long_line_threshold, 15);
        assert_eq!(config.max_line_chars, 35);
        assert!(config.interleave_follower);
        assert_eq!(config.codes.len(), 20);
    }

    #[test]
    fn empty_code_table_is_rejected() {
        let empty: Vec<(String, String)> = vec![];
        let result = SynthConfig::builder().codes(CodeTable::new(empty)).build();
        assert!(result.is_err());
    }

    #[test]
    fn zero_threshold_is_rejected() {
        assert!(SynthConfig::builder().long_line_threshold(0).build().is_err());
    }

    #[test]
    fn builder_overrides_stick() {
        let config = SynthConfig::builder()
            .profile(SourceProfile::Bounded)
            .max_line_chars(50)
            .interleave_follower(false)
            .boilerplate_markers(["Fin de la liste"])
            .build()
            .unwrap();
        assert_eq!(config.profile, SourceProfile::Bounded);
        assert_eq!(config.max_line_chars, 50);
        assert!(!config.interleave_follower);
        assert_eq!(config.boilerplate_markers, vec!["Fin de la liste"]);
    }
}
