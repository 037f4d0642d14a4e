//! Unicode normalization and ASCII folding of text chunks.
//!
//! Every line (or whole text) passes through [`normalize`] before it is
//! tokenized or counted, so the choice of form decides whether "é" is one
//! code point, two, or none at all.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Unicode normalization form applied to input text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum NormalizationForm {
    /// Leave text untouched.
    #[default]
    #[serde(rename = "none", alias = "None")]
    #[cfg_attr(feature = "clap", value(name = "none"))]
    None,
    /// Canonical composition.
    #[serde(rename = "NFC", alias = "nfc")]
    #[cfg_attr(feature = "clap", value(name = "NFC", alias = "nfc"))]
    Nfc,
    /// Compatibility composition.
    #[serde(rename = "NFKC", alias = "nfkc")]
    #[cfg_attr(feature = "clap", value(name = "NFKC", alias = "nfkc"))]
    Nfkc,
    /// Canonical decomposition.
    #[serde(rename = "NFD", alias = "nfd")]
    #[cfg_attr(feature = "clap", value(name = "NFD", alias = "nfd"))]
    Nfd,
    /// Compatibility decomposition.
    #[serde(rename = "NFKD", alias = "nfkd")]
    #[cfg_attr(feature = "clap", value(name = "NFKD", alias = "nfkd"))]
    Nfkd,
}

impl NormalizationForm {
    /// Returns the conventional name of the form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Nfc => "NFC",
            Self::Nfkc => "NFKC",
            Self::Nfd => "NFD",
            Self::Nfkd => "NFKD",
        }
    }
}

impl std::fmt::Display for NormalizationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How text chunks are prepared before counting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Normalization {
    /// Normalization form applied first.
    pub form: NormalizationForm,
    /// Drop everything outside ASCII after a compatibility decomposition.
    pub ascii_only: bool,
}

impl Normalization {
    /// Create a normalization setting.
    pub const fn new(form: NormalizationForm, ascii_only: bool) -> Self {
        Self { form, ascii_only }
    }

    /// Apply this setting to a chunk. See [`normalize`].
    pub fn apply<'a>(&self, chunk: &'a str) -> Cow<'a, str> {
        normalize(chunk, self.form, self.ascii_only)
    }
}

/// Normalize a chunk of text.
///
/// `form` is applied first. With `ascii_only`, the result is then decomposed
/// under NFKD and every non-ASCII character is dropped, so diacritics fall
/// away from their base letters and non-Latin scripts vanish entirely.
pub fn normalize(chunk: &str, form: NormalizationForm, ascii_only: bool) -> Cow<'_, str> {
    let formed: Cow<'_, str> = match form {
        NormalizationForm::None => Cow::Borrowed(chunk),
        NormalizationForm::Nfc => Cow::Owned(chunk.nfc().collect()),
        NormalizationForm::Nfkc => Cow::Owned(chunk.nfkc().collect()),
        NormalizationForm::Nfd => Cow::Owned(chunk.nfd().collect()),
        NormalizationForm::Nfkd => Cow::Owned(chunk.nfkd().collect()),
    };

    if !ascii_only || formed.is_ascii() {
        return formed;
    }

    Cow::Owned(formed.nfkd().filter(char::is_ascii).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_leaves_text_borrowed() {
        let out = normalize("Café", NormalizationForm::None, false);
        assert!(matches!(out, Cow::Borrowed("Café")));
    }

    #[test]
    fn ascii_folding_drops_diacritics() {
        let out = normalize("café", NormalizationForm::Nfkd, true);
        assert_eq!(out, "cafe");
    }

    #[test]
    fn ascii_folding_after_composition() {
        let out = normalize("Café naïve coöperate — façade", NormalizationForm::Nfc, true);
        assert!(out.contains("Cafe"));
        assert!(out.contains("naive"));
        assert!(out.contains("cooperate"));
        assert!(out.contains("facade"));
        assert!(out.is_ascii());
    }

    #[test]
    fn ascii_folding_removes_non_latin_scripts() {
        assert_eq!(normalize("Ωμέγα", NormalizationForm::None, true), "");
    }

    #[test]
    fn nfd_splits_and_nfc_recombines() {
        let decomposed = normalize("é", NormalizationForm::Nfd, false);
        assert_eq!(decomposed.chars().count(), 2);
        let recomposed = normalize(&decomposed, NormalizationForm::Nfc, false);
        assert_eq!(recomposed, "é");
    }

    #[test]
    fn nfkc_folds_compatibility_characters() {
        assert_eq!(normalize("ﬁne", NormalizationForm::Nfkc, false), "fine");
    }

    #[test]
    fn form_deserializes_from_either_case() {
        let form: NormalizationForm = serde_json::from_str("\"nfkd\"").unwrap();
        assert_eq!(form, NormalizationForm::Nfkd);
        let form: NormalizationForm = serde_json::from_str("\"NFC\"").unwrap();
        assert_eq!(form, NormalizationForm::Nfc);
    }
}
