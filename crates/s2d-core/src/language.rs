//! Display languages and speech language clamping.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Language code used for classification and explanation requests.
pub const CANONICAL_LANGUAGE: &str = "en";

/// Source code that asks the translation service to detect the language.
pub const AUTO_DETECT: &str = "auto";

/// Language codes the speech engine is asked to synthesize.
pub const SPEECH_LANGUAGES: [&str; 6] = ["en", "ur", "es", "fr", "ar", "pa"];

/// One of the six languages offered to the user.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Urdu,
    Punjabi,
    Spanish,
    French,
    Arabic,
}

impl Language {
    /// Two-letter code sent to the translation and speech services.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Urdu => "ur",
            Language::Punjabi => "pa",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::Arabic => "ar",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::iter().find(|lang| lang.code().eq_ignore_ascii_case(code))
    }

    /// Accepts either a display name ("Urdu") or a code ("ur").
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        value
            .parse::<Language>()
            .ok()
            .or_else(|| Self::from_code(value))
    }

    pub fn is_canonical(&self) -> bool {
        self.code() == CANONICAL_LANGUAGE
    }

    /// All languages in selector order.
    pub fn all() -> Vec<Language> {
        Self::iter().collect()
    }
}

/// Clamps a requested code to one the speech engine supports, falling back to English.
pub fn speech_language(code: &str) -> &'static str {
    SPEECH_LANGUAGES
        .iter()
        .copied()
        .find(|supported| *supported == code)
        .unwrap_or(CANONICAL_LANGUAGE)
}
