//! Translation adapter: canonical (hard) and display (soft) translation.

use s2d_core::language::{AUTO_DETECT, CANONICAL_LANGUAGE, Language};
use s2d_core::translation::Translator;
use s2d_core::Result;
use std::sync::Arc;

/// Result of a display translation. On failure the English text is kept and
/// `warning` carries the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayText {
    pub text: String,
    pub warning: Option<String>,
}

impl DisplayText {
    pub fn is_translated(&self) -> bool {
        self.warning.is_none()
    }
}

#[derive(Clone)]
pub struct TranslationAdapter {
    translator: Arc<dyn Translator>,
}

impl TranslationAdapter {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    /// Translates user input into English, auto-detecting the source.
    ///
    /// Errors are returned to the caller; the Predict workflow stops on them.
    pub async fn to_canonical(&self, text: &str) -> Result<String> {
        self.translator
            .translate(text, AUTO_DETECT, CANONICAL_LANGUAGE)
            .await
    }

    /// Translates English text into the display language.
    ///
    /// Never fails: the English text is returned with a warning instead.
    pub async fn to_target(&self, text: &str, language: Language) -> DisplayText {
        if language.is_canonical() {
            return DisplayText {
                text: text.to_string(),
                warning: None,
            };
        }

        match self
            .translator
            .translate(text, CANONICAL_LANGUAGE, language.code())
            .await
        {
            Ok(translated) => DisplayText {
                text: translated,
                warning: None,
            },
            Err(e) => {
                tracing::warn!(target_language = language.code(), error = %e, "Display translation failed");
                DisplayText {
                    text: text.to_string(),
                    warning: Some(e.to_string()),
                }
            }
        }
    }
}
