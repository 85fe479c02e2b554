//! Configuration models for `config.toml` and `secret.json`.
//!
//! Every field has a default so a missing or partial `config.toml` still
//! yields a usable configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::language::Language;

pub const DEFAULT_VECTORIZER_FILE: &str = "tfidf_vectorizer.json";
pub const DEFAULT_CLASSIFIER_FILE: &str = "disease_model.json";
pub const DEFAULT_EXPLANATION_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_EXPLANATION_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a medical assistant.";
pub const DEFAULT_PROMPT_TEMPLATE: &str = "Explain the disease {{ label }} in simple terms.";
pub const DEFAULT_TRANSLATION_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";
pub const DEFAULT_SPEECH_ENDPOINT: &str = "https://translate.google.com/translate_tts";

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub default_language: Language,
    pub artifacts: ArtifactConfig,
    pub explanation: ExplanationConfig,
    pub translation: TranslationConfig,
    pub speech: SpeechConfig,
    pub logging: LoggingConfig,
}

/// Locations of the pre-trained artifacts.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ArtifactConfig {
    pub vectorizer_path: PathBuf,
    pub classifier_path: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            vectorizer_path: PathBuf::from(DEFAULT_VECTORIZER_FILE),
            classifier_path: PathBuf::from(DEFAULT_CLASSIFIER_FILE),
        }
    }
}

/// Chat-completion endpoint used for disease explanations.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ExplanationConfig {
    pub endpoint: String,
    pub model: String,
    pub system_prompt: String,
    /// minijinja template rendered with `label`.
    pub prompt_template: String,
}

impl Default for ExplanationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_EXPLANATION_ENDPOINT.to_string(),
            model: DEFAULT_EXPLANATION_MODEL.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TranslationConfig {
    pub endpoint: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TRANSLATION_ENDPOINT.to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SpeechConfig {
    pub endpoint: String,
    /// Directory for transient audio files. The system temp dir when unset.
    pub audio_dir: Option<PathBuf>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SPEECH_ENDPOINT.to_string(),
            audio_dir: None,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    pub json: bool,
    /// Enables a daily-rotated log file in this directory.
    pub log_dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
            log_dir: None,
        }
    }
}

/// Root configuration structure for secret.json
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct SecretConfig {
    #[serde(default)]
    pub groq: Option<GroqConfig>,
}

/// Credentials for the explanation endpoint.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GroqConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

impl SecretConfig {
    /// API key, or the empty string when none is configured.
    pub fn api_key(&self) -> &str {
        self.groq.as_ref().map(|g| g.api_key.as_str()).unwrap_or("")
    }

    pub fn model_name(&self) -> Option<&str> {
        self.groq.as_ref().and_then(|g| g.model_name.as_deref())
    }
}
