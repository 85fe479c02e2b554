//! Per-session state carried between the Predict and Explain actions.
//!
//! A session is a plain value owned by whoever drives the interaction (the
//! REPL loop, a CLI invocation). Workflows borrow it explicitly; nothing here
//! is process-global, so two sessions never observe each other.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::language::Language;
use crate::prediction::Prediction;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionSession {
    pub id: String,
    /// Language used for explanations and narration.
    pub language: Language,
    predictions: Vec<Prediction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PredictionSession {
    /// Creates an empty session with a fresh id.
    pub fn new(language: Language) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            language,
            predictions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// The most recent successful prediction, empty before the first one.
    pub fn predictions(&self) -> &[Prediction] {
        &self.predictions
    }

    pub fn has_predictions(&self) -> bool {
        !self.predictions.is_empty()
    }

    /// Replaces the stored predictions wholesale.
    pub fn replace_predictions(&mut self, predictions: Vec<Prediction>) {
        self.predictions = predictions;
        self.updated_at = Utc::now();
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        self.updated_at = Utc::now();
    }
}

impl Default for PredictionSession {
    fn default() -> Self {
        Self::new(Language::default())
    }
}
