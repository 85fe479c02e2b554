//! Plain-language explanations for predicted diseases.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Generates an explanation for a disease label.
#[async_trait::async_trait]
pub trait ExplanationService: Send + Sync {
    async fn explain(&self, label: &str) -> Result<String>;
}

/// Where an explanation's text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationSource {
    Service,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub text: String,
    pub source: ExplanationSource,
}

impl Explanation {
    pub fn from_service(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: ExplanationSource::Service,
        }
    }

    pub fn fallback(label: &str, probability: f64) -> Self {
        Self {
            text: fallback_explanation(label, probability),
            source: ExplanationSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ExplanationSource::Fallback
    }
}

/// Deterministic text used when the explanation service cannot answer.
pub fn fallback_explanation(label: &str, probability: f64) -> String {
    format!("{label} is predicted with {probability:.2} confidence.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_text() {
        assert_eq!(
            fallback_explanation("Malaria", 0.67),
            "Malaria is predicted with 0.67 confidence."
        );
        assert_eq!(
            fallback_explanation("Acne", 0.1),
            "Acne is predicted with 0.10 confidence."
        );
    }

    #[test]
    fn test_fallback_marks_source() {
        let explanation = Explanation::fallback("Dengue", 0.5);
        assert!(explanation.is_fallback());
        assert!(!Explanation::from_service("text").is_fallback());
    }
}
