//! Diagnosis use case: the Predict and Explain workflows.
//!
//! Both workflows run sequentially against one [`PredictionSession`]. Predict
//! needs `&mut` access because a successful run overwrites the session's
//! predictions; Explain only reads them.

use crate::explanation::ExplanationFetcher;
use crate::narrator::{AudioNarrator, NarratedAudio};
use crate::predictor::DiseasePredictor;
use crate::translation::TranslationAdapter;
use s2d_core::prediction::{ConfidenceBadge, Prediction};
use s2d_core::session::PredictionSession;
use s2d_core::symptom::SymptomQuery;
use s2d_core::Result;
use serde::Serialize;

/// Result of the Predict workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictOutcome {
    /// Nothing was selected or typed. No service was called.
    MissingSymptoms,
    /// Translating the input into English failed. The session is unchanged.
    TranslationFailed { reason: String },
    Predicted {
        /// The merged input as entered.
        symptoms: String,
        /// The English text handed to the predictor.
        canonical: String,
        predictions: Vec<Prediction>,
    },
}

/// One explained prediction, in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainItem {
    pub rank: usize,
    pub label: String,
    pub probability: f64,
    pub badge: ConfidenceBadge,
    pub text: String,
    pub fallback: bool,
    /// Set when the text could not be translated and is shown in English.
    pub translation_warning: Option<String>,
}

/// Everything the Explain workflow produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplainReport {
    pub items: Vec<ExplainItem>,
    /// `"<n>. <label>: <text>\n"` per item, as sent to speech synthesis.
    pub narration: String,
    pub audio: Option<NarratedAudio>,
    /// Why audio is missing, when it is.
    pub audio_error: Option<String>,
}

impl ExplainReport {
    pub fn translation_warnings(&self) -> impl Iterator<Item = &ExplainItem> {
        self.items
            .iter()
            .filter(|item| item.translation_warning.is_some())
    }
}

fn narration_line(rank: usize, label: &str, text: &str) -> String {
    format!("{rank}. {label}: {text}\n")
}

#[derive(Clone)]
pub struct DiagnosisUseCase {
    translation: TranslationAdapter,
    predictor: DiseasePredictor,
    explainer: ExplanationFetcher,
    narrator: AudioNarrator,
}

impl DiagnosisUseCase {
    pub fn new(
        translation: TranslationAdapter,
        predictor: DiseasePredictor,
        explainer: ExplanationFetcher,
        narrator: AudioNarrator,
    ) -> Self {
        Self {
            translation,
            predictor,
            explainer,
            narrator,
        }
    }

    pub fn predictor(&self) -> &DiseasePredictor {
        &self.predictor
    }

    /// Runs the Predict workflow.
    ///
    /// Precondition and translation failures are reported through the outcome
    /// and leave `session` untouched. Vectorizer or classifier errors are
    /// returned as `Err`, also without touching `session`.
    pub async fn predict<S: AsRef<str>>(
        &self,
        session: &mut PredictionSession,
        selected: &[S],
        typed: &str,
    ) -> Result<PredictOutcome> {
        let Some(query) = SymptomQuery::collect(selected, typed) else {
            tracing::info!(session = %session.id, "Predict requested without symptoms");
            return Ok(PredictOutcome::MissingSymptoms);
        };

        let canonical = match self.translation.to_canonical(query.as_str()).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(session = %session.id, error = %e, "Symptom translation failed");
                return Ok(PredictOutcome::TranslationFailed {
                    reason: e.to_string(),
                });
            }
        };

        let predictions = self.predictor.predict(&canonical)?;
        session.replace_predictions(predictions.clone());

        tracing::info!(
            session = %session.id,
            top = %predictions[0].label,
            "Predicted diseases"
        );

        Ok(PredictOutcome::Predicted {
            symptoms: query.into_inner(),
            canonical,
            predictions,
        })
    }

    /// Runs the Explain workflow, or returns `None` before any prediction.
    ///
    /// Never fails: explanation, translation and audio problems are folded
    /// into the report.
    pub async fn explain(&self, session: &PredictionSession) -> Option<ExplainReport> {
        if !session.has_predictions() {
            return None;
        }

        let language = session.language;
        let mut items = Vec::with_capacity(session.predictions().len());
        let mut narration = String::new();

        for (index, prediction) in session.predictions().iter().enumerate() {
            let rank = index + 1;
            let explanation = self.explainer.fetch(prediction).await;
            let display = self.translation.to_target(&explanation.text, language).await;

            narration.push_str(&narration_line(rank, &prediction.label, &display.text));
            items.push(ExplainItem {
                rank,
                label: prediction.label.clone(),
                probability: prediction.probability,
                badge: prediction.badge(),
                text: display.text,
                fallback: explanation.is_fallback(),
                translation_warning: display.warning,
            });
        }

        let (audio, audio_error) = match self.narrator.narrate(&narration, language.code()).await {
            Ok(audio) => (Some(audio), None),
            Err(e) => {
                tracing::warn!(session = %session.id, error = %e, "Audio generation failed");
                (None, Some(e.to_string()))
            }
        };

        Some(ExplainReport {
            items,
            narration,
            audio,
            audio_error,
        })
    }
}
