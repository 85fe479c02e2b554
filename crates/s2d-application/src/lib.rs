//! Application layer for Symptom2Disease.
//!
//! Workflows that coordinate the domain types in `s2d-core` with the service
//! traits implemented by the infrastructure and interaction crates.

pub mod diagnosis;
pub mod explanation;
pub mod narrator;
pub mod predictor;
pub mod translation;

pub use diagnosis::{DiagnosisUseCase, ExplainItem, ExplainReport, PredictOutcome};
pub use explanation::ExplanationFetcher;
pub use narrator::{AudioNarrator, NarratedAudio};
pub use predictor::DiseasePredictor;
pub use translation::{DisplayText, TranslationAdapter};
