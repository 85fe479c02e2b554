//! Domain types and service interfaces for Symptom2Disease.
//!
//! Nothing in this crate talks to the network or the file system; concrete
//! implementations live in `s2d-infrastructure` and `s2d-interaction`.

pub mod catalog;
pub mod config;
pub mod error;
pub mod explanation;
pub mod language;
pub mod model;
pub mod prediction;
pub mod secret;
pub mod session;
pub mod speech;
pub mod symptom;
pub mod translation;

// Re-export common types
pub use catalog::{COMMON_SYMPTOMS, DISCLAIMER, DISEASE_LABELS, DiseaseCatalog};
pub use error::{Result, S2dError};
pub use language::Language;
pub use prediction::{ConfidenceBadge, Prediction};
pub use session::PredictionSession;
pub use symptom::SymptomQuery;
