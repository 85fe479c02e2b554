//! Loading of the pre-trained vectorizer and classifier artifacts.
//!
//! Artifacts are read once at startup. Anything unexpected (missing file,
//! malformed JSON, feature-space mismatch between the two artifacts) is a
//! hard error; callers are expected to abort.

mod classifier;
mod tfidf;

pub use classifier::{ArtifactClassifier, ClassifierArtifact, MultiClass};
pub use tfidf::{Norm, TfidfArtifact, TfidfVectorizer};

use s2d_core::config::ArtifactConfig;
use s2d_core::model::{ProbabilisticClassifier, TextVectorizer};
use s2d_core::{Result, S2dError};
use std::path::Path;
use std::sync::Arc;

/// The loaded artifact pair, ready to be shared with the predictor.
#[derive(Clone)]
pub struct LoadedArtifacts {
    pub vectorizer: Arc<TfidfVectorizer>,
    pub classifier: Arc<ArtifactClassifier>,
}

impl std::fmt::Debug for LoadedArtifacts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedArtifacts")
            .field("features", &self.vectorizer.feature_count())
            .field("classes", &self.classifier.class_count())
            .finish()
    }
}

fn read_artifact(path: &Path, what: &str) -> Result<String> {
    if !path.exists() {
        return Err(S2dError::artifact(format!(
            "{what} artifact not found at {}",
            path.display()
        )));
    }

    std::fs::read_to_string(path).map_err(|e| {
        S2dError::artifact(format!(
            "Failed to read {what} artifact at {}: {e}",
            path.display()
        ))
    })
}

pub struct ArtifactLoader;

impl ArtifactLoader {
    /// Loads both artifacts and checks they share one feature space.
    pub fn load(config: &ArtifactConfig) -> Result<LoadedArtifacts> {
        let vectorizer =
            TfidfVectorizer::from_json_str(&read_artifact(&config.vectorizer_path, "Vectorizer")?)?;
        let classifier = ArtifactClassifier::from_json_str(&read_artifact(
            &config.classifier_path,
            "Classifier",
        )?)?;

        if vectorizer.feature_count() != classifier.feature_count() {
            return Err(S2dError::artifact(format!(
                "Vectorizer produces {} features but the classifier expects {}",
                vectorizer.feature_count(),
                classifier.feature_count()
            )));
        }

        tracing::info!(
            vectorizer = %config.vectorizer_path.display(),
            classifier = %config.classifier_path.display(),
            features = vectorizer.feature_count(),
            classes = classifier.class_count(),
            "Loaded model artifacts"
        );

        Ok(LoadedArtifacts {
            vectorizer: Arc::new(vectorizer),
            classifier: Arc::new(classifier),
        })
    }
}
