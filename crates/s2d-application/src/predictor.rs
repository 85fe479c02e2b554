//! Disease predictor: vectorize, classify, keep the top three.

use s2d_core::catalog::DiseaseCatalog;
use s2d_core::model::{ProbabilisticClassifier, TextVectorizer};
use s2d_core::prediction::{Prediction, TOP_K, rank_top_k};
use s2d_core::symptom::clean_symptoms;
use s2d_core::{Result, S2dError};
use std::sync::Arc;

#[derive(Clone)]
pub struct DiseasePredictor {
    vectorizer: Arc<dyn TextVectorizer>,
    classifier: Arc<dyn ProbabilisticClassifier>,
    catalog: DiseaseCatalog,
}

impl std::fmt::Debug for DiseasePredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiseasePredictor")
            .field("features", &self.vectorizer.feature_count())
            .field("classes", &self.classifier.class_count())
            .finish()
    }
}

impl DiseasePredictor {
    /// Builds a predictor after checking the catalog against the classifier.
    ///
    /// A mismatch in class count or recorded class names is an `Artifact`
    /// error; the process should not start with it.
    pub fn new(
        vectorizer: Arc<dyn TextVectorizer>,
        classifier: Arc<dyn ProbabilisticClassifier>,
        catalog: DiseaseCatalog,
    ) -> Result<Self> {
        catalog.verify_alignment(classifier.class_count(), classifier.class_names())?;

        if vectorizer.feature_count() != classifier.feature_count() {
            return Err(S2dError::artifact(format!(
                "Vectorizer produces {} features but the classifier expects {}",
                vectorizer.feature_count(),
                classifier.feature_count()
            )));
        }

        Ok(Self {
            vectorizer,
            classifier,
            catalog,
        })
    }

    pub fn catalog(&self) -> &DiseaseCatalog {
        &self.catalog
    }

    /// Predicts the three most likely diseases for English symptom text.
    pub fn predict(&self, symptoms: &str) -> Result<Vec<Prediction>> {
        let cleaned = clean_symptoms(symptoms);
        let features = self.vectorizer.transform(&cleaned)?;
        let probabilities = self.classifier.predict_proba(&features)?;

        if probabilities.len() != self.catalog.len() {
            return Err(S2dError::prediction(format!(
                "Classifier returned {} probabilities for {} diseases",
                probabilities.len(),
                self.catalog.len()
            )));
        }

        let predictions = rank_top_k(&probabilities, TOP_K)
            .into_iter()
            .map(|index| {
                let label = self.catalog.label(index).ok_or_else(|| {
                    S2dError::internal(format!("No disease label at index {index}"))
                })?;
                Ok(Prediction::new(label, probabilities[index]))
            })
            .collect::<Result<Vec<_>>>()?;

        if predictions.len() < TOP_K {
            return Err(S2dError::prediction(format!(
                "Need at least {TOP_K} classes, got {}",
                predictions.len()
            )));
        }

        tracing::debug!(
            top = %predictions[0].label,
            probability = predictions[0].probability,
            "Prediction complete"
        );

        Ok(predictions)
    }
}
