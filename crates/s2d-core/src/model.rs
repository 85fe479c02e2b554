//! Interfaces for the pre-trained text vectorizer and classifier.
//!
//! Both are opaque artifacts produced elsewhere; this workspace only uses
//! them through `transform` and `predict_proba`.

use crate::error::Result;

/// Sparse feature row: `(feature_index, value)` pairs sorted by index.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SparseVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Builds a vector, sorting entries and summing duplicate indices.
    ///
    /// Indices outside `dimension` are dropped.
    pub fn new(dimension: usize, mut entries: Vec<(usize, f64)>) -> Self {
        entries.retain(|(index, _)| *index < dimension);
        entries.sort_by_key(|(index, _)| *index);

        let mut merged: Vec<(usize, f64)> = Vec::with_capacity(entries.len());
        for (index, value) in entries {
            match merged.last_mut() {
                Some((last, total)) if *last == index => *total += value,
                _ => merged.push((index, value)),
            }
        }

        Self {
            dimension,
            entries: merged,
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, v)| *v == 0.0)
    }

    /// Dot product with a dense row of the same dimension.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|(index, value)| dense.get(*index).map(|w| w * value))
            .sum()
    }
}

/// Turns text into the feature space the classifier was trained on.
pub trait TextVectorizer: Send + Sync {
    fn transform(&self, text: &str) -> Result<SparseVector>;

    /// Size of the feature space.
    fn feature_count(&self) -> usize;
}

/// Probabilistic multi-class classifier.
pub trait ProbabilisticClassifier: Send + Sync {
    /// One probability per class, index-aligned with the class order.
    fn predict_proba(&self, features: &SparseVector) -> Result<Vec<f64>>;

    fn class_count(&self) -> usize;

    /// Feature count expected by the classifier.
    fn feature_count(&self) -> usize;

    /// Class names recorded in the artifact, if any.
    fn class_names(&self) -> Option<&[String]> {
        None
    }
}
