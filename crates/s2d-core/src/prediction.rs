//! Prediction results and confidence badges.

use serde::{Deserialize, Serialize};

/// Number of predictions kept from the classifier output.
pub const TOP_K: usize = 3;

/// Probability at or above which a prediction is shown as high confidence.
pub const HIGH_CONFIDENCE: f64 = 0.75;

/// Probability at or above which a prediction is shown as medium confidence.
pub const MEDIUM_CONFIDENCE: f64 = 0.5;

/// A disease label with its predicted probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub probability: f64,
}

impl Prediction {
    pub fn new(label: impl Into<String>, probability: f64) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }

    pub fn badge(&self) -> ConfidenceBadge {
        ConfidenceBadge::from_probability(self.probability)
    }

    /// Result line shown to the user, e.g. `"1. Malaria — Medium (0.60 confidence)"`.
    pub fn result_line(&self, rank: usize) -> String {
        format!(
            "{rank}. {} — {} ({:.2} confidence)",
            self.label,
            self.badge(),
            self.probability
        )
    }
}

/// Discretized confidence shown next to a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceBadge {
    High,
    Medium,
    Low,
}

impl ConfidenceBadge {
    /// Maps a probability onto a badge. Both thresholds are inclusive.
    pub fn from_probability(probability: f64) -> Self {
        if probability >= HIGH_CONFIDENCE {
            ConfidenceBadge::High
        } else if probability >= MEDIUM_CONFIDENCE {
            ConfidenceBadge::Medium
        } else {
            ConfidenceBadge::Low
        }
    }
}

impl std::fmt::Display for ConfidenceBadge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ConfidenceBadge::High => "High",
            ConfidenceBadge::Medium => "Medium",
            ConfidenceBadge::Low => "Low",
        };
        f.write_str(label)
    }
}

/// Returns the indices of the `k` highest probabilities, highest first.
///
/// The sort is stable, so equal probabilities keep their index order. NaN
/// values rank below every real probability.
pub fn rank_top_k(probabilities: &[f64], k: usize) -> Vec<usize> {
    let key = |p: f64| if p.is_nan() { f64::NEG_INFINITY } else { p };

    let mut indices: Vec<usize> = (0..probabilities.len()).collect();
    indices.sort_by(|&a, &b| key(probabilities[b]).total_cmp(&key(probabilities[a])));
    indices.truncate(k);
    indices
}
