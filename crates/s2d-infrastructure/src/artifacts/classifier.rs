//! Linear probabilistic classifiers loaded from exported JSON artifacts.

use s2d_core::model::{ProbabilisticClassifier, SparseVector};
use s2d_core::{Result, S2dError};
use serde::Deserialize;

/// How logistic regression scores are turned into probabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MultiClass {
    #[default]
    Multinomial,
    Ovr,
}

/// On-disk shape of `disease_model.json`, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifierArtifact {
    LogisticRegression {
        #[serde(default)]
        classes: Option<Vec<String>>,
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
        #[serde(default)]
        multi_class: MultiClass,
    },
    MultinomialNb {
        #[serde(default)]
        classes: Option<Vec<String>>,
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    },
}

#[derive(Debug, Clone)]
enum Model {
    Logistic {
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
        multi_class: MultiClass,
    },
    NaiveBayes {
        class_log_prior: Vec<f64>,
        feature_log_prob: Vec<Vec<f64>>,
    },
}

#[derive(Debug, Clone)]
pub struct ArtifactClassifier {
    model: Model,
    classes: Option<Vec<String>>,
    class_count: usize,
    feature_count: usize,
}

fn check_rows(rows: &[Vec<f64>], what: &str) -> Result<usize> {
    let width = rows
        .first()
        .map(Vec::len)
        .ok_or_else(|| S2dError::artifact(format!("Classifier {what} is empty")))?;

    if let Some(row) = rows.iter().position(|r| r.len() != width) {
        return Err(S2dError::artifact(format!(
            "Classifier {what} row {row} has {} features, expected {width}",
            rows[row].len()
        )));
    }

    Ok(width)
}

fn softmax(scores: &[f64]) -> Vec<f64> {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl ArtifactClassifier {
    /// Validates an artifact and builds the classifier.
    pub fn from_artifact(artifact: ClassifierArtifact) -> Result<Self> {
        let (model, classes, class_count, feature_count) = match artifact {
            ClassifierArtifact::LogisticRegression {
                classes,
                coef,
                intercept,
                multi_class,
            } => {
                let feature_count = check_rows(&coef, "coef")?;
                if intercept.len() != coef.len() {
                    return Err(S2dError::artifact(format!(
                        "Classifier has {} coefficient rows but {} intercepts",
                        coef.len(),
                        intercept.len()
                    )));
                }
                // A single row is a binary model.
                let class_count = if coef.len() == 1 { 2 } else { coef.len() };
                (
                    Model::Logistic {
                        coef,
                        intercept,
                        multi_class,
                    },
                    classes,
                    class_count,
                    feature_count,
                )
            }
            ClassifierArtifact::MultinomialNb {
                classes,
                class_log_prior,
                feature_log_prob,
            } => {
                let feature_count = check_rows(&feature_log_prob, "feature_log_prob")?;
                if class_log_prior.len() != feature_log_prob.len() {
                    return Err(S2dError::artifact(format!(
                        "Classifier has {} class priors but {} feature rows",
                        class_log_prior.len(),
                        feature_log_prob.len()
                    )));
                }
                let class_count = class_log_prior.len();
                (
                    Model::NaiveBayes {
                        class_log_prior,
                        feature_log_prob,
                    },
                    classes,
                    class_count,
                    feature_count,
                )
            }
        };

        if let Some(names) = &classes {
            if names.len() != class_count {
                return Err(S2dError::artifact(format!(
                    "Classifier lists {} class names for {} classes",
                    names.len(),
                    class_count
                )));
            }
        }

        Ok(Self {
            model,
            classes,
            class_count,
            feature_count,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let artifact: ClassifierArtifact = serde_json::from_str(json)
            .map_err(|e| S2dError::artifact(format!("Invalid classifier artifact: {e}")))?;
        Self::from_artifact(artifact)
    }
}

impl ProbabilisticClassifier for ArtifactClassifier {
    fn predict_proba(&self, features: &SparseVector) -> Result<Vec<f64>> {
        if features.dimension() != self.feature_count {
            return Err(S2dError::prediction(format!(
                "Feature vector has dimension {} but the classifier expects {}",
                features.dimension(),
                self.feature_count
            )));
        }

        let probabilities = match &self.model {
            Model::Logistic {
                coef,
                intercept,
                multi_class,
            } => {
                let scores: Vec<f64> = coef
                    .iter()
                    .zip(intercept)
                    .map(|(row, b)| features.dot(row) + b)
                    .collect();

                match (scores.as_slice(), multi_class) {
                    ([score], MultiClass::Multinomial) => softmax(&[-score, *score]),
                    ([score], MultiClass::Ovr) => {
                        let p = sigmoid(*score);
                        vec![1.0 - p, p]
                    }
                    (_, MultiClass::Multinomial) => softmax(&scores),
                    (_, MultiClass::Ovr) => {
                        let raw: Vec<f64> = scores.iter().map(|s| sigmoid(*s)).collect();
                        let sum: f64 = raw.iter().sum();
                        if sum > 0.0 {
                            raw.into_iter().map(|p| p / sum).collect()
                        } else {
                            vec![1.0 / raw.len() as f64; raw.len()]
                        }
                    }
                }
            }
            Model::NaiveBayes {
                class_log_prior,
                feature_log_prob,
            } => {
                let joint: Vec<f64> = feature_log_prob
                    .iter()
                    .zip(class_log_prior)
                    .map(|(row, prior)| features.dot(row) + prior)
                    .collect();
                softmax(&joint)
            }
        };

        if probabilities.iter().any(|p| !p.is_finite()) {
            return Err(S2dError::prediction(
                "Classifier produced non-finite probabilities",
            ));
        }

        Ok(probabilities)
    }

    fn class_count(&self) -> usize {
        self.class_count
    }

    fn feature_count(&self) -> usize {
        self.feature_count
    }

    fn class_names(&self) -> Option<&[String]> {
        self.classes.as_deref()
    }
}
