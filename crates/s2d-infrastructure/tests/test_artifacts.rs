use s2d_core::config::ArtifactConfig;
use s2d_core::model::{ProbabilisticClassifier, TextVectorizer};
use s2d_infrastructure::ArtifactLoader;
use std::fs;
use tempfile::TempDir;

const VECTORIZER: &str = r#"{
    "vocabulary": {"fever": 0, "cough": 1, "rash": 2},
    "idf": [1.0, 1.2, 1.7]
}"#;

const CLASSIFIER: &str = r#"{
    "kind": "logistic_regression",
    "classes": ["Common Cold", "Chicken pox"],
    "coef": [[1.0, 1.0, -1.0], [-1.0, -1.0, 2.0]],
    "intercept": [0.0, 0.0]
}"#;

fn write_artifacts(temp_dir: &TempDir, vectorizer: &str, classifier: &str) -> ArtifactConfig {
    let vectorizer_path = temp_dir.path().join("tfidf_vectorizer.json");
    let classifier_path = temp_dir.path().join("disease_model.json");
    fs::write(&vectorizer_path, vectorizer).unwrap();
    fs::write(&classifier_path, classifier).unwrap();

    ArtifactConfig {
        vectorizer_path,
        classifier_path,
    }
}

#[test]
fn test_load_and_classify() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_artifacts(&temp_dir, VECTORIZER, CLASSIFIER);

    let artifacts = ArtifactLoader::load(&config).expect("Should load artifacts");

    let features = artifacts.vectorizer.transform("fever, cough").unwrap();
    let probabilities = artifacts.classifier.predict_proba(&features).unwrap();

    assert_eq!(probabilities.len(), 2);
    assert!(probabilities[0] > probabilities[1], "cold should win for fever+cough");

    let features = artifacts.vectorizer.transform("rash").unwrap();
    let probabilities = artifacts.classifier.predict_proba(&features).unwrap();
    assert!(probabilities[1] > probabilities[0], "chicken pox should win for rash");
}

#[test]
fn test_missing_vectorizer_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = write_artifacts(&temp_dir, VECTORIZER, CLASSIFIER);
    config.vectorizer_path = temp_dir.path().join("missing.json");

    let err = ArtifactLoader::load(&config).unwrap_err();
    assert!(err.is_artifact());
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_feature_space_mismatch_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let narrow_classifier = r#"{
        "kind": "logistic_regression",
        "coef": [[1.0, 1.0], [-1.0, -1.0]],
        "intercept": [0.0, 0.0]
    }"#;
    let config = write_artifacts(&temp_dir, VECTORIZER, narrow_classifier);

    let err = ArtifactLoader::load(&config).unwrap_err();
    assert!(err.to_string().contains("3 features"));
}

#[test]
fn test_malformed_classifier_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_artifacts(&temp_dir, VECTORIZER, "{ not json");

    let err = ArtifactLoader::load(&config).unwrap_err();
    assert!(err.is_artifact());
}
