use s2d_application::{
    AudioNarrator, DiagnosisUseCase, DiseasePredictor, ExplanationFetcher, PredictOutcome,
    TranslationAdapter,
};
use s2d_core::explanation::ExplanationService;
use s2d_core::model::{ProbabilisticClassifier, SparseVector, TextVectorizer};
use s2d_core::speech::SpeechSynthesizer;
use s2d_core::translation::Translator;
use s2d_core::{ConfidenceBadge, DiseaseCatalog, Language, PredictionSession, Result, S2dError};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Mocks
// ---------------------------------------------------------------------------

#[derive(Default)]
struct MockTranslator {
    calls: Mutex<Vec<(String, String, String)>>,
    fail_canonical: bool,
    fail_display: bool,
}

#[async_trait::async_trait]
impl Translator for MockTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), source.to_string(), target.to_string()));
        if target == "en" {
            if self.fail_canonical {
                return Err(S2dError::network(None, "offline"));
            }
            return Ok(text.to_string());
        }
        if self.fail_display {
            return Err(S2dError::network(Some(429), "rate limited"));
        }
        Ok(format!("<{target}>{text}"))
    }
}

#[derive(Default)]
struct MockVectorizer {
    calls: Mutex<Vec<String>>,
}

impl TextVectorizer for MockVectorizer {
    fn transform(&self, text: &str) -> Result<SparseVector> {
        self.calls.lock().unwrap().push(text.to_string());
        Ok(SparseVector::new(4, vec![(0, 1.0)]))
    }

    fn feature_count(&self) -> usize {
        4
    }
}

struct MockClassifier {
    probabilities: Vec<f64>,
    fail: bool,
}

impl ProbabilisticClassifier for MockClassifier {
    fn predict_proba(&self, _features: &SparseVector) -> Result<Vec<f64>> {
        if self.fail {
            return Err(S2dError::prediction("broken model"));
        }
        Ok(self.probabilities.clone())
    }

    fn class_count(&self) -> usize {
        self.probabilities.len()
    }

    fn feature_count(&self) -> usize {
        4
    }
}

#[derive(Default)]
struct MockExplainer {
    calls: Mutex<Vec<String>>,
    fail: bool,
}

#[async_trait::async_trait]
impl ExplanationService for MockExplainer {
    async fn explain(&self, label: &str) -> Result<String> {
        self.calls.lock().unwrap().push(label.to_string());
        if self.fail {
            return Err(S2dError::network(None, "connection refused"));
        }
        Ok(format!("About {label}."))
    }
}

#[derive(Default)]
struct MockSpeech {
    calls: Mutex<Vec<(String, String)>>,
    fail: bool,
}

#[async_trait::async_trait]
impl SpeechSynthesizer for MockSpeech {
    async fn synthesize(
        &self,
        text: &str,
        language: &str,
        sink: &mut (dyn Write + Send),
    ) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), language.to_string()));
        sink.write_all(b"ID3")?;
        if self.fail {
            return Err(S2dError::speech("tts failed"));
        }
        Ok(())
    }
}

struct Fixture {
    usecase: DiagnosisUseCase,
    translator: Arc<MockTranslator>,
    vectorizer: Arc<MockVectorizer>,
    explainer: Arc<MockExplainer>,
    speech: Arc<MockSpeech>,
    audio_dir: TempDir,
}

fn fixture(
    translator: MockTranslator,
    classifier: MockClassifier,
    explainer: MockExplainer,
    speech: MockSpeech,
) -> Fixture {
    let translator = Arc::new(translator);
    let vectorizer = Arc::new(MockVectorizer::default());
    let explainer = Arc::new(explainer);
    let speech = Arc::new(speech);
    let audio_dir = TempDir::new().unwrap();

    let labels = (0..classifier.probabilities.len())
        .map(|i| ["Acne", "Malaria", "Dengue", "Typhoid"][i].to_string())
        .collect();
    let predictor =
        DiseasePredictor::new(vectorizer.clone(), Arc::new(classifier), DiseaseCatalog::new(labels))
            .unwrap();

    let usecase = DiagnosisUseCase::new(
        TranslationAdapter::new(translator.clone()),
        predictor,
        ExplanationFetcher::new(explainer.clone()),
        AudioNarrator::new(speech.clone()).with_audio_dir(Some(audio_dir.path().to_path_buf())),
    );

    Fixture {
        usecase,
        translator,
        vectorizer,
        explainer,
        speech,
        audio_dir,
    }
}

fn classifier(probabilities: &[f64]) -> MockClassifier {
    MockClassifier {
        probabilities: probabilities.to_vec(),
        fail: false,
    }
}

fn no_selection() -> Vec<String> {
    Vec::new()
}

// ---------------------------------------------------------------------------
// Predict
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_predict_end_to_end_ranks_and_badges() {
    let f = fixture(
        MockTranslator::default(),
        classifier(&[0.1, 0.6, 0.3]),
        MockExplainer::default(),
        MockSpeech::default(),
    );
    let mut session = PredictionSession::new(Language::English);

    let outcome = f
        .usecase
        .predict(&mut session, &no_selection(), "fever, cough")
        .await
        .unwrap();

    let PredictOutcome::Predicted { predictions, canonical, .. } = outcome else {
        panic!("expected a prediction");
    };
    assert_eq!(canonical, "fever, cough");

    let summary: Vec<(&str, f64, ConfidenceBadge)> = predictions
        .iter()
        .map(|p| (p.label.as_str(), p.probability, p.badge()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("Malaria", 0.6, ConfidenceBadge::Medium),
            ("Dengue", 0.3, ConfidenceBadge::Low),
            ("Acne", 0.1, ConfidenceBadge::Low),
        ]
    );
    assert_eq!(session.predictions(), predictions.as_slice());
}

#[tokio::test]
async fn test_predict_merges_selected_before_typed() {
    let f = fixture(
        MockTranslator::default(),
        classifier(&[0.1, 0.6, 0.3]),
        MockExplainer::default(),
        MockSpeech::default(),
    );
    let mut session = PredictionSession::default();

    let outcome = f
        .usecase
        .predict(&mut session, &["cough", "fever"], " nausea ,, rash ")
        .await
        .unwrap();

    match outcome {
        PredictOutcome::Predicted { symptoms, .. } => {
            assert_eq!(symptoms, "cough, fever, nausea, rash");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert_eq!(f.translator.calls.lock().unwrap()[0].1, "auto");
    assert_eq!(
        f.vectorizer.calls.lock().unwrap()[0],
        "cough, fever, nausea, rash"
    );
}

#[tokio::test]
async fn test_predict_without_symptoms_calls_nothing() {
    let f = fixture(
        MockTranslator::default(),
        classifier(&[0.1, 0.6, 0.3]),
        MockExplainer::default(),
        MockSpeech::default(),
    );
    let mut session = PredictionSession::default();

    let outcome = f
        .usecase
        .predict(&mut session, &no_selection(), "  ,  ")
        .await
        .unwrap();

    assert_eq!(outcome, PredictOutcome::MissingSymptoms);
    assert!(f.translator.calls.lock().unwrap().is_empty());
    assert!(f.vectorizer.calls.lock().unwrap().is_empty());
    assert!(!session.has_predictions());
}

#[tokio::test]
async fn test_failed_precondition_keeps_previous_predictions() {
    let f = fixture(
        MockTranslator::default(),
        classifier(&[0.1, 0.6, 0.3]),
        MockExplainer::default(),
        MockSpeech::default(),
    );
    let mut session = PredictionSession::default();
    f.usecase
        .predict(&mut session, &no_selection(), "fever")
        .await
        .unwrap();
    let before = session.predictions().to_vec();

    let outcome = f
        .usecase
        .predict(&mut session, &no_selection(), "")
        .await
        .unwrap();

    assert_eq!(outcome, PredictOutcome::MissingSymptoms);
    assert_eq!(session.predictions(), before.as_slice());
}

#[tokio::test]
async fn test_translation_failure_halts_without_prediction() {
    let f = fixture(
        MockTranslator {
            fail_canonical: true,
            ..MockTranslator::default()
        },
        classifier(&[0.1, 0.6, 0.3]),
        MockExplainer::default(),
        MockSpeech::default(),
    );
    let mut session = PredictionSession::default();

    let outcome = f
        .usecase
        .predict(&mut session, &no_selection(), "bukhar")
        .await
        .unwrap();

    assert!(matches!(outcome, PredictOutcome::TranslationFailed { .. }));
    assert!(f.vectorizer.calls.lock().unwrap().is_empty());
    assert!(!session.has_predictions());
}

#[tokio::test]
async fn test_classifier_error_propagates_and_keeps_session() {
    let f = fixture(
        MockTranslator::default(),
        MockClassifier {
            probabilities: vec![0.1, 0.6, 0.3],
            fail: true,
        },
        MockExplainer::default(),
        MockSpeech::default(),
    );
    let mut session = PredictionSession::default();

    let result = f
        .usecase
        .predict(&mut session, &no_selection(), "fever")
        .await;

    assert!(matches!(result, Err(S2dError::Prediction(_))));
    assert!(!session.has_predictions());
}

// ---------------------------------------------------------------------------
// Explain
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_explain_before_predict_is_unavailable() {
    let f = fixture(
        MockTranslator::default(),
        classifier(&[0.1, 0.6, 0.3]),
        MockExplainer::default(),
        MockSpeech::default(),
    );
    let session = PredictionSession::default();

    assert!(f.usecase.explain(&session).await.is_none());
    assert!(f.explainer.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_explain_english_builds_narration_and_audio() {
    let f = fixture(
        MockTranslator::default(),
        classifier(&[0.1, 0.6, 0.3]),
        MockExplainer::default(),
        MockSpeech::default(),
    );
    let mut session = PredictionSession::new(Language::English);
    f.usecase
        .predict(&mut session, &no_selection(), "fever")
        .await
        .unwrap();
    let translator_calls = f.translator.calls.lock().unwrap().len();

    let report = f.usecase.explain(&session).await.unwrap();

    assert_eq!(
        report.narration,
        "1. Malaria: About Malaria.\n2. Dengue: About Dengue.\n3. Acne: About Acne.\n"
    );
    assert_eq!(
        *f.explainer.calls.lock().unwrap(),
        vec!["Malaria", "Dengue", "Acne"]
    );
    // English sessions never call the display translator.
    assert_eq!(f.translator.calls.lock().unwrap().len(), translator_calls);

    let audio = report.audio.expect("audio");
    assert_eq!(audio.bytes, b"ID3".to_vec());
    assert_eq!(audio.language, "en");
    assert!(report.audio_error.is_none());
    assert_eq!(std::fs::read_dir(f.audio_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_explain_falls_back_when_service_fails() {
    let f = fixture(
        MockTranslator::default(),
        classifier(&[0.0, 0.67, 0.33]),
        MockExplainer {
            fail: true,
            ..MockExplainer::default()
        },
        MockSpeech::default(),
    );
    let mut session = PredictionSession::default();
    f.usecase
        .predict(&mut session, &no_selection(), "fever")
        .await
        .unwrap();

    let report = f.usecase.explain(&session).await.unwrap();

    assert_eq!(report.items[0].text, "Malaria is predicted with 0.67 confidence.");
    assert!(report.items.iter().all(|item| item.fallback));
}

#[tokio::test]
async fn test_explain_translates_for_display_language() {
    let f = fixture(
        MockTranslator::default(),
        classifier(&[0.1, 0.6, 0.3]),
        MockExplainer::default(),
        MockSpeech::default(),
    );
    let mut session = PredictionSession::new(Language::Urdu);
    f.usecase
        .predict(&mut session, &no_selection(), "bukhar")
        .await
        .unwrap();

    let report = f.usecase.explain(&session).await.unwrap();

    assert_eq!(report.items[0].text, "<ur>About Malaria.");
    assert_eq!(report.translation_warnings().count(), 0);
    assert_eq!(f.speech.calls.lock().unwrap()[0].1, "ur");
    assert!(report.narration.starts_with("1. Malaria: <ur>About Malaria.\n"));
}

#[tokio::test]
async fn test_display_translation_failure_is_per_item_warning() {
    let f = fixture(
        MockTranslator {
            fail_display: true,
            ..MockTranslator::default()
        },
        classifier(&[0.1, 0.6, 0.3]),
        MockExplainer::default(),
        MockSpeech::default(),
    );
    let mut session = PredictionSession::new(Language::French);
    f.usecase
        .predict(&mut session, &no_selection(), "fièvre")
        .await
        .unwrap();

    let report = f.usecase.explain(&session).await.unwrap();

    assert_eq!(report.translation_warnings().count(), 3);
    assert_eq!(report.items[1].text, "About Dengue.");
    assert!(report.audio.is_some());
}

#[tokio::test]
async fn test_audio_failure_is_reported_without_audio() {
    let f = fixture(
        MockTranslator::default(),
        classifier(&[0.1, 0.6, 0.3]),
        MockExplainer::default(),
        MockSpeech {
            fail: true,
            ..MockSpeech::default()
        },
    );
    let mut session = PredictionSession::default();
    f.usecase
        .predict(&mut session, &no_selection(), "fever")
        .await
        .unwrap();

    let report = f.usecase.explain(&session).await.unwrap();

    assert!(report.audio.is_none());
    assert!(report.audio_error.is_some());
    assert_eq!(report.items.len(), 3);
    assert_eq!(std::fs::read_dir(f.audio_dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let f = fixture(
        MockTranslator::default(),
        classifier(&[0.1, 0.6, 0.3]),
        MockExplainer::default(),
        MockSpeech::default(),
    );
    let mut first = PredictionSession::default();
    let second = PredictionSession::default();

    f.usecase
        .predict(&mut first, &no_selection(), "fever")
        .await
        .unwrap();

    assert!(first.has_predictions());
    assert!(!second.has_predictions());
    assert!(f.usecase.explain(&second).await.is_none());
}
