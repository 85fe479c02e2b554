//! Startup wiring: configuration, secrets, artifacts and the diagnosis use case.
//!
//! Everything here runs once per process. Any error is fatal for the caller.

use s2d_application::{
    AudioNarrator, DiagnosisUseCase, DiseasePredictor, ExplanationFetcher, TranslationAdapter,
};
use s2d_core::Result;
use s2d_core::catalog::DiseaseCatalog;
use s2d_core::config::AppConfig;
use s2d_core::language::Language;
use s2d_core::model::ProbabilisticClassifier;
use s2d_core::secret::SecretService;
use s2d_infrastructure::{ArtifactLoader, ConfigStorage, LoadedArtifacts, S2dPaths, SecretServiceImpl};
use s2d_interaction::{ChatCompletionAgent, GoogleSpeech, GoogleTranslator};
use std::path::PathBuf;
use std::sync::Arc;

/// Environment variable overriding the vectorizer artifact path.
pub const VECTORIZER_PATH_ENV: &str = "S2D_VECTORIZER_PATH";

/// Environment variable overriding the classifier artifact path.
pub const CLASSIFIER_PATH_ENV: &str = "S2D_CLASSIFIER_PATH";

/// Per-invocation overrides, typically from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    /// Replaces the platform config directory.
    pub config_dir: Option<PathBuf>,
    /// Explicit `config.toml` path, taking precedence over `config_dir`.
    pub config_file: Option<PathBuf>,
    pub vectorizer_path: Option<PathBuf>,
    pub classifier_path: Option<PathBuf>,
    pub language: Option<Language>,
}

/// A fully wired application.
pub struct AppContext {
    pub config: AppConfig,
    pub paths: S2dPaths,
    pub artifacts: LoadedArtifacts,
    pub usecase: DiagnosisUseCase,
}

fn env_path(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Loads `config.toml` and applies environment and flag overrides, in that
/// order of increasing precedence.
pub fn load_config(options: &BootstrapOptions) -> Result<(AppConfig, S2dPaths)> {
    let paths = S2dPaths::new(options.config_dir.as_deref());
    let config_file = match &options.config_file {
        Some(file) => file.clone(),
        None => paths.config_file()?,
    };

    let mut config = ConfigStorage::new(config_file).load()?;
    apply_overrides(&mut config, options, env_path);
    Ok((config, paths))
}

fn apply_overrides(
    config: &mut AppConfig,
    options: &BootstrapOptions,
    env: impl Fn(&str) -> Option<PathBuf>,
) {
    if let Some(path) = env(VECTORIZER_PATH_ENV) {
        config.artifacts.vectorizer_path = path;
    }
    if let Some(path) = env(CLASSIFIER_PATH_ENV) {
        config.artifacts.classifier_path = path;
    }

    if let Some(path) = &options.vectorizer_path {
        config.artifacts.vectorizer_path = path.clone();
    }
    if let Some(path) = &options.classifier_path {
        config.artifacts.classifier_path = path.clone();
    }
    if let Some(language) = options.language {
        config.default_language = language;
    }
}

/// Loads only the artifacts and checks them against the disease catalog.
pub fn load_checked_artifacts(config: &AppConfig) -> Result<LoadedArtifacts> {
    let artifacts = ArtifactLoader::load(&config.artifacts)?;
    DiseaseCatalog::default().verify_alignment(
        artifacts.classifier.class_count(),
        artifacts.classifier.class_names(),
    )?;
    Ok(artifacts)
}

/// Builds the diagnosis use case from a loaded configuration.
pub async fn build_context(config: AppConfig, paths: S2dPaths) -> Result<AppContext> {
    let secrets = SecretServiceImpl::new(&paths)?.load_secrets().await?;
    let artifacts = ArtifactLoader::load(&config.artifacts)?;

    let predictor = DiseasePredictor::new(
        artifacts.vectorizer.clone(),
        artifacts.classifier.clone(),
        DiseaseCatalog::default(),
    )?;

    let translator = GoogleTranslator::new(&config.translation);
    let explainer = ChatCompletionAgent::from_config(&config.explanation, &secrets);
    let speech = GoogleSpeech::new(&config.speech);

    let usecase = DiagnosisUseCase::new(
        TranslationAdapter::new(Arc::new(translator)),
        predictor,
        ExplanationFetcher::new(Arc::new(explainer)),
        AudioNarrator::new(Arc::new(speech)).with_audio_dir(config.speech.audio_dir.clone()),
    );

    tracing::info!(
        language = %config.default_language,
        explanation_model = %config.explanation.model,
        "Application ready"
    );

    Ok(AppContext {
        config,
        paths,
        artifacts,
        usecase,
    })
}

/// Convenience for binaries: [`load_config`] followed by [`build_context`].
pub async fn bootstrap(options: &BootstrapOptions) -> Result<AppContext> {
    let (config, paths) = load_config(options)?;
    build_context(config, paths).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<PathBuf> {
        None
    }

    #[test]
    fn test_flags_override_env() {
        let mut config = AppConfig::default();
        let options = BootstrapOptions {
            classifier_path: Some(PathBuf::from("/flags/model.json")),
            language: Some(Language::Arabic),
            ..BootstrapOptions::default()
        };

        apply_overrides(&mut config, &options, |key| {
            Some(PathBuf::from(format!("/env/{key}")))
        });

        assert_eq!(
            config.artifacts.vectorizer_path,
            PathBuf::from("/env/S2D_VECTORIZER_PATH")
        );
        assert_eq!(
            config.artifacts.classifier_path,
            PathBuf::from("/flags/model.json")
        );
        assert_eq!(config.default_language, Language::Arabic);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let mut config = AppConfig::default();
        apply_overrides(&mut config, &BootstrapOptions::default(), no_env);
        assert_eq!(config, AppConfig::default());
    }
}
