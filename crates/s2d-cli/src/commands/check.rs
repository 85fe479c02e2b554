use anyhow::{Context, Result};
use s2d_core::DISEASE_LABELS;
use s2d_execution::BootstrapOptions;
use s2d_execution::bootstrap::load_checked_artifacts;
use s2d_execution::load_config;

/// Loads the artifacts without touching any network service.
pub fn run(options: &BootstrapOptions) -> Result<()> {
    let (config, _) = load_config(options).context("Failed to load configuration")?;

    println!("Vectorizer: {}", config.artifacts.vectorizer_path.display());
    println!("Classifier: {}", config.artifacts.classifier_path.display());

    let artifacts = load_checked_artifacts(&config).context("Artifact check failed")?;

    println!("{artifacts:?}");
    println!(
        "OK: classifier classes line up with the {} disease labels.",
        DISEASE_LABELS.len()
    );
    Ok(())
}
