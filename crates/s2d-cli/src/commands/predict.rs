use anyhow::{Context, Result, bail};
use s2d_application::{ExplainReport, PredictOutcome};
use s2d_core::catalog::common_symptom;
use s2d_core::{DISCLAIMER, Prediction, PredictionSession};
use s2d_execution::{BootstrapOptions, build_context, init_logging, load_config};
use serde_json::{Value, json};

use crate::PredictArgs;

fn resolve_symptoms(tokens: &[String]) -> Result<Vec<&'static str>> {
    let mut selected = Vec::with_capacity(tokens.len());
    for token in tokens {
        match common_symptom(token) {
            Some(symptom) if !selected.contains(&symptom) => selected.push(symptom),
            Some(_) => {}
            None => bail!("'{token}' is not a common symptom; see `s2d symptoms`"),
        }
    }
    Ok(selected)
}

fn predictions_json(predictions: &[Prediction]) -> Value {
    predictions
        .iter()
        .enumerate()
        .map(|(index, p)| {
            json!({
                "rank": index + 1,
                "label": p.label,
                "probability": p.probability,
                "badge": p.badge(),
            })
        })
        .collect()
}

fn print_report(report: &ExplainReport) {
    println!();
    println!("Explanation of predicted diseases:");
    for item in &report.items {
        println!("{}. {} — {}", item.rank, item.label, item.text);
    }
    for item in report.translation_warnings() {
        eprintln!("warning: could not translate explanation for {}", item.label);
    }
}

pub async fn run(options: &BootstrapOptions, args: &PredictArgs) -> Result<()> {
    let selected = resolve_symptoms(&args.symptoms)?;
    let typed = args.text.as_deref().unwrap_or("");

    let (config, paths) = load_config(options).context("Failed to load configuration")?;
    let _log_guard = init_logging(&config.logging)?;

    let context = build_context(config, paths)
        .await
        .context("Failed to start Symptom2Disease")?;
    tracing::debug!(selected = selected.len(), typed = !typed.is_empty(), "Running prediction");
    let mut session = PredictionSession::new(context.config.default_language);

    if !args.json {
        eprintln!("{DISCLAIMER}");
    }

    let (symptoms, canonical, predictions) = match context
        .usecase
        .predict(&mut session, &selected, typed)
        .await?
    {
        PredictOutcome::MissingSymptoms => {
            bail!("Please select or type at least one symptom (--symptom or --text)")
        }
        PredictOutcome::TranslationFailed { reason } => {
            bail!("Translation failed. Please try again. ({reason})")
        }
        PredictOutcome::Predicted {
            symptoms,
            canonical,
            predictions,
        } => (symptoms, canonical, predictions),
    };

    let wants_explanation = args.explain || args.audio_out.is_some();
    let report = if wants_explanation {
        context.usecase.explain(&session).await
    } else {
        None
    };

    let mut audio_saved = None;
    if let (Some(path), Some(report)) = (&args.audio_out, &report) {
        match &report.audio {
            Some(audio) => {
                std::fs::write(path, &audio.bytes)
                    .with_context(|| format!("Failed to write audio to {}", path.display()))?;
                audio_saved = Some(path.display().to_string());
            }
            None => eprintln!("warning: audio generation failed"),
        }
    }

    if args.json {
        let mut output = json!({
            "language": session.language.code(),
            "symptoms": symptoms,
            "canonical": canonical,
            "predictions": predictions_json(&predictions),
        });
        if let Some(report) = &report {
            output["explanations"] = serde_json::to_value(&report.items)?;
            output["audio"] = json!(audio_saved);
        }
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Top 3 predicted diseases (confidence only):");
    for (index, prediction) in predictions.iter().enumerate() {
        println!("{}", prediction.result_line(index + 1));
    }
    if let Some(report) = &report {
        print_report(report);
    }
    if let Some(path) = audio_saved {
        println!("Audio written to {path}");
    }

    Ok(())
}
