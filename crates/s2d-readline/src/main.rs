mod commands;
mod helper;
mod selection;

use std::path::Path;

use anyhow::{Context as _, Result};
use colored::{ColoredString, Colorize};
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;

use s2d_application::{DiagnosisUseCase, ExplainReport, NarratedAudio, PredictOutcome};
use s2d_core::language::Language;
use s2d_core::{COMMON_SYMPTOMS, ConfidenceBadge, DISCLAIMER, Prediction, PredictionSession};
use s2d_execution::{BootstrapOptions, build_context, init_logging, load_config};

use crate::commands::{COMMANDS, ReplCommand};
use crate::helper::CliHelper;
use crate::selection::SymptomSelection;

/// Everything one REPL user accumulates between commands.
struct ReplState {
    session: PredictionSession,
    selection: SymptomSelection,
    last_audio: Option<NarratedAudio>,
}

fn badge(badge: ConfidenceBadge, text: String) -> ColoredString {
    match badge {
        ConfidenceBadge::High => text.bright_green(),
        ConfidenceBadge::Medium => text.bright_yellow(),
        ConfidenceBadge::Low => text.bright_red(),
    }
}

fn print_predictions(predictions: &[Prediction]) {
    println!("{}", "Top 3 predicted diseases (confidence only):".bold());
    for (index, prediction) in predictions.iter().enumerate() {
        println!("  {}", badge(prediction.badge(), prediction.result_line(index + 1)));
    }
    println!("{}", "Type /explain for explanations and audio.".bright_black());
}

fn print_help() {
    println!("{}", "Commands:".bold());
    let descriptions = [
        "[name]     show or switch the display language",
        "           list common symptoms",
        "<items>    add symptoms by number or name (comma-separated)",
        "<items>    remove symptoms",
        "           clear the selection",
        "[text]     predict from the selection plus typed symptoms",
        "           explain the last prediction (with audio)",
        "<path>     write the last explanation audio (MP3)",
        "           show language, selection and last prediction",
        "           show this help",
    ];
    for (command, description) in COMMANDS.iter().zip(descriptions) {
        println!("  {} {}", format!("{command:<12}").bright_cyan(), description);
    }
    println!("  {} any other text is treated as typed symptoms", format!("{:<12}", "<text>").bright_cyan());
    println!("  {} leave", format!("{:<12}", "quit").bright_cyan());
}

fn print_symptoms(selection: &SymptomSelection) {
    for (index, symptom) in COMMON_SYMPTOMS.iter().enumerate() {
        let marker = if selection.contains(symptom) { "[x]" } else { "[ ]" };
        println!("  {marker} {:>2}. {symptom}", index + 1);
    }
}

fn print_status(state: &ReplState) {
    println!("Language: {}", state.session.language.to_string().bright_cyan());
    if state.selection.chosen().is_empty() {
        println!("Selected: {}", "(none)".bright_black());
    } else {
        println!("Selected: {}", state.selection.chosen().join(", "));
    }
    if state.session.has_predictions() {
        print_predictions(state.session.predictions());
    } else {
        println!("{}", "No prediction yet.".bright_black());
    }
}

fn print_report(report: &ExplainReport) {
    println!("{}", "Explanation of predicted diseases:".bold());
    for item in &report.items {
        println!("{}", format!("{}. {}", item.rank, item.label).bold());
        for line in item.text.lines() {
            println!("   {}", line.bright_blue());
        }
        if item.fallback {
            println!("   {}", "(explanation service unavailable)".bright_black());
        }
    }
    for item in report.translation_warnings() {
        println!(
            "{}",
            format!("Could not translate explanation for {}.", item.label).yellow()
        );
    }
    match &report.audio {
        Some(audio) => println!(
            "{}",
            format!(
                "Audio ready ({} bytes, {}). Use /save-audio <path> to keep it.",
                audio.bytes.len(),
                audio.language
            )
            .green()
        ),
        None => println!("{}", "Audio generation failed.".yellow()),
    }
}

fn change_language(state: &mut ReplState, requested: Option<&str>) {
    let Some(requested) = requested else {
        for language in Language::all() {
            let marker = if language == state.session.language { "*" } else { " " };
            println!("  {marker} {language} ({})", language.code());
        }
        return;
    };

    match Language::parse(requested) {
        Some(language) => {
            state.session.set_language(language);
            println!("{}", format!("Language set to {language}.").green());
        }
        None => println!("{}", format!("Unknown language '{requested}'.").yellow()),
    }
}

fn report_unknown(unknown: &[String]) {
    if !unknown.is_empty() {
        println!(
            "{}",
            format!("Not in the symptom list: {}", unknown.join(", ")).yellow()
        );
    }
}

async fn run_predict(usecase: &DiagnosisUseCase, state: &mut ReplState, typed: &str) {
    let outcome = usecase
        .predict(&mut state.session, state.selection.chosen(), typed)
        .await;

    match outcome {
        Ok(PredictOutcome::MissingSymptoms) => {
            println!("{}", "Please select or type at least one symptom.".yellow());
        }
        Ok(PredictOutcome::TranslationFailed { reason }) => {
            tracing::debug!(%reason, "Translation failed");
            println!("{}", "Translation failed. Please try again.".red());
        }
        Ok(PredictOutcome::Predicted { predictions, .. }) => {
            state.last_audio = None;
            print_predictions(&predictions);
        }
        Err(e) => eprintln!("{}", format!("Prediction failed: {e}").red()),
    }
}

async fn run_explain(usecase: &DiagnosisUseCase, state: &mut ReplState) {
    println!("{}", "Fetching explanations...".bright_black());
    match usecase.explain(&state.session).await {
        Some(report) => {
            print_report(&report);
            state.last_audio = report.audio;
        }
        None => println!("{}", "Run a prediction first.".yellow()),
    }
}

fn save_audio(state: &ReplState, path: Option<&Path>) {
    let Some(path) = path else {
        println!("{}", "Usage: /save-audio <path>".yellow());
        return;
    };
    let Some(audio) = &state.last_audio else {
        println!("{}", "No audio yet. Run /explain first.".yellow());
        return;
    };
    match std::fs::write(path, &audio.bytes) {
        Ok(()) => println!("{}", format!("Saved audio to {}", path.display()).green()),
        Err(e) => eprintln!("{}", format!("Failed to save audio: {e}").red()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // ===== Backend Initialization =====
    let (config, paths) =
        load_config(&BootstrapOptions::default()).context("Failed to load configuration")?;
    let _log_guard = init_logging(&config.logging).context("Failed to initialize logging")?;
    let language = config.default_language;

    let context = match build_context(config, paths).await {
        Ok(context) => context,
        Err(e) => {
            eprintln!("{}", format!("Startup failed: {e}").red());
            return Err(e).context("Failed to start Symptom2Disease");
        }
    };
    let usecase = context.usecase;

    let mut state = ReplState {
        session: PredictionSession::new(language),
        selection: SymptomSelection::default(),
        last_audio: None,
    };

    // ===== REPL Setup =====
    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Symptom2Disease ===".bright_magenta().bold());
    println!("{}", DISCLAIMER.yellow());
    println!(
        "{}",
        "Type symptoms (comma-separated), '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        let prompt = format!("[{}] >> ", state.session.language.code());
        match rl.readline(&prompt) {
            Ok(line) => {
                let Some(command) = commands::parse(&line) else {
                    continue;
                };
                let _ = rl.add_history_entry(line.trim());

                match command {
                    ReplCommand::Quit => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    ReplCommand::Help => print_help(),
                    ReplCommand::Status => print_status(&state),
                    ReplCommand::Language(requested) => {
                        change_language(&mut state, requested.as_deref())
                    }
                    ReplCommand::Symptoms => print_symptoms(&state.selection),
                    ReplCommand::Select(tokens) => {
                        report_unknown(&state.selection.select(&tokens));
                        print_symptoms(&state.selection);
                    }
                    ReplCommand::Unselect(tokens) => {
                        report_unknown(&state.selection.unselect(&tokens));
                        print_symptoms(&state.selection);
                    }
                    ReplCommand::Clear => {
                        state.selection.clear();
                        println!("{}", "Selection cleared.".bright_black());
                    }
                    ReplCommand::Predict(typed) => run_predict(&usecase, &mut state, &typed).await,
                    ReplCommand::Explain => run_explain(&usecase, &mut state).await,
                    ReplCommand::SaveAudio(path) => save_audio(&state, path.as_deref()),
                    ReplCommand::Unknown(command) => {
                        println!("{}", format!("Unknown command {command}. Try /help.").bright_black());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    Ok(())
}
