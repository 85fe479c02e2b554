use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use s2d_core::language::Language;
use s2d_execution::BootstrapOptions;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "s2d")]
#[command(about = "Symptom2Disease - educational symptom-to-disease suggestions", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the vectorizer artifact path
    #[arg(long, global = true)]
    vectorizer: Option<PathBuf>,

    /// Override the classifier artifact path
    #[arg(long, global = true)]
    classifier: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the three most likely diseases from symptoms
    Predict(PredictArgs),
    /// List the disease labels in classifier order
    Labels,
    /// List the common symptoms offered for selection
    Symptoms,
    /// Load the artifacts and verify them against the disease catalog
    Check,
}

#[derive(Args)]
pub struct PredictArgs {
    /// A common symptom (by name or 1-based number); repeatable
    #[arg(short, long = "symptom")]
    pub symptoms: Vec<String>,

    /// Free-text symptoms, comma-separated, in any language
    #[arg(short, long)]
    pub text: Option<String>,

    /// Display language for explanations (name or code)
    #[arg(short, long, value_parser = parse_language)]
    pub lang: Option<Language>,

    /// Also fetch explanations for the predictions
    #[arg(short, long)]
    pub explain: bool,

    /// Write the narrated explanations to this MP3 file (implies --explain)
    #[arg(long)]
    pub audio_out: Option<PathBuf>,

    /// Print machine-readable JSON instead of text
    #[arg(long)]
    pub json: bool,
}

fn parse_language(value: &str) -> std::result::Result<Language, String> {
    Language::parse(value).ok_or_else(|| {
        let known: Vec<String> = Language::all().iter().map(|l| l.to_string()).collect();
        format!("unknown language '{value}' (expected one of: {})", known.join(", "))
    })
}

impl GlobalArgs {
    fn bootstrap_options(&self, language: Option<Language>) -> BootstrapOptions {
        BootstrapOptions {
            config_dir: None,
            config_file: self.config.clone(),
            vectorizer_path: self.vectorizer.clone(),
            classifier_path: self.classifier.clone(),
            language,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Predict(args) => {
            let options = cli.global.bootstrap_options(args.lang);
            commands::predict::run(&options, &args).await?
        }
        Commands::Labels => commands::catalog::labels(),
        Commands::Symptoms => commands::catalog::symptoms(),
        Commands::Check => commands::check::run(&cli.global.bootstrap_options(None))?,
    }

    Ok(())
}
