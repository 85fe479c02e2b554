//! REPL command parsing.

use s2d_core::symptom::split_symptoms;
use std::path::PathBuf;

/// Slash commands offered for completion, in help order.
pub const COMMANDS: [&str; 10] = [
    "/lang",
    "/symptoms",
    "/select",
    "/unselect",
    "/clear",
    "/predict",
    "/explain",
    "/save-audio",
    "/status",
    "/help",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Help,
    Quit,
    Status,
    /// Shows the languages, or switches to the named one.
    Language(Option<String>),
    Symptoms,
    Select(Vec<String>),
    Unselect(Vec<String>),
    Clear,
    /// Predicts from the selection plus this free text (possibly empty).
    Predict(String),
    Explain,
    SaveAudio(Option<PathBuf>),
    Unknown(String),
}

fn tokens(args: &str) -> Vec<String> {
    split_symptoms(args).map(String::from).collect()
}

/// Parses one input line. Blank lines yield `None`.
///
/// Text that does not start with `/` is free-text symptoms for Predict.
pub fn parse(line: &str) -> Option<ReplCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if line == "quit" || line == "exit" {
        return Some(ReplCommand::Quit);
    }

    if !line.starts_with('/') {
        return Some(ReplCommand::Predict(line.to_string()));
    }

    let (command, args) = match line.split_once(char::is_whitespace) {
        Some((command, args)) => (command, args.trim()),
        None => (line, ""),
    };

    let parsed = match command {
        "/help" => ReplCommand::Help,
        "/status" => ReplCommand::Status,
        "/lang" => ReplCommand::Language((!args.is_empty()).then(|| args.to_string())),
        "/symptoms" => ReplCommand::Symptoms,
        "/select" => ReplCommand::Select(tokens(args)),
        "/unselect" => ReplCommand::Unselect(tokens(args)),
        "/clear" => ReplCommand::Clear,
        "/predict" => ReplCommand::Predict(args.to_string()),
        "/explain" => ReplCommand::Explain,
        "/save-audio" => ReplCommand::SaveAudio((!args.is_empty()).then(|| PathBuf::from(args))),
        other => ReplCommand::Unknown(other.to_string()),
    };
    Some(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line() {
        assert_eq!(parse("   "), None);
    }

    #[test]
    fn test_free_text_is_predict() {
        assert_eq!(
            parse(" fever, cough "),
            Some(ReplCommand::Predict("fever, cough".to_string()))
        );
    }

    #[test]
    fn test_select_splits_on_commas() {
        assert_eq!(
            parse("/select 1, sore throat,, 8"),
            Some(ReplCommand::Select(vec![
                "1".to_string(),
                "sore throat".to_string(),
                "8".to_string()
            ]))
        );
    }

    #[test]
    fn test_optional_arguments() {
        assert_eq!(parse("/lang"), Some(ReplCommand::Language(None)));
        assert_eq!(
            parse("/lang urdu"),
            Some(ReplCommand::Language(Some("urdu".to_string())))
        );
        assert_eq!(parse("/save-audio"), Some(ReplCommand::SaveAudio(None)));
        assert_eq!(
            parse("/save-audio out.mp3"),
            Some(ReplCommand::SaveAudio(Some(PathBuf::from("out.mp3"))))
        );
        assert_eq!(parse("/predict"), Some(ReplCommand::Predict(String::new())));
    }

    #[test]
    fn test_quit_and_unknown() {
        assert_eq!(parse("exit"), Some(ReplCommand::Quit));
        assert_eq!(
            parse("/plan"),
            Some(ReplCommand::Unknown("/plan".to_string()))
        );
    }
}
