use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use s2d_core::COMMON_SYMPTOMS;
use s2d_core::language::Language;

use crate::commands::COMMANDS;

/// Rustyline helper: slash-command completion and hints, plus argument
/// completion for `/select`, `/unselect` and `/lang`.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
    languages: Vec<String>,
}

impl CliHelper {
    pub fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
            languages: Language::all().iter().map(|l| l.to_string()).collect(),
        }
    }

    fn argument_candidates(&self, command: &str) -> Vec<String> {
        match command {
            "/select" | "/unselect" => COMMON_SYMPTOMS.iter().map(|s| s.to_string()).collect(),
            "/lang" => self.languages.clone(),
            _ => Vec::new(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }

        match line.split_once(' ') {
            None => {
                let candidates = self
                    .commands
                    .iter()
                    .filter(|cmd| cmd.starts_with(line))
                    .map(|cmd| Pair {
                        display: cmd.clone(),
                        replacement: cmd.clone(),
                    })
                    .collect();
                Ok((0, candidates))
            }
            Some((command, _)) => {
                // Complete the current comma-separated item.
                let start = line.rfind(',').map(|i| i + 1).unwrap_or(command.len() + 1);
                let start = start + (line[start..].len() - line[start..].trim_start().len());
                let partial = line[start..].to_lowercase();

                let candidates = self
                    .argument_candidates(command)
                    .into_iter()
                    .filter(|candidate| candidate.to_lowercase().starts_with(&partial))
                    .map(|candidate| Pair {
                        display: candidate.clone(),
                        replacement: candidate,
                    })
                    .collect();
                Ok((start, candidates))
            }
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}
