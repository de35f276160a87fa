//! Line commands typed at the prompt.

use std::path::PathBuf;

use docqa_core::QUICK_QUESTIONS;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open(PathBuf),
    Unselect,
    Upload,
    Edit(String),
    /// Ask, optionally replacing the draft first.
    Ask(Option<String>),
    /// Zero-based index into `QUICK_QUESTIONS`.
    Quick(usize),
    Clear,
    History,
    ClearHistory,
    Status,
    Dismiss,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),
    #[error("quick question must be a number from 1 to {max}, got '{got}'")]
    BadQuickIndex { got: String, max: usize },
}

pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "" => Command::Empty,
        "open" | "select" => {
            let path = rest.trim();
            if path.is_empty() {
                return Err(ParseError::MissingArgument("open"));
            }
            Command::Open(PathBuf::from(path))
        }
        "unselect" => Command::Unselect,
        "upload" => Command::Upload,
        // The draft is taken verbatim, including surrounding whitespace.
        "edit" => Command::Edit(rest.to_string()),
        "ask" => {
            if rest.trim().is_empty() {
                Command::Ask(None)
            } else {
                Command::Ask(Some(rest.to_string()))
            }
        }
        "quick" => Command::Quick(parse_quick_index(rest.trim())?),
        "clear" => Command::Clear,
        "history" => Command::History,
        "clear-history" => Command::ClearHistory,
        "status" => Command::Status,
        "dismiss" => Command::Dismiss,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(command)
}

fn parse_quick_index(raw: &str) -> Result<usize, ParseError> {
    let max = QUICK_QUESTIONS.len();
    match raw.parse::<usize>() {
        Ok(number) if (1..=max).contains(&number) => Ok(number - 1),
        _ => Err(ParseError::BadQuickIndex {
            got: raw.to_string(),
            max,
        }),
    }
}

pub fn help_lines(quick_questions: &[&str]) -> Vec<String> {
    let mut lines = vec![
        "Commands:".to_string(),
        "  open <path>       choose a .pdf, .txt or .md file".to_string(),
        "  unselect          forget the chosen file".to_string(),
        "  upload            upload and process the chosen file".to_string(),
        "  edit <text>       replace the question".to_string(),
        "  ask [text]        ask the question (optionally replacing it first)".to_string(),
        "  quick <n>         use a quick question:".to_string(),
    ];
    lines.extend(
        quick_questions
            .iter()
            .enumerate()
            .map(|(index, question)| format!("                      {}. {}", index + 1, question)),
    );
    lines.extend(
        [
            "  clear             clear the answer and question",
            "  history           show answered questions",
            "  clear-history     forget answered questions",
            "  status            check the backend connection",
            "  dismiss           hide the current notification",
            "  help              show this list",
            "  quit              leave",
        ]
        .map(String::from),
    );
    lines
}
