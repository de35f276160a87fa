use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::{mpsc, Arc};
use std::thread;

use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use docqa_core::{update, AppState, Msg, SelectedDocument};
use docqa_engine::{read_document, DocumentError, EngineConfig};
use docqa_logging::{docqa_debug, docqa_info, docqa_warn};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::logging;
use super::ui::commands::{self, Command};
use super::ui::render;

/// Everything the main loop reacts to.
pub enum LoopEvent {
    Dispatch(Msg),
    ShowHelp,
    ShowHistory,
    Invalid(String),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let config = AppConfig::parse();
    logging::initialize(config.log_destination, config.log_level);
    docqa_info!("Starting docqa against {}", config.backend_url);

    let (event_tx, event_rx) = mpsc::channel::<LoopEvent>();

    let mut engine_config = EngineConfig::new(config.backend_settings());
    engine_config.received_utc = Arc::new(|| Utc::now().to_rfc3339());
    let runner = EffectRunner::new(engine_config, event_tx.clone())
        .with_context(|| format!("cannot use backend at {}", config.backend_url))?;

    spawn_input_thread(event_tx.clone());

    // Unlocked handle: a terminal logger shares stdout with the prompt.
    let mut out = io::stdout();
    let mut state = AppState::new();
    writeln!(
        out,
        "DocQA: ask questions about a document. Backend: {}",
        config.backend_url
    )?;
    write_lines(&mut out, &commands::help_lines(state.view().quick_questions))?;

    if !config.no_health_check {
        state = dispatch(state, Msg::CheckBackendClicked, &runner, &mut out)?;
    } else {
        write_lines(&mut out, &render::render(&state.view()))?;
    }
    prompt(&mut out)?;

    while let Ok(event) = event_rx.recv() {
        match event {
            LoopEvent::Dispatch(msg) => {
                state = dispatch(state, msg, &runner, &mut out)?;
            }
            LoopEvent::ShowHelp => {
                write_lines(&mut out, &commands::help_lines(state.view().quick_questions))?
            }
            LoopEvent::ShowHistory => {
                write_lines(&mut out, &render::history_lines(&state.view().history))?
            }
            LoopEvent::Invalid(reason) => writeln!(out, "{reason}; type `help` for commands")?,
            LoopEvent::Quit => break,
        }
        prompt(&mut out)?;
    }

    docqa_info!("Leaving docqa");
    Ok(())
}

/// Runs one message through the core, executes its effects and redraws if needed.
fn dispatch(
    state: AppState,
    msg: Msg,
    runner: &EffectRunner,
    out: &mut impl Write,
) -> io::Result<AppState> {
    if msg.is_user_intent() && state.is_busy() {
        docqa_debug!("Command refused while {:?}", state.activity());
    }
    let (mut state, effects) = update(state, msg);
    if !effects.is_empty() {
        docqa_debug!("Dispatching {} effect(s)", effects.len());
    }
    runner.enqueue(effects);

    if state.consume_dirty() {
        writeln!(out)?;
        write_lines(out, &render::render(&state.view()))?;
    }
    Ok(state)
}

fn spawn_input_thread(events: mpsc::Sender<LoopEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    docqa_warn!("Failed to read from stdin: {}", err);
                    break;
                }
            };
            let batch = match commands::parse(&line) {
                Ok(command) => command_events(command),
                Err(err) => vec![LoopEvent::Invalid(err.to_string())],
            };
            for event in batch {
                if events.send(event).is_err() {
                    return;
                }
            }
        }
        let _ = events.send(LoopEvent::Quit);
    });
}

fn command_events(command: Command) -> Vec<LoopEvent> {
    let msgs = match command {
        Command::Open(path) => vec![open_document(&path)],
        Command::Unselect => vec![Msg::DocumentSelected(None)],
        Command::Upload => vec![Msg::UploadClicked],
        Command::Edit(text) => vec![Msg::QuestionEdited(text)],
        Command::Ask(Some(text)) => vec![Msg::QuestionEdited(text), Msg::AskClicked],
        Command::Ask(None) => vec![Msg::AskClicked],
        Command::Quick(index) => vec![Msg::QuickQuestionPicked(index)],
        Command::Clear => vec![Msg::ClearClicked],
        Command::ClearHistory => vec![Msg::HistoryCleared],
        Command::Status => vec![Msg::CheckBackendClicked],
        Command::Dismiss => vec![Msg::NotificationDismissed],
        Command::History => return vec![LoopEvent::ShowHistory],
        Command::Help => return vec![LoopEvent::ShowHelp],
        Command::Quit => return vec![LoopEvent::Quit],
        Command::Empty => vec![Msg::NoOp],
    };
    msgs.into_iter().map(LoopEvent::Dispatch).collect()
}

fn open_document(path: &Path) -> Msg {
    match read_document(path) {
        Ok(document) => {
            docqa_info!(
                "Selected {} ({} bytes, {})",
                document.filename,
                document.bytes.len(),
                document.media_type
            );
            Msg::DocumentSelected(Some(SelectedDocument::new(
                document.filename,
                document.bytes,
                document.media_type,
            )))
        }
        Err(err) => {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            docqa_warn!("Rejected {:?}: {}", path, err);
            match err {
                DocumentError::Unsupported => Msg::DocumentRejected { name },
                err => Msg::DocumentUnreadable {
                    name,
                    reason: err.to_string(),
                },
            }
        }
    }
}

fn write_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}
