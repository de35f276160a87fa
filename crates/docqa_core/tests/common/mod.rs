#![allow(dead_code)]

use std::sync::Once;

use docqa_core::{
    update, AnswerResult, AppState, Effect, Msg, SelectedDocument, SourceExcerpt, UploadReceipt,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(docqa_logging::initialize_for_tests);
}

pub fn pdf(name: &str) -> SelectedDocument {
    SelectedDocument::new(name, b"%PDF-1.7 test".to_vec(), "application/pdf")
}

pub fn select(state: AppState, name: &str) -> (AppState, Vec<Effect>) {
    update(state, Msg::DocumentSelected(Some(pdf(name))))
}

/// A state where `name` has been uploaded successfully.
pub fn uploaded(name: &str) -> AppState {
    let (state, _) = select(AppState::new(), name);
    let (state, _) = update(state, Msg::UploadClicked);
    let (state, _) = update(state, Msg::UploadFinished(Ok(UploadReceipt::new(name))));
    state
}

pub fn ask(state: AppState, question: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::QuestionEdited(question.to_string()));
    update(state, Msg::AskClicked)
}

pub fn answered(state: AppState, answer: &str, sources: &[&str]) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::AnswerFinished {
            result: Ok(AnswerResult {
                answer: answer.to_string(),
                sources: sources.iter().map(|s| SourceExcerpt::new(*s)).collect(),
            }),
            elapsed_ms: 120,
            received_utc: "2026-10-16T09:30:00+00:00".to_string(),
        },
    )
}

/// Effects other than notification timers.
pub fn requests(effects: &[Effect]) -> Vec<&Effect> {
    effects
        .iter()
        .filter(|effect| !matches!(effect, Effect::ScheduleDismiss { .. }))
        .collect()
}
