use crate::{
    Activity, AnswerResult, AppState, BackendStatus, Effect, Msg, RequestFailure, Severity,
    UploadReceipt, NOTIFICATION_TIMEOUT, QUICK_QUESTIONS,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// User intents are refused while a request is outstanding; settlements for
/// an activity that is not in flight are dropped.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = Vec::new();

    if msg.is_user_intent() && state.is_busy() {
        return (state, effects);
    }

    match msg {
        Msg::DocumentSelected(document) => {
            state.select_document(document);
        }
        Msg::DocumentRejected { name } => {
            notify(
                &mut state,
                &mut effects,
                format!("Unsupported file type: {name}"),
                Severity::Warning,
            );
        }
        Msg::DocumentUnreadable { name, reason } => {
            notify(
                &mut state,
                &mut effects,
                format!("Could not read {name}: {reason}"),
                Severity::Warning,
            );
        }
        Msg::UploadClicked => match state.upload().document().cloned() {
            Some(document) => {
                state.set_activity(Activity::Uploading);
                effects.push(Effect::Upload { document });
            }
            None => notify(
                &mut state,
                &mut effects,
                "Please select a file first",
                Severity::Warning,
            ),
        },
        Msg::QuestionEdited(text) => {
            state.conversation_mut().edit(text);
        }
        Msg::QuickQuestionPicked(index) => {
            if let Some(question) = QUICK_QUESTIONS.get(index) {
                state.conversation_mut().edit((*question).to_string());
            }
        }
        Msg::AskClicked => ask(&mut state, &mut effects),
        Msg::ClearClicked => state.clear_conversation(),
        Msg::HistoryCleared => state.clear_history(),
        Msg::CheckBackendClicked => {
            state.set_activity(Activity::CheckingBackend);
            effects.push(Effect::CheckBackend);
        }
        Msg::NotificationDismissed => state.dismiss_notification(),
        Msg::NotificationExpired { id } => state.expire_notification(id),
        Msg::UploadFinished(result) => {
            if state.activity() == Activity::Uploading {
                finish_upload(&mut state, &mut effects, result);
                state.set_activity(Activity::Idle);
            }
        }
        Msg::AnswerFinished {
            result,
            elapsed_ms,
            received_utc,
        } => {
            if state.activity() == Activity::Asking {
                finish_ask(&mut state, &mut effects, result, elapsed_ms, received_utc);
                state.set_activity(Activity::Idle);
            }
        }
        Msg::BackendChecked(result) => {
            if state.activity() == Activity::CheckingBackend {
                finish_backend_check(&mut state, &mut effects, result);
                state.set_activity(Activity::Idle);
            }
        }
        Msg::NoOp => {}
    }

    (state, effects)
}

fn notify(
    state: &mut AppState,
    effects: &mut Vec<Effect>,
    message: impl Into<String>,
    severity: Severity,
) {
    let id = state.notify(message, severity);
    effects.push(Effect::ScheduleDismiss {
        id,
        after: NOTIFICATION_TIMEOUT,
    });
}

fn ask(state: &mut AppState, effects: &mut Vec<Effect>) {
    let Some(question) = state.conversation().question().map(ToOwned::to_owned) else {
        notify(state, effects, "Please enter a question", Severity::Warning);
        return;
    };
    if !state.upload().outcome().is_succeeded() {
        notify(
            state,
            effects,
            "Please upload a document first",
            Severity::Warning,
        );
        return;
    }

    state.conversation_mut().begin(question.clone());
    state.set_activity(Activity::Asking);
    effects.push(Effect::Ask { question });
}

fn finish_upload(
    state: &mut AppState,
    effects: &mut Vec<Effect>,
    result: Result<UploadReceipt, RequestFailure>,
) {
    match result {
        Ok(receipt) => {
            let message = format!("Upload successful: {}", receipt.filename);
            state.upload_mut().record_success(receipt);
            notify(state, effects, message, Severity::Success);
        }
        Err(RequestFailure::Backend { detail, .. }) => {
            let message = format!("Upload failed: {detail}");
            state.upload_mut().record_failure(detail);
            notify(state, effects, message, Severity::Error);
        }
        Err(RequestFailure::Transport { message }) => {
            let text = format!("Error: {message}");
            state.upload_mut().record_failure(message);
            notify(state, effects, text, Severity::Error);
        }
    }
}

fn finish_ask(
    state: &mut AppState,
    effects: &mut Vec<Effect>,
    result: Result<AnswerResult, RequestFailure>,
    elapsed_ms: u64,
    received_utc: String,
) {
    match result {
        Ok(answer) => {
            // Selection is refused while Asking, so the outcome is still Succeeded.
            let Some(document) = state.upload().remote_filename().map(ToOwned::to_owned) else {
                state.conversation_mut().abandon();
                return;
            };
            state
                .conversation_mut()
                .record_answer(&document, answer, elapsed_ms, received_utc);
            notify(state, effects, "Answer received", Severity::Success);
        }
        Err(failure) => {
            // A failed follow-up keeps the previous answer on screen.
            state.conversation_mut().abandon();
            notify(
                state,
                effects,
                format!("Error: {}", failure.reason()),
                Severity::Error,
            );
        }
    }
}

fn finish_backend_check(
    state: &mut AppState,
    effects: &mut Vec<Effect>,
    result: Result<String, RequestFailure>,
) {
    match result {
        Ok(message) => state.set_backend(BackendStatus::Connected { message }),
        Err(failure) => {
            let reason = failure.reason().to_string();
            state.set_backend(BackendStatus::Unreachable {
                reason: reason.clone(),
            });
            notify(
                state,
                effects,
                format!("Backend not reachable: {reason}"),
                Severity::Error,
            );
        }
    }
}
