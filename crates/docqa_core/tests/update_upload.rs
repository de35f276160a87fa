mod common;

use common::{answered, ask, init_logging, pdf, requests, select, uploaded};
use docqa_core::{
    update, Activity, AppState, Effect, Msg, RequestFailure, Severity, UploadOutcome,
    UploadReceipt, NOTIFICATION_TIMEOUT,
};
use pretty_assertions::assert_eq;

#[test]
fn upload_without_document_warns_and_sends_nothing() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::UploadClicked);
    let view = state.view();

    assert!(requests(&effects).is_empty());
    assert!(!view.busy);
    let notification = view.notification.expect("warning shown");
    assert_eq!(notification.severity, Severity::Warning);
    assert_eq!(notification.message, "Please select a file first");
    assert_eq!(
        effects,
        vec![Effect::ScheduleDismiss {
            id: notification.id,
            after: NOTIFICATION_TIMEOUT,
        }]
    );
}

#[test]
fn cancelled_picker_clears_selection() {
    init_logging();
    let (state, _) = select(AppState::new(), "requirements.pdf");
    let (state, _) = update(state, Msg::DocumentSelected(None));
    let (state, effects) = update(state, Msg::UploadClicked);

    assert!(state.view().document.is_none());
    assert!(requests(&effects).is_empty());
}

#[test]
fn upload_success_marks_document_ready() {
    init_logging();
    let (state, _) = select(AppState::new(), "spec.pdf");
    let (state, effects) = update(state, Msg::UploadClicked);

    assert_eq!(state.activity(), Activity::Uploading);
    assert!(state.view().busy);
    assert_eq!(
        effects,
        vec![Effect::Upload {
            document: pdf("spec.pdf")
        }]
    );

    let receipt = UploadReceipt {
        filename: "spec.pdf".to_string(),
        message: Some("Document 'spec.pdf' uploaded and processed".to_string()),
        document_chunks: Some(12),
    };
    let (state, _) = update(state, Msg::UploadFinished(Ok(receipt.clone())));
    let view = state.view();

    assert_eq!(
        view.upload_outcome,
        UploadOutcome::Succeeded {
            filename: "spec.pdf".to_string()
        }
    );
    assert!(view.document_ready);
    assert!(!view.busy);
    assert_eq!(view.upload_receipt, Some(receipt));
    let notification = view.notification.expect("success shown");
    assert_eq!(notification.severity, Severity::Success);
    assert_eq!(notification.message, "Upload successful: spec.pdf");
}

#[test]
fn backend_rejection_is_reported_verbatim() {
    init_logging();
    let (state, _) = select(AppState::new(), "requirements.pdf");
    let (state, _) = update(state, Msg::UploadClicked);
    let (state, _) = update(
        state,
        Msg::UploadFinished(Err(RequestFailure::backend(400, "unsupported format"))),
    );
    let view = state.view();

    assert_eq!(
        view.upload_outcome,
        UploadOutcome::Failed {
            reason: "unsupported format".to_string()
        }
    );
    assert!(!view.document_ready);
    assert!(!view.busy);
    let notification = view.notification.expect("error shown");
    assert_eq!(notification.severity, Severity::Error);
    assert!(notification.message.contains("unsupported format"));
}

#[test]
fn unreachable_backend_fails_upload_and_releases_busy() {
    init_logging();
    let (state, _) = select(AppState::new(), "requirements.pdf");
    let (state, _) = update(state, Msg::UploadClicked);
    let (state, _) = update(
        state,
        Msg::UploadFinished(Err(RequestFailure::transport("connection refused"))),
    );
    let view = state.view();

    assert_eq!(
        view.upload_outcome,
        UploadOutcome::Failed {
            reason: "connection refused".to_string()
        }
    );
    assert!(!view.busy);
    assert_eq!(state.activity(), Activity::Idle);
    let notification = view.notification.expect("error shown");
    assert_eq!(notification.severity, Severity::Error);
    assert_eq!(notification.message, "Error: connection refused");
}

#[test]
fn second_upload_while_uploading_is_refused() {
    init_logging();
    let (state, _) = select(AppState::new(), "requirements.pdf");
    let (mut state, _) = update(state, Msg::UploadClicked);
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::UploadClicked);
    assert!(effects.is_empty());
    assert!(!state.consume_dirty());
    assert_eq!(state.activity(), Activity::Uploading);
}

#[test]
fn intents_are_ignored_while_busy() {
    init_logging();
    let (state, _) = select(AppState::new(), "requirements.pdf");
    let (state, _) = update(state, Msg::UploadClicked);
    let before = state.view();

    let intents = vec![
        Msg::DocumentSelected(Some(pdf("other.pdf"))),
        Msg::DocumentSelected(None),
        Msg::QuestionEdited("typing while busy".to_string()),
        Msg::QuickQuestionPicked(0),
        Msg::AskClicked,
        Msg::ClearClicked,
        Msg::HistoryCleared,
        Msg::CheckBackendClicked,
        Msg::DocumentRejected {
            name: "x.png".to_string(),
        },
        Msg::DocumentUnreadable {
            name: "empty.txt".to_string(),
            reason: "file is empty".to_string(),
        },
    ];
    let mut state = state;
    for intent in intents {
        assert!(intent.is_user_intent());
        let (next, effects) = update(state, intent);
        assert!(effects.is_empty());
        state = next;
    }

    assert_eq!(state.view(), before);
}

#[test]
fn stale_upload_settlement_is_dropped() {
    init_logging();
    let (state, _) = select(AppState::new(), "requirements.pdf");
    let before = state.clone();

    let (state, effects) = update(
        state,
        Msg::UploadFinished(Ok(UploadReceipt::new("requirements.pdf"))),
    );

    assert_eq!(state, before);
    assert!(effects.is_empty());
}

#[test]
fn every_selection_resets_outcome_and_answer() {
    init_logging();
    let state = uploaded("first.pdf");
    let (state, _) = ask(state, "What is the timeline?");
    let (state, _) = answered(state, "Six weeks.", &["Phase 1 lasts six weeks."]);
    assert!(state.view().answer.is_some());

    let mut state = state;
    for name in ["second.pdf", "second.pdf", "third.md"] {
        let (next, effects) = select(state, name);
        let view = next.view();
        assert_eq!(view.upload_outcome, UploadOutcome::NotAttempted);
        assert!(view.answer.is_none());
        assert!(!view.document_ready);
        assert_eq!(view.document.as_ref().map(|d| d.name.as_str()), Some(name));
        assert!(effects.is_empty());
        state = next;
    }

    // The draft survives a new selection, but asking is blocked until upload.
    assert_eq!(state.view().question, "What is the timeline?");
    assert!(!state.view().can_ask);
}

#[test]
fn rejected_file_keeps_current_selection() {
    init_logging();
    let (state, _) = select(AppState::new(), "requirements.pdf");
    let (state, effects) = update(
        state,
        Msg::DocumentRejected {
            name: "photo.png".to_string(),
        },
    );
    let view = state.view();

    assert_eq!(view.document.map(|d| d.name), Some("requirements.pdf".to_string()));
    assert_eq!(requests(&effects).len(), 0);
    let notification = view.notification.expect("warning shown");
    assert_eq!(notification.severity, Severity::Warning);
    assert_eq!(notification.message, "Unsupported file type: photo.png");
}

#[test]
fn unreadable_file_keeps_current_selection() {
    init_logging();
    let (state, _) = select(AppState::new(), "requirements.pdf");
    let (state, effects) = update(
        state,
        Msg::DocumentUnreadable {
            name: "empty.txt".to_string(),
            reason: "file is empty".to_string(),
        },
    );
    let view = state.view();

    assert_eq!(view.document.map(|d| d.name), Some("requirements.pdf".to_string()));
    assert!(requests(&effects).is_empty());
    let notification = view.notification.expect("warning shown");
    assert_eq!(notification.severity, Severity::Warning);
    assert_eq!(notification.message, "Could not read empty.txt: file is empty");
}

#[test]
fn settlements_are_not_user_intents() {
    assert!(!Msg::UploadFinished(Ok(UploadReceipt::new("spec.pdf"))).is_user_intent());
    assert!(!Msg::NotificationExpired { id: 1 }.is_user_intent());
    assert!(!Msg::NotificationDismissed.is_user_intent());
    assert!(!Msg::NoOp.is_user_intent());
}
