use crate::{AnswerResult, SelectedDocument, UploadReceipt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a local file; `None` means the picker was cancelled.
    DocumentSelected(Option<SelectedDocument>),
    /// The input filter refused a file by its extension.
    DocumentRejected { name: String },
    /// The file passed the filter but could not be read, or was empty.
    DocumentUnreadable { name: String, reason: String },
    /// User clicked Upload.
    UploadClicked,
    /// User edited the question box.
    QuestionEdited(String),
    /// User picked one of the canned questions by index.
    QuickQuestionPicked(usize),
    /// User clicked Ask.
    AskClicked,
    /// User cleared the displayed answer.
    ClearClicked,
    /// User cleared the answer history.
    HistoryCleared,
    /// User asked for a backend health probe.
    CheckBackendClicked,
    /// User closed the notification.
    NotificationDismissed,
    /// The display timer for a notification ran out.
    NotificationExpired { id: crate::NotificationId },
    /// Settlement of an upload request.
    UploadFinished(Result<UploadReceipt, RequestFailure>),
    /// Settlement of an ask request.
    AnswerFinished {
        result: Result<AnswerResult, RequestFailure>,
        elapsed_ms: u64,
        received_utc: String,
    },
    /// Settlement of a health probe; `Ok` carries the backend's greeting.
    BackendChecked(Result<String, RequestFailure>),
    /// Fallback for placeholder wiring.
    NoOp,
}

impl Msg {
    /// True for messages that start from the user rather than from a settled request or timer.
    pub fn is_user_intent(&self) -> bool {
        matches!(
            self,
            Self::DocumentSelected(_)
                | Self::DocumentRejected { .. }
                | Self::DocumentUnreadable { .. }
                | Self::UploadClicked
                | Self::QuestionEdited(_)
                | Self::QuickQuestionPicked(_)
                | Self::AskClicked
                | Self::ClearClicked
                | Self::HistoryCleared
                | Self::CheckBackendClicked
        )
    }
}

/// Why a backend request did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// The service answered with a non-success status and a reason.
    Backend { status: u16, detail: String },
    /// The request never produced a usable response.
    Transport { message: String },
}

impl RequestFailure {
    pub fn backend(status: u16, detail: impl Into<String>) -> Self {
        Self::Backend {
            status,
            detail: detail.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// The human-readable reason, without any status decoration.
    pub fn reason(&self) -> &str {
        match self {
            Self::Backend { detail, .. } => detail,
            Self::Transport { message } => message,
        }
    }
}
