use crate::{
    Activity, AnswerResult, BackendStatus, HistoryEntry, Notification, UploadOutcome,
    UploadReceipt,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentView {
    pub name: String,
    pub media_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub activity: Activity,
    pub busy: bool,
    pub document: Option<DocumentView>,
    pub upload_outcome: UploadOutcome,
    pub upload_receipt: Option<UploadReceipt>,
    /// The last upload succeeded and questions may be asked.
    pub document_ready: bool,
    pub question: String,
    pub can_upload: bool,
    pub can_ask: bool,
    pub answer: Option<AnswerResult>,
    /// Only set while the notification is visible.
    pub notification: Option<Notification>,
    pub backend: BackendStatus,
    pub history: Vec<HistoryEntry>,
    pub quick_questions: &'static [&'static str],
    pub dirty: bool,
}
