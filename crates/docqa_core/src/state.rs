use crate::conversation::QaConversation;
use crate::notification::NotificationCenter;
use crate::upload::UploadSession;
use crate::view_model::{AppViewModel, DocumentView};
use crate::{NotificationId, SelectedDocument, Severity, QUICK_QUESTIONS};

/// Which request, if any, is currently outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    Uploading,
    Asking,
    CheckingBackend,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackendStatus {
    #[default]
    Unknown,
    Connected { message: String },
    Unreachable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    activity: Activity,
    upload: UploadSession,
    conversation: QaConversation,
    notifications: NotificationCenter,
    backend: BackendStatus,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    /// True while any request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.activity != Activity::Idle
    }

    pub fn view(&self) -> AppViewModel {
        let busy = self.is_busy();
        let document_ready = self.upload.outcome().is_succeeded();
        AppViewModel {
            activity: self.activity,
            busy,
            document: self.upload.document().map(|doc| DocumentView {
                name: doc.name.clone(),
                media_type: doc.media_type.clone(),
                size_bytes: doc.bytes.len() as u64,
            }),
            upload_outcome: self.upload.outcome().clone(),
            upload_receipt: self.upload.receipt().cloned(),
            document_ready,
            question: self.conversation.draft().to_string(),
            can_upload: !busy && self.upload.document().is_some(),
            can_ask: !busy && document_ready && self.conversation.question().is_some(),
            answer: self.conversation.answer().cloned(),
            notification: self.notifications.visible().cloned(),
            backend: self.backend.clone(),
            history: self.conversation.history().to_vec(),
            quick_questions: &QUICK_QUESTIONS,
            dirty: self.dirty,
        }
    }

    /// Returns whether the state changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn upload(&self) -> &UploadSession {
        &self.upload
    }

    pub(crate) fn conversation(&self) -> &QaConversation {
        &self.conversation
    }

    pub(crate) fn upload_mut(&mut self) -> &mut UploadSession {
        self.dirty = true;
        &mut self.upload
    }

    pub(crate) fn conversation_mut(&mut self) -> &mut QaConversation {
        self.dirty = true;
        &mut self.conversation
    }

    pub(crate) fn set_activity(&mut self, activity: Activity) {
        self.dirty = true;
        self.activity = activity;
    }

    pub(crate) fn set_backend(&mut self, backend: BackendStatus) {
        self.dirty = true;
        self.backend = backend;
    }

    /// Switches to a new selection; the previous outcome and answer go with it.
    pub(crate) fn select_document(&mut self, document: Option<SelectedDocument>) {
        self.dirty = true;
        self.upload.select(document);
        self.conversation.discard_answer();
    }

    /// Drops the answer and draft. Marks dirty only if there was something to drop.
    pub(crate) fn clear_conversation(&mut self) {
        if self.conversation.clear() {
            self.dirty = true;
        }
    }

    pub(crate) fn clear_history(&mut self) {
        if self.conversation.clear_history() {
            self.dirty = true;
        }
    }

    pub(crate) fn notify(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
    ) -> NotificationId {
        self.dirty = true;
        self.notifications.notify(message, severity)
    }

    pub(crate) fn dismiss_notification(&mut self) {
        if self.notifications.dismiss() {
            self.dirty = true;
        }
    }

    pub(crate) fn expire_notification(&mut self, id: NotificationId) {
        if self.notifications.expire(id) {
            self.dirty = true;
        }
    }
}
