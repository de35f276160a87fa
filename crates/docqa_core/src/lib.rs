//! DocQA core: pure interaction state machine and view-model helpers.
mod conversation;
mod effect;
mod msg;
mod notification;
mod state;
mod update;
mod upload;
mod view_model;

pub use conversation::{AnswerResult, HistoryEntry, SourceExcerpt, QUICK_QUESTIONS};
pub use effect::Effect;
pub use msg::{Msg, RequestFailure};
pub use notification::{Notification, NotificationId, Severity, NOTIFICATION_TIMEOUT};
pub use state::{Activity, AppState, BackendStatus};
pub use update::update;
pub use upload::{SelectedDocument, UploadOutcome, UploadReceipt};
pub use view_model::{AppViewModel, DocumentView};
