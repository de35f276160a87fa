use std::time::Duration;

use crate::{NotificationId, SelectedDocument};

/// Side effects requested by [`crate::update`]; executed outside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the document to the backend's upload endpoint.
    Upload { document: SelectedDocument },
    /// Send an already trimmed question to the backend's ask endpoint.
    Ask { question: String },
    /// Probe the backend root endpoint.
    CheckBackend,
    /// Deliver `Msg::NotificationExpired { id }` after `after` has elapsed.
    ScheduleDismiss { id: NotificationId, after: Duration },
}
