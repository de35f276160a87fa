use std::time::Duration;

/// How long a notification stays visible before the front end expires it.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(6);

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
    pub visible: bool,
}

/// Single-slot notification holder. A new notification replaces the old one
/// whether or not it was ever seen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct NotificationCenter {
    active: Option<Notification>,
    last_id: NotificationId,
}

impl NotificationCenter {
    pub(crate) fn notify(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
    ) -> NotificationId {
        self.last_id += 1;
        self.active = Some(Notification {
            id: self.last_id,
            message: message.into(),
            severity,
            visible: true,
        });
        self.last_id
    }

    /// Hides the active notification. Returns whether anything changed.
    pub(crate) fn dismiss(&mut self) -> bool {
        match self.active.as_mut() {
            Some(active) if active.visible => {
                active.visible = false;
                true
            }
            _ => false,
        }
    }

    /// Hides the active notification only if it is still `id`.
    pub(crate) fn expire(&mut self, id: NotificationId) -> bool {
        match self.active.as_ref() {
            Some(active) if active.id == id => self.dismiss(),
            _ => false,
        }
    }

    pub(crate) fn visible(&self) -> Option<&Notification> {
        self.active.as_ref().filter(|active| active.visible)
    }
}
