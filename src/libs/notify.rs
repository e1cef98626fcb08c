//! User-facing notifications emitted by data mutations.
//!
//! Every add/update/delete reports its outcome exactly once through a
//! [`Notifier`]. The console implementation prints through the message
//! macros; tests plug in their own recorder.

use super::messages::Message;
use crate::{msg_error, msg_success};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: Message,
    pub description: String,
}

impl Notification {
    pub fn success(title: Message, description: Message) -> Self {
        Self {
            kind: NotificationKind::Success,
            title,
            description: description.to_string(),
        }
    }

    /// An error notification carrying the underlying message verbatim.
    pub fn error(title: Message, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title,
            description: description.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let text = format!("{}: {}", notification.title, notification.description);
        match notification.kind {
            NotificationKind::Success => msg_success!(text),
            NotificationKind::Error => msg_error!(text),
        }
    }
}
