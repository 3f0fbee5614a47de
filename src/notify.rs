//! User-facing notifications
//!
//! The ledger reports the outcome of add/remove/clear through a [`Notifier`]
//! so that the front end decides how (or whether) to show it. Notifications
//! are not part of the data contract: nothing reads them back.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Type of notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Error,
}

impl NotificationKind {
    /// Get the icon/prefix for this notification kind
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Info => "i",
            Self::Success => "+",
            Self::Error => "x",
        }
    }
}

/// A message for the user about something that just happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Info)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind.icon(), self.message)
    }
}

/// Receives notifications from the ledger
pub trait Notifier {
    fn notify(&self, notification: &Notification);
}

/// Drops every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: &Notification) {}
}

/// Keeps every notification in memory, in order
///
/// Clones share the same buffer, so a test can hand one clone to the ledger
/// and inspect the other.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    received: Rc<RefCell<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything received so far
    pub fn received(&self) -> Vec<Notification> {
        self.received.borrow().clone()
    }

    /// Messages received so far, without their kinds
    pub fn messages(&self) -> Vec<String> {
        self.received
            .borrow()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.received.borrow_mut().push(notification.clone());
    }
}
