//! Notifier that records instead of displaying

use crate::notify::{NotificationKind, Notifier};
use std::cell::RefCell;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

/// Captures every notification for later assertions
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.sent.borrow().clone()
    }

    pub fn successes(&self) -> Vec<String> {
        self.messages(NotificationKind::Success)
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(NotificationKind::Error)
    }

    pub fn len(&self) -> usize {
        self.sent.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.sent.borrow_mut().clear();
    }

    fn messages(&self, kind: NotificationKind) -> Vec<String> {
        self.sent
            .borrow()
            .iter()
            .filter(|notification| notification.kind == kind)
            .map(|notification| notification.message.clone())
            .collect()
    }

    fn record(&self, kind: NotificationKind, message: &str) {
        self.sent.borrow_mut().push(Notification {
            kind,
            message: message.to_string(),
        });
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.record(NotificationKind::Success, message);
    }

    fn error(&self, message: &str) {
        self.record(NotificationKind::Error, message);
    }
}
