//! User-facing notification seam

use serde::{Deserialize, Serialize};

/// Kind of transient message shown to the user
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Fire-and-forget sink for toast-style messages
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);

    fn notify(&self, kind: NotificationKind, message: &str) {
        match kind {
            NotificationKind::Success => self.success(message),
            NotificationKind::Error => self.error(message),
        }
    }
}

/// Notifier that only writes to the log, for headless use
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(text = message, "Notification");
    }

    fn error(&self, message: &str) {
        tracing::warn!(text = message, "Error notification");
    }
}
