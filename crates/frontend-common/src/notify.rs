//! Toast notifications
//!
//! [`ToastNotifier`] is the [`Notifier`] handed to the session manager. It
//! pushes toasts into a Yew reducer owned by the provider and schedules each
//! one to dismiss itself.

use gloo::timers::callback::Timeout;
use porter_core::{NotificationKind, Notifier};
use std::cell::Cell;
use std::rc::Rc;
use yew::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}

/// Toasts currently on screen, oldest first
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastList {
    pub items: Vec<Toast>,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(u64),
    Clear,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            ToastAction::Push(toast) => {
                let mut items = self.items.clone();
                items.push(toast);
                Rc::new(Self { items })
            }
            ToastAction::Dismiss(id) => {
                if !self.items.iter().any(|toast| toast.id == id) {
                    return self;
                }
                let items = self
                    .items
                    .iter()
                    .filter(|toast| toast.id != id)
                    .cloned()
                    .collect();
                Rc::new(Self { items })
            }
            ToastAction::Clear => Rc::new(Self::default()),
        }
    }
}

/// [`Notifier`] that displays messages as auto-dismissing toasts
pub struct ToastNotifier {
    dispatcher: UseReducerDispatcher<ToastList>,
    duration_ms: u32,
    next_id: Cell<u64>,
}

impl ToastNotifier {
    pub const fn new(dispatcher: UseReducerDispatcher<ToastList>, duration_ms: u32) -> Self {
        Self {
            dispatcher,
            duration_ms,
            next_id: Cell::new(0),
        }
    }

    fn show(&self, kind: NotificationKind, message: &str) {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.dispatcher.dispatch(ToastAction::Push(Toast {
            id,
            kind,
            message: message.to_string(),
        }));

        let dispatcher = self.dispatcher.clone();
        Timeout::new(self.duration_ms, move || {
            dispatcher.dispatch(ToastAction::Dismiss(id));
        })
        .forget();
    }
}

impl Notifier for ToastNotifier {
    fn success(&self, message: &str) {
        tracing::debug!(text = message, "Showing success toast");
        self.show(NotificationKind::Success, message);
    }

    fn error(&self, message: &str) {
        tracing::debug!(text = message, "Showing error toast");
        self.show(NotificationKind::Error, message);
    }
}
