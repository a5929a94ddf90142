//! Test doubles for code built on the session layer
//!
//! Enabled with the `tests` feature so downstream crates can drive a
//! [`SessionManager`](crate::SessionManager) without a browser.

pub mod notifier;

pub use notifier::{Notification, RecordingNotifier};

use crate::store::{KeyValueStore, MemoryStore, TOKEN_KEY, USER_KEY};

/// Store pre-populated as if a previous run had saved a session
pub fn seeded_store(token: &str, raw_user: &str) -> MemoryStore {
    let store = MemoryStore::new();
    store.set(TOKEN_KEY, token);
    store.set(USER_KEY, raw_user);
    store
}
