//! Porter core: client-side session state
//!
//! [`SessionManager`] holds the current [`Session`], persists it through a
//! [`KeyValueStore`], reports outcomes through a [`Notifier`], and keeps the
//! shared [`porter_http::ApiClient`] in step with the signed-in user.

pub mod error;
pub mod manager;
pub mod messages;
pub mod notify;
pub mod session;
pub mod store;
pub mod types;

#[cfg(feature = "tests")]
pub mod tests;

pub use error::{AuthFailure, AuthResult};
pub use manager::{SessionManager, Subscription};
pub use notify::{NotificationKind, Notifier, TracingNotifier};
pub use session::{AuthState, Phase, Session, UserProfile};
pub use store::{KeyValueStore, MemoryStore};
