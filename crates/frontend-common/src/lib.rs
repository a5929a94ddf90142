//! Yew bindings for the Porter session layer
//!
//! Wrap the app in [`SessionProvider`] and read the session with
//! [`use_session`]. Credentials persist in `localStorage` and notifications
//! render as toasts.

pub mod auth;
pub mod components;
pub mod config;
pub mod logging;
pub mod notify;
pub mod storage;

pub use auth::{
    ProtectedRoute, PublicRoute, SessionHandle, SessionProvider, use_is_authenticated,
    use_session, use_user,
};
pub use components::{Spinner, Toaster};
pub use config::FrontendConfig;
pub use notify::ToastNotifier;
pub use storage::BrowserStore;
