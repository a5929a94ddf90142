//! Session context, hooks and route guards

pub mod context;
pub mod guard;

// Re-export commonly used items
pub use context::{
    SessionHandle, SessionProvider, SessionProviderProps, use_is_authenticated, use_session,
    use_user,
};
pub use guard::{GuardOutcome, ProtectedRoute, PublicRoute, RouteGuardProps};
