use thiserror::Error;

/// Failed account action, carrying the message already shown to the user
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct AuthFailure {
    pub message: String,
}

impl AuthFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub type AuthResult<T> = std::result::Result<T, AuthFailure>;
