//! Session and auth state types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile record returned by the backend for the signed-in user.
///
/// The backend owns the schema; the client only requires a JSON object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserProfile(Map<String, Value>);

impl UserProfile {
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Parse a profile previously written with [`UserProfile::to_json`]
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn id(&self) -> Option<&Value> {
        self.get("id")
    }

    pub fn email(&self) -> Option<&str> {
        self.get("email").and_then(Value::as_str)
    }

    pub fn is_verified(&self) -> bool {
        self.get("is_verified")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl TryFrom<Value> for UserProfile {
    type Error = Value;

    /// Accept only JSON objects; anything else is handed back
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self(fields)),
            other => Err(other),
        }
    }
}

/// Authenticated identity: bearer token plus profile
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserProfile) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// Value for the `Authorization` header
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Snapshot of the session layer exposed to the UI
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub is_initializing: bool,
}

impl AuthState {
    pub fn user(&self) -> Option<&UserProfile> {
        self.session.as_ref().map(|session| &session.user)
    }

    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: None,
            is_initializing: true, // Start with loading until storage has been read
        }
    }
}

/// Lifecycle of a [`SessionManager`](crate::SessionManager).
///
/// Restoring from storage is synchronous, so a manager moves straight from
/// `Uninitialized` to one of the ready phases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    LoggedOut,
    LoggedIn,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_json_round_trip_keeps_fields() {
        let profile = UserProfile::try_from(json!({"id": 1, "email": "a@b.com"})).unwrap();
        let restored = UserProfile::from_json(&profile.to_json()).unwrap();
        assert_eq!(restored, profile);
        assert_eq!(restored.id(), Some(&json!(1)));
        assert_eq!(restored.email(), Some("a@b.com"));
    }

    #[test]
    fn test_profile_rejects_non_objects() {
        assert!(UserProfile::from_json("not json").is_err());
        assert!(UserProfile::from_json("null").is_err());
        assert!(UserProfile::from_json("[1,2]").is_err());
        assert!(UserProfile::try_from(json!("text")).is_err());
    }

    #[test]
    fn test_is_verified_defaults_to_false() {
        let mut profile = UserProfile::default();
        assert!(!profile.is_verified());
        profile.insert("is_verified", json!(true));
        assert!(profile.is_verified());
    }

    #[test]
    fn test_bearer_format() {
        let session = Session::new("abc123", UserProfile::default());
        assert_eq!(session.bearer(), "Bearer abc123");
    }

    #[test]
    fn test_default_state_is_loading() {
        let state = AuthState::default();
        assert!(state.is_initializing);
        assert!(!state.is_authenticated());
        assert!(state.user().is_none());
    }
}
