//! Session manager
//!
//! Owns the auth state for one UI tree. Every mutation is written through to
//! the [`KeyValueStore`] and then pushed to subscribers. On construction the
//! manager hooks the shared [`ApiClient`]: a request interceptor attaches the
//! bearer token from the current session, and a response interceptor ends the
//! session whenever any request comes back 401. Both hooks are ejected when
//! the last handle is dropped.

use crate::error::{AuthFailure, AuthResult};
use crate::messages::{self, ActionMessages};
use crate::notify::Notifier;
use crate::session::{AuthState, Phase, Session, UserProfile};
use crate::store::{KeyValueStore, TOKEN_KEY, USER_KEY};
use crate::types::{
    EmailRequest, FORGOT_PASSWORD_PATH, GOOGLE_AUTH_PATH, LOGIN_PATH, LoginRequest,
    REGISTER_PATH, RESET_PASSWORD_PATH, ResetPasswordRequest, TokenRequest, TokenResponse,
    VERIFY_EMAIL_PATH,
};
use porter_http::reqwest::header::{AUTHORIZATION, HeaderValue};
use porter_http::{ApiClient, ClientError, InterceptorId};
use serde::Serialize;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type Listener = Rc<dyn Fn(&AuthState)>;

/// Handle to the session layer. Clones share the same state.
#[derive(Clone)]
pub struct SessionManager {
    inner: Rc<Inner>,
}

struct Inner {
    client: ApiClient,
    store: Rc<dyn KeyValueStore>,
    notifier: Rc<dyn Notifier>,
    state: RefCell<AuthState>,
    initialized: Cell<bool>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener: Cell<u64>,
    request_hook: InterceptorId,
    response_hook: InterceptorId,
}

impl SessionManager {
    /// Create a manager and register its interceptors on `client`
    pub fn new(
        client: ApiClient,
        store: Rc<dyn KeyValueStore>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<Inner>| {
            let request_hook = {
                let weak = weak.clone();
                client.intercept_requests(move |request| {
                    if let Some(inner) = weak.upgrade() {
                        inner.attach_credential(request);
                    }
                })
            };
            let response_hook = {
                let weak = weak.clone();
                client.intercept_responses(move |error| {
                    if let Some(inner) = weak.upgrade() {
                        inner.handle_failure(error);
                    }
                })
            };

            Inner {
                client,
                store,
                notifier,
                state: RefCell::new(AuthState::default()),
                initialized: Cell::new(false),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
                request_hook,
                response_hook,
            }
        });

        Self { inner }
    }

    /// Restore the session persisted by a previous run.
    ///
    /// Runs once; later calls are no-ops. Never touches the network.
    pub fn initialize(&self) {
        let inner = &self.inner;
        if inner.initialized.replace(true) {
            tracing::debug!("Session manager already initialized");
            return;
        }

        let token = inner.store.get(TOKEN_KEY).filter(|token| !token.is_empty());
        let user = inner.store.get(USER_KEY).filter(|raw| !raw.is_empty());

        let session = match (token, user) {
            (Some(token), Some(raw_user)) => match UserProfile::from_json(&raw_user) {
                Ok(user) => Some(Session::new(token, user)),
                Err(error) => {
                    tracing::error!(%error, "Error parsing stored user data, clearing session");
                    inner.clear_session();
                    None
                }
            },
            _ => None,
        };

        tracing::debug!(restored = session.is_some(), "Session initialized");
        inner.update(|state| {
            state.session = session;
            state.is_initializing = false;
        });
    }

    /// Sign in with email and password via `POST /auth/login`
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<UserProfile> {
        let body = LoginRequest { email, password };
        self.authenticate(LOGIN_PATH, &body, messages::LOGIN).await
    }

    /// Create an account via `POST /auth/register`; `profile_data` is sent as-is
    pub async fn register<B>(&self, profile_data: &B) -> AuthResult<UserProfile>
    where
        B: Serialize + ?Sized,
    {
        self.authenticate(REGISTER_PATH, profile_data, messages::REGISTER)
            .await
    }

    /// Exchange a Google ID token for a session via `POST /auth/google`
    pub async fn google_auth(&self, id_token: &str) -> AuthResult<UserProfile> {
        let body = TokenRequest { token: id_token };
        self.authenticate(GOOGLE_AUTH_PATH, &body, messages::GOOGLE_AUTH)
            .await
    }

    /// Ask the backend to email a password reset link
    pub async fn forgot_password(&self, email: &str) -> AuthResult<()> {
        let body = EmailRequest { email };
        self.submit(FORGOT_PASSWORD_PATH, &body, messages::FORGOT_PASSWORD)
            .await
    }

    /// Set a new password using the token from a reset link
    pub async fn reset_password(&self, token: &str, new_password: &str) -> AuthResult<()> {
        let body = ResetPasswordRequest {
            token,
            new_password,
        };
        self.submit(RESET_PASSWORD_PATH, &body, messages::RESET_PASSWORD)
            .await
    }

    /// Confirm an email address; marks the signed-in profile as verified
    pub async fn verify_email(&self, token: &str) -> AuthResult<()> {
        let body = TokenRequest { token };
        self.submit(VERIFY_EMAIL_PATH, &body, messages::VERIFY_EMAIL)
            .await?;
        self.inner.mark_verified();
        Ok(())
    }

    /// End the session. Safe to call when already logged out.
    pub fn logout(&self) {
        self.inner.clear_session();
    }

    /// Register a listener called with the new state after every change.
    ///
    /// The listener stays registered until the returned guard is dropped.
    pub fn subscribe(&self, listener: impl Fn(&AuthState) + 'static) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }

    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.inner.state.borrow().user().cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_initializing
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn phase(&self) -> Phase {
        if !self.inner.initialized.get() {
            return Phase::Uninitialized;
        }
        if self.inner.state.borrow().is_authenticated() {
            Phase::LoggedIn
        } else {
            Phase::LoggedOut
        }
    }

    /// `Authorization` value attached to outgoing requests, if any
    pub fn authorization_header(&self) -> Option<String> {
        self.inner.authorization_header()
    }

    /// The client this manager is attached to
    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    async fn authenticate<B>(
        &self,
        path: &str,
        body: &B,
        messages: ActionMessages,
    ) -> AuthResult<UserProfile>
    where
        B: Serialize + ?Sized,
    {
        let result: Result<TokenResponse, ClientError> =
            self.inner.client.post_json(path, body).await;
        match result {
            Ok(response) => {
                let session = Session::new(response.access_token, response.user);
                let user = session.user.clone();
                self.inner.start_session(session);
                tracing::debug!(path, "Session started");
                self.inner.notifier.success(messages.success);
                Ok(user)
            }
            Err(error) => Err(self.reject(path, &error, messages)),
        }
    }

    async fn submit<B>(&self, path: &str, body: &B, messages: ActionMessages) -> AuthResult<()>
    where
        B: Serialize + ?Sized,
    {
        match self.inner.client.post(path, body).await {
            Ok(()) => {
                self.inner.notifier.success(messages.success);
                Ok(())
            }
            Err(error) => Err(self.reject(path, &error, messages)),
        }
    }

    fn reject(&self, path: &str, error: &ClientError, messages: ActionMessages) -> AuthFailure {
        tracing::warn!(path, %error, "Auth request failed");
        let message = error
            .detail()
            .unwrap_or_else(|| messages.failure.to_string());
        self.inner.notifier.error(&message);
        AuthFailure::new(message)
    }
}

impl Inner {
    fn authorization_header(&self) -> Option<String> {
        self.state.borrow().session.as_ref().map(Session::bearer)
    }

    fn attach_credential(&self, request: &mut porter_http::reqwest::Request) {
        let Some(bearer) = self.authorization_header() else {
            return;
        };
        match HeaderValue::from_str(&bearer) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(error) => {
                tracing::warn!(%error, "Session token is not a valid header value, sending request without it");
            }
        }
    }

    fn handle_failure(&self, error: &ClientError) {
        if !error.is_auth_expired() {
            return;
        }
        tracing::info!("Request rejected with 401, ending session");
        self.clear_session();
        self.notifier.error(messages::SESSION_EXPIRED);
    }

    fn start_session(&self, session: Session) {
        self.store.set(TOKEN_KEY, &session.token);
        self.store.set(USER_KEY, &session.user.to_json());
        self.update(|state| state.session = Some(session));
    }

    fn clear_session(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
        if self.state.borrow().session.is_some() {
            self.update(|state| state.session = None);
            tracing::debug!("Session cleared");
        }
    }

    fn mark_verified(&self) {
        let Some(mut user) = self.state.borrow().user().cloned() else {
            return;
        };
        user.insert("is_verified", Value::Bool(true));
        self.store.set(USER_KEY, &user.to_json());
        self.update(|state| {
            if let Some(session) = state.session.as_mut() {
                session.user = user;
            }
        });
    }

    /// Apply `mutate`, then notify listeners with the resulting snapshot.
    ///
    /// No borrow is held while listeners run, so they may read the manager
    /// or drop their own subscription.
    fn update(&self, mutate: impl FnOnce(&mut AuthState)) {
        let snapshot = {
            let mut state = self.state.borrow_mut();
            mutate(&mut state);
            state.clone()
        };
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.client.eject_request_interceptor(self.request_hook);
        self.client.eject_response_interceptor(self.response_hook);
    }
}

impl PartialEq for SessionManager {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionManager")
            .field("base_url", &self.inner.client.base_url())
            .field("phase", &self.phase())
            .finish_non_exhaustive()
    }
}

/// Keeps a [`SessionManager::subscribe`] listener registered while alive
#[must_use = "dropping a Subscription unregisters the listener"]
pub struct Subscription {
    inner: Weak<Inner>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}
