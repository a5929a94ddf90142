//! Session context and provider

use crate::components::Toaster;
use crate::config::FrontendConfig;
use crate::notify::{ToastAction, ToastList, ToastNotifier};
use crate::storage::BrowserStore;
use porter_core::{AuthResult, AuthState, SessionManager, UserProfile};
use porter_http::{ApiClient, ClientError};
use serde_json::Value;
use std::future::Future;
use std::rc::Rc;
use yew::prelude::*;

/// What components see through [`use_session`]
#[derive(Clone, Debug, PartialEq)]
pub struct SessionHandle {
    manager: SessionManager,
    state: AuthState,
}

impl SessionHandle {
    pub const fn new(manager: SessionManager, state: AuthState) -> Self {
        Self { manager, state }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.state.user()
    }

    /// True until stored credentials have been read
    pub const fn loading(&self) -> bool {
        self.state.is_initializing
    }

    pub const fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub const fn state(&self) -> &AuthState {
        &self.state
    }

    pub const fn manager(&self) -> &SessionManager {
        &self.manager
    }

    /// Client that carries the session's credentials, for app API calls
    pub fn client(&self) -> ApiClient {
        self.manager.client().clone()
    }

    pub fn login(
        &self,
        email: String,
        password: String,
    ) -> impl Future<Output = AuthResult<UserProfile>> + 'static {
        let manager = self.manager.clone();
        async move { manager.login(&email, &password).await }
    }

    pub fn register(
        &self,
        profile_data: Value,
    ) -> impl Future<Output = AuthResult<UserProfile>> + 'static {
        let manager = self.manager.clone();
        async move { manager.register(&profile_data).await }
    }

    pub fn google_auth(
        &self,
        id_token: String,
    ) -> impl Future<Output = AuthResult<UserProfile>> + 'static {
        let manager = self.manager.clone();
        async move { manager.google_auth(&id_token).await }
    }

    pub fn forgot_password(&self, email: String) -> impl Future<Output = AuthResult<()>> + 'static {
        let manager = self.manager.clone();
        async move { manager.forgot_password(&email).await }
    }

    pub fn reset_password(
        &self,
        token: String,
        new_password: String,
    ) -> impl Future<Output = AuthResult<()>> + 'static {
        let manager = self.manager.clone();
        async move { manager.reset_password(&token, &new_password).await }
    }

    pub fn verify_email(&self, token: String) -> impl Future<Output = AuthResult<()>> + 'static {
        let manager = self.manager.clone();
        async move { manager.verify_email(&token).await }
    }

    pub fn logout(&self) {
        self.manager.logout();
    }
}

fn build_manager(
    config: &FrontendConfig,
    toasts: UseReducerDispatcher<ToastList>,
) -> Result<SessionManager, ClientError> {
    let client = ApiClient::from_config(&config.api)?;
    let notifier = ToastNotifier::new(toasts, config.toast_duration_ms);
    Ok(SessionManager::new(
        client,
        Rc::new(BrowserStore),
        Rc::new(notifier),
    ))
}

/// Session provider props
#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
    #[prop_or_default]
    pub config: FrontendConfig,
}

/// Owns the [`SessionManager`] for its subtree.
///
/// The manager is created on mount and dropped on unmount, which also
/// ejects its interceptors from the client.
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let toasts = use_reducer(ToastList::default);
    let auth_state = use_state(AuthState::default);

    let manager = {
        let config = props.config.clone();
        let dispatcher = toasts.dispatcher();
        use_memo((), move |_| {
            build_manager(&config, dispatcher).inspect_err(|error| {
                tracing::error!(%error, "Failed to create session manager");
            })
        })
    };

    // Subscribe, then restore the stored session on mount
    {
        let manager = manager.clone();
        let setter = auth_state.setter();
        use_effect_with((), move |_| {
            let subscription = manager.as_ref().as_ref().ok().map(|manager| {
                let subscription = manager.subscribe(move |state| setter.set(state.clone()));
                manager.initialize();
                subscription
            });

            // Cleanup on unmount
            move || drop(subscription)
        });
    }

    let manager = match manager.as_ref() {
        Ok(manager) => manager.clone(),
        Err(error) => {
            return html! {
                <div class="p-4 text-red-700 dark:text-red-300" role="alert">
                    {format!("Unable to start session: {error}")}
                </div>
            };
        }
    };

    let on_dismiss = {
        let toasts = toasts.dispatcher();
        Callback::from(move |id| toasts.dispatch(ToastAction::Dismiss(id)))
    };

    let handle = SessionHandle::new(manager, (*auth_state).clone());

    html! {
        <ContextProvider<SessionHandle> context={handle}>
            {props.children.clone()}
            <Toaster toasts={toasts.items.clone()} {on_dismiss} />
        </ContextProvider<SessionHandle>>
    }
}

/// Hook to use the session context.
///
/// Panics when called outside a [`SessionProvider`].
#[hook]
pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
        .expect("SessionHandle not found. Make sure to wrap your component with SessionProvider")
}

/// Hook to get the signed-in user
#[hook]
pub fn use_user() -> Option<UserProfile> {
    let session = use_session();
    session.user().cloned()
}

/// Hook to check if authenticated
#[hook]
pub fn use_is_authenticated() -> bool {
    let session = use_session();
    session.is_authenticated()
}
