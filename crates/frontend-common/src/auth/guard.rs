//! Route guards driven by the session state

use super::context::use_session;
use crate::components::Spinner;
use porter_core::AuthState;
use yew::prelude::*;
use yew_router::prelude::*;

/// What a guard renders for a given auth state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Loading,
    Render,
    Redirect,
}

/// Pages that need a signed-in user
pub const fn protected_outcome(state: &AuthState) -> GuardOutcome {
    if state.is_initializing {
        GuardOutcome::Loading
    } else if state.is_authenticated() {
        GuardOutcome::Render
    } else {
        GuardOutcome::Redirect
    }
}

/// Pages only meant for signed-out visitors (login, register, landing)
pub const fn public_outcome(state: &AuthState) -> GuardOutcome {
    if state.is_initializing {
        GuardOutcome::Loading
    } else if state.is_authenticated() {
        GuardOutcome::Redirect
    } else {
        GuardOutcome::Render
    }
}

#[derive(Properties, PartialEq)]
pub struct RouteGuardProps<R: Routable + 'static> {
    /// Where to send users the guard turns away
    pub redirect_to: R,
    pub children: Children,
}

fn render_guard<R: Routable + 'static>(outcome: GuardOutcome, props: &RouteGuardProps<R>) -> Html {
    match outcome {
        GuardOutcome::Loading => html! { <Spinner /> },
        GuardOutcome::Render => html! { <>{props.children.clone()}</> },
        GuardOutcome::Redirect => html! { <Redirect<R> to={props.redirect_to.clone()} /> },
    }
}

/// Renders children for signed-in users, redirects everyone else
#[function_component(ProtectedRoute)]
pub fn protected_route<R: Routable + 'static>(props: &RouteGuardProps<R>) -> Html {
    let session = use_session();
    render_guard(protected_outcome(session.state()), props)
}

/// Renders children for signed-out visitors, redirects signed-in users
#[function_component(PublicRoute)]
pub fn public_route<R: Routable + 'static>(props: &RouteGuardProps<R>) -> Html {
    let session = use_session();
    render_guard(public_outcome(session.state()), props)
}
