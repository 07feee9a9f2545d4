//! Route guard driven by the session's pending context

use crate::context::use_session;
use crate::routes::Route;
use ticketcore_core::access::{self, RouteDecision, RouteKind};
use tracing::debug;
use yew::prelude::*;
use yew_router::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RouteGuardProps {
    pub kind: RouteKind,
    pub children: Children,
}

/// Render the children or redirect to where the visitor belongs
#[function_component(RouteGuard)]
pub fn route_guard(props: &RouteGuardProps) -> Html {
    let session = use_session();

    match access::decide(props.kind, session.session.as_ref()) {
        RouteDecision::Render => html! { <>{props.children.clone()}</> },
        RouteDecision::Redirect(destination) => {
            debug!(kind = ?props.kind, ?destination, "route guard redirect");
            html! { <Redirect<Route> to={Route::from(destination)} /> }
        }
    }
}
