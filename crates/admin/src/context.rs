//! Shared gateway and session contexts

use chrono::Utc;
use gloo::timers::callback::Interval;
use std::ops::Deref;
use std::rc::Rc;
use ticketcore_client::AuthGateway;
use ticketcore_core::{BootOutcome, BootPhase, Session, SessionBootstrap, UserProfile};
use tracing::{debug, warn};
use yew::prelude::*;

/// Gateway shared by every page
#[derive(Debug, Clone)]
pub struct ApiHandle(Rc<AuthGateway>);

impl ApiHandle {
    pub fn new(gateway: AuthGateway) -> Self {
        Self(Rc::new(gateway))
    }
}

impl Deref for ApiHandle {
    type Target = AuthGateway;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl PartialEq for ApiHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Session as seen by the UI
#[derive(Clone, Debug, PartialEq)]
pub struct SessionState {
    pub phase: BootPhase,
    pub session: Option<Session>,
    pub profile: Option<UserProfile>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            phase: BootPhase::Booting,
            session: None,
            profile: None,
        }
    }
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(Session::is_fully_authenticated)
    }
}

pub enum SessionAction {
    Booted(BootOutcome),
    /// Mirror the gateway's session store after a login, logout or refresh
    Synced(Option<Session>),
    ProfileLoaded(UserProfile),
}

pub type SessionContext = UseReducerHandle<SessionState>;

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            SessionAction::Booted(outcome) => {
                let session = match outcome {
                    BootOutcome::Authenticated(session) => Some(session),
                    BootOutcome::Anonymous => None,
                };
                Rc::new(Self {
                    phase: BootPhase::Ready,
                    session,
                    profile: None,
                })
            }
            SessionAction::Synced(session) => {
                if self.session == session {
                    return self;
                }
                let profile = if session.as_ref().is_some_and(Session::is_fully_authenticated) {
                    self.profile.clone()
                } else {
                    None
                };
                Rc::new(Self {
                    phase: self.phase,
                    session,
                    profile,
                })
            }
            SessionAction::ProfileLoaded(profile) => Rc::new(Self {
                profile: Some(profile),
                ..(*self).clone()
            }),
        }
    }
}

/// Copy the gateway's current session into the context
pub fn sync_session(api: &ApiHandle, session: &SessionContext) {
    session.dispatch(SessionAction::Synced(api.session().current()));
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub api: ApiHandle,
    pub check_interval_ms: u32,
    pub children: Children,
}

/// Owns the session reducer, runs the boot refresh and keeps the session
/// fresh while the dashboard is open
#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let state = use_reducer(SessionState::default);
    let bootstrap = use_memo((), |_| SessionBootstrap::new());

    // Boot refresh, once per page load
    {
        let state = state.dispatcher();
        let api = props.api.clone();
        let bootstrap = bootstrap.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(outcome) = bootstrap.run(&*api).await {
                    state.dispatch(SessionAction::Booted(outcome));
                }
            });
        });
    }

    let authenticated = state.is_authenticated();

    // Profile for the header
    {
        let state = state.dispatcher();
        let api = props.api.clone();
        use_effect_with(authenticated, move |authenticated| {
            if *authenticated {
                wasm_bindgen_futures::spawn_local(async move {
                    match api.get_profile().await {
                        Ok(profile) => state.dispatch(SessionAction::ProfileLoaded(profile)),
                        Err(error) => warn!(%error, "failed to load profile"),
                    }
                });
            }
        });
    }

    // Periodic session check: refresh an expired access token, and pick up
    // sessions cleared by a failed request elsewhere
    {
        let state = state.dispatcher();
        let api = props.api.clone();
        let interval_ms = props.check_interval_ms;
        use_effect_with(authenticated, move |authenticated| {
            let interval = authenticated.then(|| {
                Interval::new(interval_ms, move || {
                    let state = state.clone();
                    let api = api.clone();
                    wasm_bindgen_futures::spawn_local(async move {
                        let expired = api
                            .session()
                            .current()
                            .is_some_and(|session| !session.access_valid_at(Utc::now()));
                        if expired {
                            debug!("access token expired; refreshing");
                            if let Err(error) = api.refresh_session().await {
                                warn!(%error, "periodic refresh failed");
                            }
                        }
                        state.dispatch(SessionAction::Synced(api.session().current()));
                    });
                })
            });
            move || drop(interval)
        });
    }

    html! {
        <ContextProvider<ApiHandle> context={props.api.clone()}>
            <ContextProvider<SessionContext> context={state}>
                {props.children.clone()}
            </ContextProvider<SessionContext>>
        </ContextProvider<ApiHandle>>
    }
}

#[hook]
pub fn use_api() -> ApiHandle {
    use_context::<ApiHandle>()
        .expect("ApiHandle not found. Make sure to wrap your component with SessionProvider")
}

#[hook]
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
        .expect("SessionContext not found. Make sure to wrap your component with SessionProvider")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use ticketcore_core::TokenExpiry;
    use wasm_bindgen_test::wasm_bindgen_test;

    fn session() -> Session {
        Session::authenticated(TokenExpiry {
            access_token_expiry: Utc::now() + Duration::minutes(15),
            refresh_token_expiry: Utc::now() + Duration::days(7),
        })
    }

    #[wasm_bindgen_test]
    fn test_boot_settles_phase() {
        let state = Rc::new(SessionState::default());
        let state = state.reduce(SessionAction::Booted(BootOutcome::Anonymous));
        assert_eq!(state.phase, BootPhase::Ready);
        assert!(!state.is_authenticated());

        let state = Rc::new(SessionState::default())
            .reduce(SessionAction::Booted(BootOutcome::Authenticated(session())));
        assert!(state.is_authenticated());
    }

    #[wasm_bindgen_test]
    fn test_sync_to_none_drops_profile() {
        let state = Rc::new(SessionState::default())
            .reduce(SessionAction::Booted(BootOutcome::Authenticated(session())))
            .reduce(SessionAction::ProfileLoaded(UserProfile::default()));
        assert!(state.profile.is_some());

        let state = state.reduce(SessionAction::Synced(None));
        assert!(state.profile.is_none());
        assert_eq!(state.phase, BootPhase::Ready);
    }

    #[wasm_bindgen_test]
    fn test_unchanged_sync_keeps_state() {
        let state = Rc::new(SessionState::default())
            .reduce(SessionAction::Booted(BootOutcome::Authenticated(session())));
        let current = state.session.clone();
        let next = state.clone().reduce(SessionAction::Synced(current));
        assert!(Rc::ptr_eq(&state, &next));
    }
}
