//! Route access decisions
//!
//! Every route declares what kind of visitor it is for; the decision for
//! the current session is either to render it or to redirect elsewhere.

use crate::session::{PendingContext, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    /// Login and password recovery; only for visitors without a session
    Open,
    /// OTP verification after a two-factor login
    Challenge,
    /// Forced password change after login
    PasswordChange,
    /// Everything under the dashboard
    Protected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Login,
    OtpVerification,
    ChangePassword,
    Dashboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    Render,
    Redirect(Destination),
}

/// Where a visitor with `session` belongs when nothing else applies
pub fn home_for(session: Option<&Session>) -> Destination {
    match session.map(|s| s.pending) {
        None => Destination::Login,
        Some(PendingContext::None) => Destination::Dashboard,
        Some(PendingContext::TwoFactor) => Destination::OtpVerification,
        Some(PendingContext::PasswordChange) => Destination::ChangePassword,
    }
}

pub fn decide(kind: RouteKind, session: Option<&Session>) -> RouteDecision {
    let pending = session.map(|s| s.pending);
    let allowed = match kind {
        RouteKind::Open => !matches!(pending, Some(PendingContext::None)),
        RouteKind::Challenge => pending == Some(PendingContext::TwoFactor),
        RouteKind::PasswordChange => pending == Some(PendingContext::PasswordChange),
        RouteKind::Protected => pending == Some(PendingContext::None),
    };

    if allowed {
        RouteDecision::Render
    } else if kind == RouteKind::Protected {
        RouteDecision::Redirect(Destination::Login)
    } else {
        RouteDecision::Redirect(home_for(session))
    }
}
