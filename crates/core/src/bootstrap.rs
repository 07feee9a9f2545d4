//! Session bootstrap state machine
//!
//! On start the dashboard attempts one silent refresh using the refresh
//! cookie and keeps the loading indicator up until that attempt settles.
//! `Booting` is the only non-terminal phase; once `Ready` the outcome is
//! fixed for the lifetime of the page.

use crate::session::Session;
use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::fmt::Display;
use tracing::{debug, info, warn};

/// Anything able to exchange the refresh credential for a new session
#[cfg_attr(test, mockall::automock(type Error = String;))]
#[async_trait(?Send)]
pub trait SessionRefresher {
    type Error: Display;

    async fn refresh(&self) -> Result<Session, Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPhase {
    Booting,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootOutcome {
    Authenticated(Session),
    /// Refresh failed or was abandoned; the user must log in
    Anonymous,
}

impl BootOutcome {
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

#[derive(Debug)]
pub struct SessionBootstrap {
    phase: Cell<BootPhase>,
    started: Cell<bool>,
    outcome: RefCell<Option<BootOutcome>>,
}

impl Default for SessionBootstrap {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionBootstrap {
    pub const fn new() -> Self {
        Self {
            phase: Cell::new(BootPhase::Booting),
            started: Cell::new(false),
            outcome: RefCell::new(None),
        }
    }

    pub fn phase(&self) -> BootPhase {
        self.phase.get()
    }

    /// The loading indicator is shown exactly while this is true
    pub fn is_loading(&self) -> bool {
        self.phase.get() == BootPhase::Booting
    }

    pub fn outcome(&self) -> Option<BootOutcome> {
        self.outcome.borrow().clone()
    }

    /// Run the refresh once and settle into `Ready`.
    ///
    /// Refresh errors are logged and become [`BootOutcome::Anonymous`].
    /// Calling again after settling returns the recorded outcome without
    /// another refresh; a call made while the first is still in flight
    /// returns `None`.
    pub async fn run<R>(&self, refresher: &R) -> Option<BootOutcome>
    where
        R: SessionRefresher + ?Sized,
    {
        if let Some(outcome) = self.outcome() {
            return Some(outcome);
        }
        if self.started.replace(true) {
            debug!("session bootstrap already in flight");
            return None;
        }

        let guard = SettleOnDrop(self);
        let outcome = match refresher.refresh().await {
            Ok(session) => {
                info!(
                    access_expiry = %session.access_token_expiry,
                    "session restored during boot"
                );
                BootOutcome::Authenticated(session)
            }
            Err(error) => {
                warn!(%error, "token refresh failed during boot");
                BootOutcome::Anonymous
            }
        };
        *self.outcome.borrow_mut() = Some(outcome.clone());
        drop(guard);

        Some(outcome)
    }
}

/// Moves the bootstrap to `Ready` however `run` exits, including when its
/// future is dropped before the refresh settles.
struct SettleOnDrop<'a>(&'a SessionBootstrap);

impl Drop for SettleOnDrop<'_> {
    fn drop(&mut self) {
        let mut outcome = self.0.outcome.borrow_mut();
        if outcome.is_none() {
            debug!("session bootstrap abandoned before refresh settled");
            *outcome = Some(BootOutcome::Anonymous);
        }
        self.0.phase.set(BootPhase::Ready);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::TokenExpiry;
    use chrono::{Duration, Utc};
    use tokio::sync::oneshot;

    fn session() -> Session {
        let now = Utc::now();
        Session::authenticated(TokenExpiry {
            access_token_expiry: now + Duration::minutes(15),
            refresh_token_expiry: now + Duration::days(7),
        })
    }

    /// Refresher whose result is released by the test
    struct GatedRefresher {
        gate: RefCell<Option<oneshot::Receiver<Result<Session, String>>>>,
    }

    #[async_trait(?Send)]
    impl SessionRefresher for GatedRefresher {
        type Error = String;

        async fn refresh(&self) -> Result<Session, String> {
            let gate = self.gate.borrow_mut().take().ok_or("gate already used")?;
            gate.await.map_err(|_| "gate dropped".to_string())?
        }
    }

    #[tokio::test]
    async fn test_successful_refresh_authenticates() {
        let mut refresher = MockSessionRefresher::new();
        let expected = session();
        let returned = expected.clone();
        refresher
            .expect_refresh()
            .times(1)
            .returning(move || Ok(returned.clone()));

        let boot = SessionBootstrap::new();
        assert!(boot.is_loading());

        let outcome = boot.run(&refresher).await;
        assert_eq!(outcome, Some(BootOutcome::Authenticated(expected)));
        assert_eq!(boot.phase(), BootPhase::Ready);
    }

    #[tokio::test]
    async fn test_failed_refresh_still_settles() {
        let mut refresher = MockSessionRefresher::new();
        refresher
            .expect_refresh()
            .times(1)
            .returning(|| Err("error sending request: connection refused".to_string()));

        let boot = SessionBootstrap::new();
        let outcome = boot.run(&refresher).await;

        assert_eq!(outcome, Some(BootOutcome::Anonymous));
        assert!(!boot.is_loading());
    }

    #[tokio::test]
    async fn test_refresh_runs_exactly_once() {
        let mut refresher = MockSessionRefresher::new();
        refresher
            .expect_refresh()
            .times(1)
            .returning(|| Err("unauthorized".to_string()));

        let boot = SessionBootstrap::new();
        boot.run(&refresher).await;
        let again = boot.run(&refresher).await;

        assert_eq!(again, Some(BootOutcome::Anonymous));
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_until_refresh_settles() {
        let (release, gate) = oneshot::channel();
        let refresher = GatedRefresher {
            gate: RefCell::new(Some(gate)),
        };
        let boot = SessionBootstrap::new();

        let run = boot.run(&refresher);
        tokio::pin!(run);

        let pending =
            tokio::time::timeout(std::time::Duration::from_millis(50), &mut run).await;
        assert!(pending.is_err(), "refresh should still be in flight");
        assert!(boot.is_loading());
        assert!(boot.outcome().is_none());

        release.send(Ok(session())).unwrap();
        let outcome = run.await;

        assert!(outcome.is_some_and(|o| o.is_authenticated()));
        assert!(!boot.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_run_does_not_refresh_twice() {
        let (release, gate) = oneshot::channel();
        let refresher = GatedRefresher {
            gate: RefCell::new(Some(gate)),
        };
        let boot = SessionBootstrap::new();

        let first = boot.run(&refresher);
        tokio::pin!(first);
        let _ = tokio::time::timeout(std::time::Duration::from_millis(10), &mut first).await;

        assert_eq!(boot.run(&refresher).await, None);

        release.send(Err("expired".into())).unwrap();
        assert_eq!(first.await, Some(BootOutcome::Anonymous));
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_run_settles_anonymous() {
        let (_release, gate) = oneshot::channel();
        let refresher = GatedRefresher {
            gate: RefCell::new(Some(gate)),
        };
        let boot = SessionBootstrap::new();

        {
            let run = boot.run(&refresher);
            tokio::pin!(run);
            let _ = tokio::time::timeout(std::time::Duration::from_millis(10), &mut run).await;
        }

        assert_eq!(boot.phase(), BootPhase::Ready);
        assert_eq!(boot.outcome(), Some(BootOutcome::Anonymous));
    }
}
