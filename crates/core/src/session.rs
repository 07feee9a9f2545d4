//! Session state shared by the gateway and the UI
//!
//! Access and refresh tokens live in HTTP-only cookies; the dashboard only
//! ever sees their expiry timestamps plus whatever challenge is still
//! pending after login. The [`SessionStore`] is the single owner of that
//! state and is mutated only through [`SessionStore::establish`] and
//! [`SessionStore::clear`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

/// Authentication step still outstanding after login
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingContext {
    #[default]
    None,
    /// An OTP was sent and must be verified with the temp token
    TwoFactor,
    /// The account must set a new password before continuing
    PasswordChange,
}

/// Token expiry pair reported by login, OTP verification and refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenExpiry {
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub access_token_expiry: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub refresh_token_expiry: DateTime<Utc>,
}

/// Expiry timestamps arrive as RFC 3339, as offset-less local ISO strings
/// (interpreted as UTC) or as epoch milliseconds.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Millis(i64),
        Text(String),
    }

    pub fn parse(text: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(text)
            .map(|parsed| parsed.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|naive| naive.and_utc())
            })
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Raw::deserialize(deserializer)? {
            Raw::Millis(millis) => DateTime::from_timestamp_millis(millis)
                .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {millis}"))),
            Raw::Text(text) => {
                parse(&text).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {text}")))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token_expiry: DateTime<Utc>,
    pub refresh_token_expiry: DateTime<Utc>,
    pub pending: PendingContext,
    pub temp_token: Option<String>,
}

impl Session {
    /// A fully authenticated session with nothing pending
    pub const fn authenticated(expiry: TokenExpiry) -> Self {
        Self {
            access_token_expiry: expiry.access_token_expiry,
            refresh_token_expiry: expiry.refresh_token_expiry,
            pending: PendingContext::None,
            temp_token: None,
        }
    }

    /// A session that still has to pass a challenge using `temp_token`
    pub fn challenged(
        expiry: TokenExpiry,
        pending: PendingContext,
        temp_token: impl Into<String>,
    ) -> Self {
        Self {
            access_token_expiry: expiry.access_token_expiry,
            refresh_token_expiry: expiry.refresh_token_expiry,
            pending,
            temp_token: Some(temp_token.into()),
        }
    }

    pub fn is_fully_authenticated(&self) -> bool {
        self.pending == PendingContext::None
    }

    pub fn access_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.access_token_expiry
    }

    pub fn refresh_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.refresh_token_expiry
    }

    /// Temp token for the given challenge, if that challenge is pending
    pub fn challenge_token(&self, pending: PendingContext) -> Option<&str> {
        if self.pending == pending {
            self.temp_token.as_deref()
        } else {
            None
        }
    }
}

/// Cloneable handle onto the process-wide session.
///
/// Writes are last-write-wins; there is no cross-request coordination.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current session
    pub fn establish(&self, session: Session) {
        tracing::debug!(
            pending = ?session.pending,
            access_expiry = %session.access_token_expiry,
            "session established"
        );
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    /// Drop the current session; returns whether one existed
    pub fn clear(&self) -> bool {
        let previous = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            tracing::debug!("session cleared");
        }
        previous.is_some()
    }

    pub fn current(&self) -> Option<Session> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// True when a session exists and no challenge is pending
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(Session::is_fully_authenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn expiry() -> TokenExpiry {
        let now = Utc::now();
        TokenExpiry {
            access_token_expiry: now + Duration::minutes(15),
            refresh_token_expiry: now + Duration::days(7),
        }
    }

    #[test]
    fn test_store_starts_empty() {
        let store = SessionStore::new();
        assert!(store.current().is_none());
        assert!(!store.is_authenticated());
        assert!(!store.clear());
    }

    #[test]
    fn test_establish_and_clear_are_visible_through_clones() {
        let store = SessionStore::new();
        let handle = store.clone();

        store.establish(Session::authenticated(expiry()));
        assert!(handle.is_authenticated());

        assert!(handle.clear());
        assert!(store.current().is_none());
    }

    #[test]
    fn test_pending_challenge_is_not_authenticated() {
        let store = SessionStore::new();
        store.establish(Session::challenged(
            expiry(),
            PendingContext::TwoFactor,
            "temp-123",
        ));

        assert!(!store.is_authenticated());
        let session = store.current().unwrap();
        assert_eq!(session.challenge_token(PendingContext::TwoFactor), Some("temp-123"));
        assert_eq!(session.challenge_token(PendingContext::PasswordChange), None);
    }

    #[test]
    fn test_expiry_checks() {
        let session = Session::authenticated(expiry());
        let now = Utc::now();
        assert!(session.access_valid_at(now));
        assert!(!session.access_valid_at(now + Duration::hours(1)));
        assert!(session.refresh_valid_at(now + Duration::hours(1)));
    }

    #[test]
    fn test_token_expiry_uses_camel_case() {
        let parsed: TokenExpiry = serde_json::from_str(
            r#"{"accessTokenExpiry":"2026-10-16T10:15:00Z","refreshTokenExpiry":"2026-10-23T10:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(
            parsed.access_token_expiry.to_rfc3339(),
            "2026-10-16T10:15:00+00:00"
        );
    }

    #[test]
    fn test_token_expiry_accepts_offsetless_and_millis() {
        let parsed: TokenExpiry = serde_json::from_str(
            r#"{"accessTokenExpiry":"2026-10-16T10:15:00.250","refreshTokenExpiry":1792145700000}"#,
        )
        .unwrap();
        assert_eq!(parsed.access_token_expiry.timestamp_millis() % 1000, 250);
        assert_eq!(parsed.refresh_token_expiry.timestamp_millis(), 1_792_145_700_000);
        assert!(serde_json::from_str::<TokenExpiry>(
            r#"{"accessTokenExpiry":"soon","refreshTokenExpiry":"later"}"#
        )
        .is_err());
    }
}
