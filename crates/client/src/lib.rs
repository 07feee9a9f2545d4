//! HTTP gateway for the Ticketcore admin API
//!
//! [`AuthGateway`] owns the session store and sends every request with the
//! client-source header and cookie credentials. Expired access tokens are
//! refreshed once per request before giving up with
//! [`ClientError::SessionExpired`].

pub mod auth;
pub mod config;
pub mod envelope;
pub mod error;
pub mod gateway;
pub mod operations;
pub mod profile;
pub mod resources;

pub use auth::{Credentials, LoginOutcome, PasswordPair};
pub use envelope::Envelope;
pub use error::ClientError;
pub use gateway::{ApiRequest, AuthGateway, GatewayBuilder};
pub use operations::{fetch_all, submit_create, submit_status, submit_update};
pub use resources::{Resource, StatusKey, StatusValue};
