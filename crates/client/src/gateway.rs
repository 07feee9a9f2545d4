//! Credentialed gateway to the admin API
//!
//! All backend traffic goes through [`AuthGateway::send`]. Requests carry the
//! client-source header and cookie credentials; an expired access token gets
//! exactly one refresh attempt before the request is retried or abandoned.

use crate::config::{CLIENT_SOURCE_HEADER, DEFAULT_API_PREFIX, DEFAULT_CLIENT_SOURCE, paths};
use crate::envelope::{Envelope, decode_response};
use crate::error::ClientError;
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use ticketcore_core::settings::DashboardSettings;
use ticketcore_core::{Session, SessionRefresher, SessionStore, TokenExpiry};
use tracing::{debug, info, warn};
use url::Url;

/// Rebuildable description of one API call
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    expected: u16,
    refreshable: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            expected: 200,
            refreshable: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Attach a JSON body
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ClientError> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Embedded status that counts as success (200 unless set)
    #[must_use]
    pub const fn expect(mut self, status: u16) -> Self {
        self.expected = status;
        self
    }

    /// Never trigger a token refresh for this request
    #[must_use]
    pub const fn without_refresh(mut self) -> Self {
        self.refreshable = false;
        self
    }

    pub const fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub const fn expected_status(&self) -> u16 {
        self.expected
    }

    pub const fn is_refreshable(&self) -> bool {
        self.refreshable
    }
}

/// Admin API gateway
#[derive(Debug, Clone)]
pub struct AuthGateway {
    client: Client,
    api_root: String,
    client_source: String,
    session: SessionStore,
}

impl AuthGateway {
    /// Create a new gateway builder
    pub fn builder() -> GatewayBuilder {
        GatewayBuilder::default()
    }

    /// Gateway configured from dashboard settings; `origin` stands in for a
    /// missing base URL
    pub fn from_settings(
        settings: &DashboardSettings,
        origin: &str,
        session: SessionStore,
    ) -> Result<Self, ClientError> {
        Self::builder()
            .base_url(settings.api_base_url.as_deref().unwrap_or(origin))
            .api_prefix(&settings.api_prefix)
            .client_source(&settings.client_source)
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .session(session)
            .build()
    }

    /// Base URL plus API prefix
    pub fn api_root(&self) -> &str {
        &self.api_root
    }

    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    fn request_builder(&self, request: &ApiRequest) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.api_root, request.path);
        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .header(CLIENT_SOURCE_HEADER, &self.client_source);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        #[cfg(target_arch = "wasm32")]
        {
            builder = builder.fetch_credentials_include();
        }

        builder
    }

    /// One round trip, no refresh handling
    async fn execute<T: DeserializeOwned>(
        &self,
        request: &ApiRequest,
    ) -> Result<Envelope<T>, ClientError> {
        debug!(method = %request.method, path = %request.path, "sending request");
        let response = self.request_builder(request).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        decode_response(status, &body, request.expected)
    }

    /// Send a request, refreshing the session once if the access token has
    /// expired.
    ///
    /// When the refresh fails, or the retry is rejected as unauthorized
    /// again, the local session is cleared and
    /// [`ClientError::SessionExpired`] is returned.
    pub async fn send<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Envelope<T>, ClientError> {
        match self.execute(&request).await {
            Err(error) if request.refreshable && error.is_auth_expired() => {
                info!(path = %request.path, "access token rejected, refreshing session");
                if let Err(refresh_error) = self.refresh_session().await {
                    warn!(error = %refresh_error, "session refresh failed");
                    return Err(ClientError::SessionExpired);
                }

                match self.execute(&request).await {
                    Err(retry_error) if retry_error.is_auth_expired() => {
                        warn!(path = %request.path, "request still unauthorized after refresh");
                        self.session.clear();
                        Err(ClientError::SessionExpired)
                    }
                    retried => retried,
                }
            }
            other => other,
        }
    }

    /// Exchange the refresh cookie for a new access token.
    ///
    /// Success establishes a fully authenticated session; any failure
    /// clears the local session.
    pub async fn refresh_session(&self) -> Result<Session, ClientError> {
        let request = ApiRequest::post(paths::REFRESH).without_refresh();
        let result = self
            .execute::<TokenExpiry>(&request)
            .await
            .and_then(Envelope::into_data);

        match result {
            Ok(expiry) => {
                let session = Session::authenticated(expiry);
                self.session.establish(session.clone());
                Ok(session)
            }
            Err(error) => {
                self.session.clear();
                Err(error)
            }
        }
    }
}

#[async_trait(?Send)]
impl SessionRefresher for AuthGateway {
    type Error = ClientError;

    async fn refresh(&self) -> Result<Session, ClientError> {
        self.refresh_session().await
    }
}

/// Builder for [`AuthGateway`]
#[derive(Debug, Default)]
pub struct GatewayBuilder {
    base_url: Option<String>,
    api_prefix: Option<String>,
    client_source: Option<String>,
    timeout: Option<Duration>,
    session: Option<SessionStore>,
}

impl GatewayBuilder {
    /// Backend origin, e.g. `https://thedemonstrate.com`
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn client_source(mut self, source: impl Into<String>) -> Self {
        self.client_source = Some(source.into());
        self
    }

    /// Request timeout; ignored in the browser
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Share an existing session store instead of starting empty
    #[must_use]
    pub fn session(mut self, session: SessionStore) -> Self {
        self.session = Some(session);
        self
    }

    pub fn build(self) -> Result<AuthGateway, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;
        Url::parse(&base_url)
            .map_err(|e| ClientError::Configuration(format!("invalid base_url '{base_url}': {e}")))?;

        let prefix = self
            .api_prefix
            .unwrap_or_else(|| DEFAULT_API_PREFIX.to_string());
        let api_root = format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            prefix.trim_matches('/')
        )
        .trim_end_matches('/')
        .to_string();

        #[cfg(not(target_arch = "wasm32"))]
        let client = {
            let mut builder = ClientBuilder::new().cookie_store(true);
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            builder.build()?
        };

        #[cfg(target_arch = "wasm32")]
        let client = {
            let _ = self.timeout;
            ClientBuilder::new().build()?
        };

        Ok(AuthGateway {
            client,
            api_root,
            client_source: self
                .client_source
                .unwrap_or_else(|| DEFAULT_CLIENT_SOURCE.to_string()),
            session: self.session.unwrap_or_default(),
        })
    }
}
