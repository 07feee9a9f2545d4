//! Dashboard settings
//!
//! Settings are layered with the `config` crate: built-in defaults first,
//! then an optional TOML document (the admin app embeds one at build time).

use crate::error::{CoreError, CoreResult};
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_API_PREFIX: &str = "/ticketcore-api/api/v1";
pub const DEFAULT_CLIENT_SOURCE: &str = "WEB";
pub const DEFAULT_ROUTER_BASENAME: &str = "/adminpannel";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SESSION_CHECK_INTERVAL_MS: u32 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSettings {
    /// Backend origin; the page origin is used when unset
    #[serde(default)]
    pub api_base_url: Option<String>,
    pub api_prefix: String,
    /// Value of the `X-Client-Source` header sent with every request
    pub client_source: String,
    pub router_basename: String,
    /// Native builds only; browsers manage their own fetch timeouts
    pub request_timeout_secs: u64,
    /// How often the dashboard re-checks the access token expiry
    pub session_check_interval_ms: u32,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            client_source: DEFAULT_CLIENT_SOURCE.to_string(),
            router_basename: DEFAULT_ROUTER_BASENAME.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            session_check_interval_ms: DEFAULT_SESSION_CHECK_INTERVAL_MS,
        }
    }
}

impl DashboardSettings {
    /// Layer a TOML document over the defaults and validate the result
    pub fn from_toml(source: &str) -> CoreResult<Self> {
        let layered = Config::builder()
            .set_default("api_prefix", DEFAULT_API_PREFIX)?
            .set_default("client_source", DEFAULT_CLIENT_SOURCE)?
            .set_default("router_basename", DEFAULT_ROUTER_BASENAME)?
            .set_default(
                "request_timeout_secs",
                i64::try_from(DEFAULT_REQUEST_TIMEOUT_SECS).unwrap_or(i64::MAX),
            )?
            .set_default(
                "session_check_interval_ms",
                i64::from(DEFAULT_SESSION_CHECK_INTERVAL_MS),
            )?
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?;

        let settings: Self = layered.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> CoreResult<()> {
        if let Some(base) = &self.api_base_url {
            let url = Url::parse(base)
                .map_err(|e| CoreError::invalid_config(format!("api_base_url '{base}': {e}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(CoreError::invalid_config(format!(
                    "api_base_url must use http or https, got '{}'",
                    url.scheme()
                )));
            }
        }
        if !self.api_prefix.starts_with('/') {
            return Err(CoreError::invalid_config("api_prefix must start with '/'"));
        }
        if !self.router_basename.starts_with('/') {
            return Err(CoreError::invalid_config(
                "router_basename must start with '/'",
            ));
        }
        if self.client_source.trim().is_empty() {
            return Err(CoreError::invalid_config("client_source must not be empty"));
        }
        if self.session_check_interval_ms == 0 {
            return Err(CoreError::invalid_config(
                "session_check_interval_ms must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Absolute API root, falling back to `origin` when no base URL is set
    pub fn api_root(&self, origin: &str) -> String {
        let base = self.api_base_url.as_deref().unwrap_or(origin);
        format!(
            "{}/{}",
            base.trim_end_matches('/'),
            self.api_prefix.trim_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let settings = DashboardSettings::from_toml("").unwrap();
        assert_eq!(settings, DashboardSettings::default());
    }

    #[test]
    fn test_document_overrides_defaults() {
        let settings = DashboardSettings::from_toml(
            r#"
            api_base_url = "https://thedemonstrate.com"
            router_basename = "/admin"
            session_check_interval_ms = 30000
            "#,
        )
        .unwrap();

        assert_eq!(settings.router_basename, "/admin");
        assert_eq!(settings.session_check_interval_ms, 30_000);
        assert_eq!(settings.client_source, DEFAULT_CLIENT_SOURCE);
        assert_eq!(settings.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
        assert_eq!(
            settings.api_root("http://ignored"),
            "https://thedemonstrate.com/ticketcore-api/api/v1"
        );
    }

    #[test]
    fn test_api_root_uses_origin_when_unset() {
        let settings = DashboardSettings::default();
        assert_eq!(
            settings.api_root("http://localhost:8080/"),
            "http://localhost:8080/ticketcore-api/api/v1"
        );
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let err = DashboardSettings::from_toml(r#"api_base_url = "ftp://example.com""#)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig { .. }));

        assert!(DashboardSettings::from_toml(r#"api_prefix = "api""#).is_err());
        assert!(DashboardSettings::from_toml(r#"client_source = " ""#).is_err());
        assert!(DashboardSettings::from_toml("not toml = = =").is_err());
    }
}
