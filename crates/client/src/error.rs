//! Client error types

use serde_json::Value;
use thiserror::Error;
use ticketcore_core::FieldErrors;

pub const UNAUTHORIZED: u16 = 401;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// No response was received
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Backend rejected the request with per-field messages
    #[error("Validation failed ({status}): {fields}")]
    Validation {
        status: u16,
        message: String,
        fields: FieldErrors,
    },

    /// Backend rejected the request with a plain message
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Access expired and the refresh attempt failed
    #[error("Session expired")]
    SessionExpired,

    /// Successful response carrying a different embedded status than expected
    #[error("Unexpected status {actual} (expected {expected}): {message}")]
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        message: String,
    },

    /// Response carried no `data` where one was required
    #[error("Response carried no data: {0}")]
    MissingPayload(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Operation not possible in the current session state
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl ClientError {
    /// Build the error for a failed response.
    ///
    /// A `data` object of string values becomes [`ClientError::Validation`];
    /// anything else is a plain rejection.
    pub fn from_failure(status: u16, message: String, data: Option<&Value>) -> Self {
        match data.and_then(FieldErrors::from_value) {
            Some(fields) => Self::Validation {
                status,
                message,
                fields,
            },
            None => Self::Rejected { status, message },
        }
    }

    /// Status code of a backend rejection, embedded or transport
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Validation { status, .. } | Self::Rejected { status, .. } => Some(*status),
            Self::UnexpectedStatus { actual, .. } => Some(*actual),
            _ => None,
        }
    }

    /// Whether this failure means the access token is no longer accepted
    pub const fn is_auth_expired(&self) -> bool {
        matches!(self.status(), Some(UNAUTHORIZED))
    }

    pub const fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Text suitable for an error popup
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } | Self::Rejected { message, .. }
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            Self::Validation { fields, .. } => format!("Please correct: {fields}"),
            Self::Network(_) => "Unable to reach the server. Please try again.".to_string(),
            Self::SessionExpired => "Your session has expired. Please log in again.".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_map_becomes_validation() {
        let data = json!({"name": "required"});
        let error = ClientError::from_failure(400, "Validation failed".into(), Some(&data));

        let fields = error.field_errors().unwrap();
        assert_eq!(fields.get("name"), Some("required"));
        assert_eq!(fields.len(), 1);
        assert_eq!(error.status(), Some(400));
        assert_eq!(error.user_message(), "Validation failed");
    }

    #[test]
    fn test_non_map_data_is_rejection() {
        for data in [json!(["a", "b"]), json!({"nested": {"x": 1}}), json!("text")] {
            let error = ClientError::from_failure(409, "Conflict".into(), Some(&data));
            assert!(matches!(error, ClientError::Rejected { status: 409, .. }));
        }
        let error = ClientError::from_failure(500, String::new(), None);
        assert!(error.field_errors().is_none());
    }

    #[test]
    fn test_auth_expiry_detection() {
        assert!(ClientError::from_failure(401, "Unauthorized".into(), None).is_auth_expired());
        assert!(!ClientError::from_failure(403, "Forbidden".into(), None).is_auth_expired());
        assert!(!ClientError::SessionExpired.is_auth_expired());
    }

    #[test]
    fn test_user_message_falls_back_to_fields() {
        let error = ClientError::Validation {
            status: 400,
            message: " ".into(),
            fields: FieldErrors::new().with("code", "required"),
        };
        assert_eq!(error.user_message(), "Please correct: code: required");
    }
}
