//! Response envelope decoding
//!
//! Every backend response is shaped `{statusCode, message, data}`. The
//! embedded status is authoritative: a transport 200 can still carry an
//! embedded 400 with a field map.

use crate::error::ClientError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decoded response with a typed payload
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub status_code: u16,
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Take the payload, failing when the backend sent none
    pub fn into_data(self) -> Result<T, ClientError> {
        self.data.ok_or_else(|| {
            ClientError::MissingPayload(if self.message.is_empty() {
                format!("status {}", self.status_code)
            } else {
                self.message
            })
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEnvelope {
    #[serde(default)]
    status_code: Option<u16>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Interpret a response body against the embedded status the caller expects.
///
/// - transport non-2xx: the envelope (if any) describes the failure
/// - transport 2xx, embedded status equal to `expected`: success
/// - transport 2xx, other embedded 2xx: [`ClientError::UnexpectedStatus`]
/// - transport 2xx, embedded non-2xx: validation or rejection
///
/// A missing embedded status falls back to the transport status.
pub fn decode_response<T: DeserializeOwned>(
    transport: u16,
    body: &str,
    expected: u16,
) -> Result<Envelope<T>, ClientError> {
    let wire = if body.trim().is_empty() {
        WireEnvelope::default()
    } else {
        match serde_json::from_str::<WireEnvelope>(body) {
            Ok(wire) => wire,
            Err(error) if is_success(transport) => return Err(error.into()),
            // Proxies and gateways answer errors with plain text or HTML
            Err(_) => WireEnvelope {
                message: Some(body.trim().to_string()),
                ..WireEnvelope::default()
            },
        }
    };

    let message = wire.message.unwrap_or_default();

    if !is_success(transport) {
        return Err(ClientError::from_failure(
            transport,
            message,
            wire.data.as_ref(),
        ));
    }

    let embedded = wire.status_code.unwrap_or(transport);
    if embedded != expected {
        return Err(if is_success(embedded) {
            ClientError::UnexpectedStatus {
                expected,
                actual: embedded,
                message,
            }
        } else {
            ClientError::from_failure(embedded, message, wire.data.as_ref())
        });
    }

    let data = wire.data.map(serde_json::from_value).transpose()?;
    Ok(Envelope {
        status_code: embedded,
        message,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::de::IgnoredAny;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        name: String,
    }

    #[test]
    fn test_expected_status_decodes_data() {
        let envelope: Envelope<Named> = decode_response(
            200,
            r#"{"statusCode":201,"message":"Created","data":{"name":"Peru"}}"#,
            201,
        )
        .unwrap();
        assert_eq!(envelope.status_code, 201);
        assert_eq!(envelope.message, "Created");
        assert_eq!(envelope.into_data().unwrap().name, "Peru");
    }

    #[test]
    fn test_embedded_failure_inside_transport_success() {
        let error = decode_response::<IgnoredAny>(
            200,
            r#"{"statusCode":400,"message":"Validation failed","data":{"name":"required"}}"#,
            201,
        )
        .unwrap_err();
        assert_eq!(error.field_errors().and_then(|f| f.get("name")), Some("required"));
    }

    #[test]
    fn test_unexpected_success_status_is_failure() {
        let error =
            decode_response::<IgnoredAny>(200, r#"{"statusCode":200,"message":"ok"}"#, 201)
                .unwrap_err();
        assert!(matches!(
            error,
            ClientError::UnexpectedStatus {
                expected: 201,
                actual: 200,
                ..
            }
        ));
    }

    #[test]
    fn test_transport_failure_keeps_envelope_message() {
        let error = decode_response::<IgnoredAny>(
            401,
            r#"{"statusCode":401,"message":"Token expired"}"#,
            200,
        )
        .unwrap_err();
        assert!(error.is_auth_expired());
        assert_eq!(error.user_message(), "Token expired");

        let error = decode_response::<IgnoredAny>(502, "<html>Bad Gateway</html>", 200)
            .unwrap_err();
        assert!(matches!(error, ClientError::Rejected { status: 502, .. }));
    }

    #[test]
    fn test_missing_status_falls_back_to_transport() {
        let envelope: Envelope<IgnoredAny> = decode_response(200, "", 200).unwrap();
        assert!(envelope.data.is_none());
        assert!(matches!(
            envelope.into_data(),
            Err(ClientError::MissingPayload(_))
        ));
    }

    #[test]
    fn test_malformed_success_body_is_serialization_error() {
        let error = decode_response::<IgnoredAny>(200, "not json", 200).unwrap_err();
        assert!(matches!(error, ClientError::Serialization(_)));

        let error = decode_response::<Named>(200, r#"{"statusCode":200,"data":{"id":1}}"#, 200)
            .unwrap_err();
        assert!(matches!(error, ClientError::Serialization(_)));
    }
}
