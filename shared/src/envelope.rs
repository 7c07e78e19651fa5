//! The JSON envelope wrapped around every API response
//!
//! The server signals failure in-band: a populated `error` object is the
//! authoritative failure signal regardless of the HTTP status code, and must
//! be checked before `data` is trusted.

use crate::error::{RemoteError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Structured error reported by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub message: String,
}

/// Server-side metadata attached to most responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    #[serde(default)]
    pub api_version: String,
    /// Server-side query duration as reported by the server
    #[serde(default)]
    pub query_time: f64,
}

/// Raw decoded envelope: `{ error?, meta?, data? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// A successful, checked response with its payload guaranteed present.
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    pub meta: Option<Meta>,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            error: None,
            meta: None,
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(ApiErrorBody {
                message: message.into(),
            }),
            meta: None,
            data: None,
        }
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Fails with [`RemoteError::Api`] when the server reported an error.
    pub fn check(self) -> Result<Self> {
        match self.error {
            Some(error) => Err(RemoteError::Api {
                message: error.message,
            }),
            None => Ok(self),
        }
    }

    /// Checks the error field, then requires the data payload.
    pub fn into_response(self) -> Result<Response<T>> {
        let checked = self.check()?;
        match checked.data {
            Some(data) => Ok(Response {
                meta: checked.meta,
                data,
            }),
            None => Err(RemoteError::Protocol(
                <serde_json::Error as serde::de::Error>::missing_field("data"),
            )),
        }
    }
}

/// Decodes a response body into an envelope carrying a `T` payload.
pub fn decode_envelope<T: DeserializeOwned>(body: &[u8]) -> Result<Envelope<T>> {
    serde_json::from_slice(body).map_err(RemoteError::Protocol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Payload {
        #[serde(rename = "Name")]
        name: String,
    }

    #[test]
    fn test_decode_success_with_meta() {
        let body = br#"{"meta":{"apiVersion":"1.0","queryTime":0.25},"data":{"Name":"Alpha"}}"#;
        let envelope: Envelope<Payload> = decode_envelope(body).unwrap();

        let response = envelope.into_response().unwrap();
        let meta = response.meta.unwrap();
        assert_eq!(meta.api_version, "1.0");
        assert_eq!(meta.query_time, 0.25);
        assert_eq!(response.data.name, "Alpha");
    }

    #[test]
    fn test_error_takes_precedence_over_data() {
        let body = br#"{"error":{"message":"not found"},"data":{"Name":"ghost"}}"#;
        let envelope: Envelope<Payload> = decode_envelope(body).unwrap();

        match envelope.into_response() {
            Err(RemoteError::Api { message }) => assert_eq!(message, "not found"),
            other => panic!("expected api error, got {:?}", other),
        }
    }

    #[test]
    fn test_check_passes_without_data() {
        let body = br#"{"meta":{"apiVersion":"1.0","queryTime":1}}"#;
        let envelope: Envelope<Value> = decode_envelope(body).unwrap();
        let checked = envelope.check().unwrap();
        assert!(checked.data.is_none());
    }

    #[test]
    fn test_missing_data_is_protocol_error() {
        let envelope: Envelope<Payload> = decode_envelope(b"{}").unwrap();
        assert!(matches!(
            envelope.into_response(),
            Err(RemoteError::Protocol(_))
        ));
    }

    #[test]
    fn test_invalid_json_is_protocol_error() {
        let result: Result<Envelope<Payload>> = decode_envelope(b"<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(RemoteError::Protocol(_))));
    }

    #[test]
    fn test_chat_body_survives_success_envelope() {
        let original = "hello, \"engineers\"\nline two".to_string();
        let encoded = serde_json::to_vec(&Envelope::success(original.clone())).unwrap();

        let decoded: Envelope<String> = decode_envelope(&encoded).unwrap();
        assert!(decoded.error.is_none());
        assert_eq!(decoded.into_response().unwrap().data, original);
    }

    #[test]
    fn test_failure_serializes_without_data() {
        let json = serde_json::to_value(Envelope::<Payload>::failure("denied")).unwrap();
        assert_eq!(json, serde_json::json!({"error": {"message": "denied"}}));
    }
}
