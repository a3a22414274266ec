//! Error taxonomy for REST calls.

use reqwest::StatusCode;
use serde::Deserialize;
use store::StoreError;
use thiserror::Error;

/// Everything that can go wrong calling the backend.
///
/// `Clone + PartialEq` so it can sit in UI state; transport errors are kept
/// as their rendered message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request could not be built and was never sent.
    #[error("request could not be built: {0}")]
    Request(String),
    #[error("network error: {0}")]
    Network(String),
    /// HTTP 401. The stored token has already been cleared.
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("the server did not return a session token")]
    MissingToken,
    #[error("you must be signed in")]
    NotAuthenticated,
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ApiError {
    /// Whether the session must be dropped because of this error.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Map a non-success response to an error, preferring the message the
    /// server put in the body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = error_message(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

        if status == StatusCode::UNAUTHORIZED {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Server {
                status: status.as_u16(),
                message,
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ApiError::Request(err.to_string())
        } else if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Message {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<Message>,
    error: Option<String>,
}

fn error_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let message = match parsed.message {
        Some(Message::One(message)) => Some(message),
        Some(Message::Many(messages)) => Some(messages.join(", ")),
        None => None,
    };
    message.or(parsed.error).filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_uses_body_message() {
        let err = ApiError::from_response(
            StatusCode::UNAUTHORIZED,
            r#"{"statusCode":401,"message":"Invalid credentials"}"#,
        );
        assert_eq!(
            err,
            ApiError::Unauthorized {
                message: "Invalid credentials".into()
            }
        );
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_validation_messages_are_joined() {
        let err = ApiError::from_response(
            StatusCode::BAD_REQUEST,
            r#"{"message":["email must be an email","password is too short"],"error":"Bad Request"}"#,
        );
        assert_eq!(
            err.to_string(),
            "email must be an email, password is too short"
        );
        assert!(matches!(err, ApiError::Server { status: 400, .. }));
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_error_field_fallback() {
        let err = ApiError::from_response(StatusCode::CONFLICT, r#"{"error":"Email taken"}"#);
        assert_eq!(err.to_string(), "Email taken");
    }

    #[test]
    fn test_non_json_body_falls_back_to_reason() {
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, "<html>upstream</html>");
        assert_eq!(
            err,
            ApiError::Server {
                status: 502,
                message: "Bad Gateway".into()
            }
        );
    }

    #[test]
    fn test_store_error_is_transparent() {
        let err = ApiError::from(StoreError::Unavailable);
        assert_eq!(err.to_string(), "local storage is not available");
        assert!(!err.is_unauthorized());
    }
}
