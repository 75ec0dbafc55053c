use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure of a single API call. Server messages are carried verbatim so
/// callers can show them as-is.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Invalid base URL: {0}")]
    Url(#[from] url::ParseError),
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    field: Option<String>,
}

impl ClientError {
    /// Classify a non-success response from its status and raw body.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let (message, field) = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => (parsed.message, parsed.field),
            Err(_) if !body.trim().is_empty() => (body.trim().to_string(), None),
            Err(_) => (
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string(),
                None,
            ),
        };

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST => ClientError::Validation { message, field },
            _ => ClientError::Status { status, message },
        }
    }

    /// Field the server blamed, for validation failures.
    pub fn field(&self) -> Option<&str> {
        match self {
            ClientError::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }
}
