use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to {operation}: {status} - {body}")]
    Status {
        operation: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Server rejected {operation}: {message}")]
    Api {
        operation: &'static str,
        message: String,
    },

    #[error("Failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid server URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ClientError {
    /// Whether the server reported the notification as missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status, .. } if *status == StatusCode::NOT_FOUND)
    }
}
