//! Error handling for the backend module

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The response body did not match the expected JSON shape
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },

    /// The server accepted the request but refused the command.
    #[error("Rejected by server: {0}")]
    Rejected(String),
}

/// `{ "error": "..." }`, the backend's failure body.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl BackendError {
    pub async fn from_response(response: reqwest::Response) -> BackendError {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        BackendError::Http {
            status,
            message: Self::error_message(&text),
        }
    }

    /// Prefers the backend's `error` field over the raw body.
    fn error_message(text: &str) -> String {
        serde_json::from_str::<ErrorBody>(text)
            .map(|body| body.error)
            .unwrap_or_else(|_| text.trim().to_string())
    }
}
