//! Notes service client errors.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Privacy violation")]
    PrivacyViolation,

    #[error("Not found")]
    NotFound,

    #[error("Server error")]
    ServerError,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl NotesError {
    /// Map an API status code onto the service's error taxonomy.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match StatusCode::from_u16(status) {
            Ok(StatusCode::UNAUTHORIZED) => NotesError::AuthenticationRequired,
            Ok(StatusCode::FORBIDDEN) => NotesError::PrivacyViolation,
            Ok(StatusCode::NOT_FOUND) => NotesError::NotFound,
            Ok(s) if s.is_server_error() => NotesError::ServerError,
            _ => NotesError::Api {
                status,
                message: message.into(),
            },
        }
    }
}
