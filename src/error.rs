use crate::config::StatusMode;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Message returned when an ISBN lookup misses.
pub const BOOK_NOT_FOUND: &str = "Book not found";
/// Message returned when an author search has no matches.
pub const NO_BOOKS_BY_AUTHOR: &str = "No books found by this author";
/// Message returned when a title search has no matches.
pub const NO_BOOKS_WITH_TITLE: &str = "No books found with this title";
/// Message returned when registration is missing a field.
pub const CREDENTIALS_REQUIRED: &str = "Unable to register user. Username and password required.";
/// Message returned when the username is taken.
pub const USER_EXISTS: &str = "User already exists!";

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum AppError {
    /// Lookup or filter yielded nothing.
    #[error("{0}")]
    NotFound(String),

    /// Required registration field missing or empty.
    #[error("{0}")]
    InvalidInput(String),

    /// Registration would duplicate a username.
    #[error("{0}")]
    AlreadyExists(String),

    /// Configuration or seed data error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Status code for this error under the given mapping.
    pub fn status(&self, mode: StatusMode) -> StatusCode {
        match (self, mode) {
            (AppError::NotFound(_), _) => StatusCode::NOT_FOUND,
            (AppError::InvalidInput(_) | AppError::AlreadyExists(_), StatusMode::Legacy) => {
                StatusCode::NOT_FOUND
            }
            (AppError::InvalidInput(_), StatusMode::Distinct) => StatusCode::BAD_REQUEST,
            (AppError::AlreadyExists(_), StatusMode::Distinct) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body carried by every response that only has something to say.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    /// Human-readable message.
    pub message: String,
}

impl MessageBody {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// An [`AppError`] bound to the status mapping it should be reported with.
#[derive(Debug)]
pub struct ApiError {
    error: AppError,
    mode: StatusMode,
}

impl ApiError {
    /// Bind an error to a status mapping.
    pub fn new(error: AppError, mode: StatusMode) -> Self {
        Self { error, mode }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status(self.mode);

        if status.is_server_error() {
            tracing::error!(error = %self.error, "Request error");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self.error, "Request rejected");
        }

        // Internal details stay in the log.
        let message = match &self.error {
            AppError::NotFound(m) | AppError::InvalidInput(m) | AppError::AlreadyExists(m) => {
                m.clone()
            }
            _ => "Internal server error".to_string(),
        };

        (status, Json(MessageBody::new(message))).into_response()
    }
}

/// Result type alias for the application.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let not_found = AppError::NotFound(BOOK_NOT_FOUND.to_string());
        let invalid = AppError::InvalidInput(CREDENTIALS_REQUIRED.to_string());
        let exists = AppError::AlreadyExists(USER_EXISTS.to_string());
        let config = AppError::Config("bad seed".to_string());

        for err in [&not_found, &invalid, &exists] {
            assert_eq!(err.status(StatusMode::Legacy), StatusCode::NOT_FOUND);
        }
        assert_eq!(not_found.status(StatusMode::Distinct), StatusCode::NOT_FOUND);
        assert_eq!(invalid.status(StatusMode::Distinct), StatusCode::BAD_REQUEST);
        assert_eq!(exists.status(StatusMode::Distinct), StatusCode::CONFLICT);
        assert_eq!(
            config.status(StatusMode::Legacy),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
