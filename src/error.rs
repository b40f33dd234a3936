//! Error types for the catalog service.
//!
//! Uses thiserror for ergonomic error definitions that integrate
//! with axum's response system.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Upload input errors
    #[error("No file part")]
    MissingFile,

    #[error("No selected file")]
    EmptyFilename,

    #[error("File too large: max {max_size} bytes")]
    FileTooLarge { max_size: usize },

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Resource errors
    #[error("{0}")]
    NotFound(String),

    // Store and filesystem errors
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400
            Self::MissingFile
            | Self::EmptyFilename
            | Self::Validation(_)
            | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,

            // 404
            Self::NotFound(_) => StatusCode::NOT_FOUND,

            // 413
            Self::FileTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,

            // 500
            Self::Database(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingFile => "MISSING_FILE",
            Self::EmptyFilename => "EMPTY_FILENAME",
            Self::FileTooLarge { .. } => "FILE_TOO_LARGE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Io(_) => "IO_ERROR",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(code, "{}", message);
        }

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidInput(rejection.body_text())
    }
}

// Ids are integers; anything else names no record.
impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(reason = %rejection.body_text(), "Unparseable record id");
        Self::NotFound("File not found".into())
    }
}
