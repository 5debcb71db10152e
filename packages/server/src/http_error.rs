//! HTTP error handling
//!
//! Maps repository outcomes onto status codes with a consistent JSON body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use blog_graph_core::RepositoryError;
use serde::{Deserialize, Serialize};

/// JSON error body returned by every endpoint
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpError {
    /// User-facing error message
    pub message: String,
    /// Machine-readable error code
    pub code: String,
    /// Optional detailed error information for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl HttpError {
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            details: None,
        }
    }

    pub fn with_details(
        message: impl Into<String>,
        code: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
            details: Some(details.into()),
        }
    }

    /// Lookup by id found nothing
    pub fn not_found(entity: &str, id: &str) -> Self {
        Self::new(format!("{} not found: {}", entity, id), "NOT_FOUND")
    }

    fn status(&self) -> StatusCode {
        match self.code.as_str() {
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "CONSTRAINT_VIOLATION" => StatusCode::CONFLICT,
            "INVALID_INPUT" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

impl From<RepositoryError> for HttpError {
    fn from(err: RepositoryError) -> Self {
        match &err {
            RepositoryError::ConstraintViolation { .. } => {
                tracing::warn!("Rejected write: {}", err);
                HttpError::with_details(
                    "A record with the same unique value already exists",
                    "CONSTRAINT_VIOLATION",
                    err.to_string(),
                )
            }
            _ => {
                tracing::error!("Repository failure: {}", err);
                HttpError::with_details("Database operation failed", "DATABASE_ERROR", err.to_string())
            }
        }
    }
}
