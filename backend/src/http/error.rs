//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::db::RepositoryError;
use crate::places::PlacesError;
use crate::services::ServiceError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    Internal(String),
    Repository(RepositoryError),
    /// Failure talking to the Places service
    Places(PlacesError),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ApiError) {
        match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Repository(e) => {
                let details = e.context().to_string();
                let (status, code) = match &e {
                    RepositoryError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
                    RepositoryError::ValidationError { .. } => {
                        (StatusCode::BAD_REQUEST, "BAD_REQUEST")
                    }
                    _ => (StatusCode::INTERNAL_SERVER_ERROR, "REPOSITORY_ERROR"),
                };
                (
                    status,
                    ApiError::new(code, e.message()).with_details(details),
                )
            }
            AppError::Places(e) => match &e {
                PlacesError::NotFound { .. } => {
                    (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", e.to_string()))
                }
                PlacesError::InvalidRequest { .. } => {
                    (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", e.to_string()))
                }
                _ => (
                    StatusCode::BAD_GATEWAY,
                    ApiError::new("UPSTREAM_ERROR", "Failed to fetch place data")
                        .with_details(e.to_string()),
                ),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        if status.is_server_error() {
            error!(status = status.as_u16(), code = %body.code, "{}", body.message);
        }
        (status, Json(body)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<PlacesError> for AppError {
    fn from(err: PlacesError) -> Self {
        AppError::Places(err)
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => AppError::BadRequest(msg),
            ServiceError::Repository(e) => AppError::Repository(e),
            ServiceError::Places(e) => AppError::Places(e),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> (StatusCode, String) {
        let (status, body) = err.status_and_body();
        (status, body.code)
    }

    #[test]
    fn test_repository_mapping() {
        assert_eq!(
            status_of(RepositoryError::not_found("Data not found").into()),
            (StatusCode::NOT_FOUND, "NOT_FOUND".to_string())
        );
        assert_eq!(
            status_of(RepositoryError::validation("bad").into()),
            (StatusCode::BAD_REQUEST, "BAD_REQUEST".to_string())
        );
        assert_eq!(
            status_of(RepositoryError::connection("down").into()),
            (StatusCode::INTERNAL_SERVER_ERROR, "REPOSITORY_ERROR".to_string())
        );
    }

    #[test]
    fn test_places_mapping() {
        let denied = PlacesError::from_status("REQUEST_DENIED", "x", None);
        assert_eq!(
            status_of(denied.into()),
            (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR".to_string())
        );
        let missing = PlacesError::from_status("NOT_FOUND", "x", None);
        assert_eq!(status_of(missing.into()).0, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_not_found_message_is_bare() {
        let (_, body) =
            AppError::from(RepositoryError::not_found("Data not found")).status_and_body();
        assert_eq!(body.message, "Data not found");
        assert!(body.details.is_some());
    }
}
