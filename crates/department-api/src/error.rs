//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps registry errors from department-core to HTTP status codes and
//! returns JSON error bodies with a machine-readable code and message.
//! Internal error details are never exposed in responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use department_core::{RegistryError, ValidationError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "CONFLICT").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// For field validation failures: `{"field": "<name>"}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource or page not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Field validation or reference check failed (422).
    #[error("validation error: {0}")]
    Validation(String),

    /// A named draft field failed its rule (422).
    #[error("validation error: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },

    /// Request body or query string could not be parsed (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Missing or invalid token (401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Uniqueness conflict with an existing record (409).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error (500). Message is logged but not returned to client.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Validation(_) | Self::InvalidField { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR")
            }
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            Self::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        if matches!(&self, Self::Internal(_)) {
            tracing::error!(error = %self, "internal server error");
        }

        let details = match &self {
            Self::InvalidField { field, .. } => Some(serde_json::json!({ "field": field })),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidField {
            field: err.field(),
            message: err.to_string(),
        }
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Validation(inner) => inner.into(),
            RegistryError::UnknownReference { .. } => Self::Validation(err.to_string()),
            RegistryError::NotFound { .. } | RegistryError::PageOutOfRange { .. } => {
                Self::NotFound(err.to_string())
            }
            RegistryError::DuplicateRoomNumber { .. }
            | RegistryError::DuplicateDiscipline { .. }
            | RegistryError::DuplicateWorkTypeName { .. }
            | RegistryError::DuplicateAssignment { .. } => Self::Conflict(err.to_string()),
            RegistryError::Integrity(_) => Self::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn status_codes() {
        let cases = [
            (AppError::NotFound("x".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                AppError::Validation("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
            ),
            (AppError::BadRequest("x".into()), StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            (AppError::Unauthorized("x".into()), StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (AppError::Conflict("x".into()), StatusCode::CONFLICT, "CONFLICT"),
            (
                AppError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_and_code(), (status, code), "{err}");
        }
    }

    #[test]
    fn duplicate_room_maps_to_conflict() {
        let err = AppError::from(RegistryError::DuplicateRoomNumber {
            room_number: "301".into(),
            occupant: "Ivanov Ivan".into(),
        });
        match err {
            AppError::Conflict(msg) => {
                assert!(msg.contains("301"));
                assert!(msg.contains("Ivanov Ivan"));
            }
            other => panic!("expected Conflict, got: {other:?}"),
        }
    }

    #[test]
    fn field_validation_keeps_field_name() {
        let err = AppError::from(RegistryError::Validation(ValidationError::Rate(0.05)));
        match err {
            AppError::InvalidField { field, message } => {
                assert_eq!(field, "rate");
                assert!(message.contains("0.05"));
            }
            other => panic!("expected InvalidField, got: {other:?}"),
        }
    }

    #[test]
    fn unknown_reference_maps_to_validation() {
        let err = AppError::from(RegistryError::UnknownReference {
            kind: "discipline",
            id: Uuid::nil(),
        });
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn page_out_of_range_maps_to_not_found() {
        let err = AppError::from(RegistryError::PageOutOfRange { page: 9, pages: 2 });
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn integrity_maps_to_internal() {
        let err = AppError::from(RegistryError::Integrity("dangling workplace".into()));
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn error_body_skips_empty_details() {
        let body = ErrorBody {
            error: ErrorDetail {
                code: "TEST".to_string(),
                message: "test message".to_string(),
                details: None,
            },
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("test message"));
        assert!(!json.contains("details"));
    }

    // ── into_response tests ──────────────────────────────────────

    use http_body_util::BodyExt;

    async fn response_parts(err: AppError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    #[tokio::test]
    async fn into_response_conflict() {
        let (status, body) = response_parts(AppError::Conflict("room taken".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body.error.code, "CONFLICT");
        assert!(body.error.message.contains("room taken"));
    }

    #[tokio::test]
    async fn into_response_validation() {
        let (status, body) = response_parts(AppError::Validation("bad field".into())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn into_response_invalid_field_carries_details() {
        let err = AppError::from(ValidationError::Required {
            field: "room_number",
        });
        let (status, body) = response_parts(err).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error.code, "VALIDATION_ERROR");
        assert_eq!(
            body.error.details,
            Some(serde_json::json!({ "field": "room_number" }))
        );
    }

    #[tokio::test]
    async fn into_response_internal_hides_details() {
        let (status, body) =
            response_parts(AppError::Internal("db connection failed".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.message, "An internal error occurred");
        assert!(body.error.details.is_none());
    }
}
