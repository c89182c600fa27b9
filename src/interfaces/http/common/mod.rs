//! Shared HTTP types: response envelope, error mapping, extractors

mod extractors;
mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidationError;

use crate::domain::DomainError;

pub use extractors::{ApiPath, ApiQuery, ApiRejection};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

/// Standard API response envelope
///
/// Every REST endpoint except `204 No Content` answers with this wrapper.
/// On success: `{"success": true, "data": {...}}`,
/// on failure: `{"success": false, "error": "description"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` when the request succeeded
    pub success: bool,
    /// Payload; absent on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error description; absent on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error half of every handler's `Result`
pub type ApiError<T> = (StatusCode, Json<ApiResponse<T>>);

/// HTTP status for a domain error.
pub fn domain_error_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::DuplicateName(_) | DomainError::DuplicateEmail(_) => StatusCode::CONFLICT,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Convert a domain error into an enveloped error response.
pub fn domain_error<T>(error: DomainError) -> ApiError<T> {
    let status = domain_error_status(&error);
    if status.is_server_error() {
        tracing::error!(error = %error, "Request failed");
    }
    (status, Json(ApiResponse::error(error.to_string())))
}

pub fn not_found<T>(message: impl Into<String>) -> ApiError<T> {
    (StatusCode::NOT_FOUND, Json(ApiResponse::error(message)))
}

pub fn bad_request<T>(message: impl Into<String>) -> ApiError<T> {
    (StatusCode::BAD_REQUEST, Json(ApiResponse::error(message)))
}

/// `validator` rule rejecting empty and whitespace-only strings.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_map_to_status_codes() {
        assert_eq!(
            domain_error_status(&DomainError::not_found("Celda", 1)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            domain_error_status(&DomainError::DuplicateName("A1".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            domain_error_status(&DomainError::DuplicateEmail("a@b".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            domain_error_status(&DomainError::Validation("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            domain_error_status(&DomainError::Unauthorized("x".into())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            domain_error_status(&DomainError::Storage("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn envelope_omits_absent_fields() {
        let ok = serde_json::to_value(ApiResponse::success(5)).unwrap();
        assert_eq!(ok, serde_json::json!({"success": true, "data": 5}));

        let err = serde_json::to_value(ApiResponse::<()>::error("boom")).unwrap();
        assert_eq!(err, serde_json::json!({"success": false, "error": "boom"}));
    }

    #[test]
    fn blank_strings_fail_non_blank() {
        assert!(non_blank("A1").is_ok());
        assert!(non_blank("").is_err());
        assert!(non_blank("   ").is_err());
    }
}
