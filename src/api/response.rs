//! Response types for the garde pay API.
//!
//! This module defines the success bodies that are not plain models, the
//! error response structures, and the mapping from engine errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{ShiftSummary, ValuedShift};

/// Response body for the `/recompute` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecomputeResponse {
    /// Every shift with its freshly computed fields, in request order.
    pub shifts: Vec<ValuedShift>,
    /// Totals over all shifts.
    pub summary: ShiftSummary,
}

/// Error body returned by every endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Machine-readable code, e.g. `GRADE_NOT_FOUND`.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Extra context, omitted when empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates an error body without details.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Attaches details to the error body.
    pub fn detailed(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// The body could not be parsed as the expected JSON.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// The body parsed but a field is missing or out of range.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// The selected grade has no configured rates.
    pub fn grade_not_found(grade: &str) -> Self {
        Self::new("GRADE_NOT_FOUND", format!("Grade not found: {}", grade))
            .detailed(format!("No rates are configured for grade '{}'", grade))
    }

    /// The loaded rate configuration is unusable.
    pub fn config_error(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self::new("CONFIG_ERROR", message).detailed(details)
    }
}

/// An [`ApiError`] paired with the status it is sent with.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// Creates a 400 response.
    pub fn bad_request(error: ApiError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let internal = |error: ApiError| Self::new(StatusCode::INTERNAL_SERVER_ERROR, error);
        match error {
            EngineError::ConfigNotFound { path } => internal(ApiError::config_error(
                "Configuration error",
                format!("Configuration file not found: {}", path),
            )),
            EngineError::ConfigParseError { path, message } => internal(ApiError::config_error(
                "Configuration parse error",
                format!("Failed to parse {}: {}", path, message),
            )),
            EngineError::InvalidRate {
                grade,
                field,
                message,
            } => internal(ApiError::config_error(
                format!("Invalid rate '{}' for grade '{}'", field, grade),
                message,
            )),
            EngineError::InvalidTimeZone { name } => internal(ApiError::config_error(
                "Invalid time zone",
                format!("'{}' is not an IANA time zone", name),
            )),
            EngineError::GradeNotFound { grade } => {
                Self::new(StatusCode::NOT_FOUND, ApiError::grade_not_found(&grade))
            }
            EngineError::InvalidIntervention {
                intervention_id,
                message,
            } => Self::bad_request(ApiError::new(
                "INVALID_INTERVENTION",
                format!("Invalid intervention '{}': {}", intervention_id, message),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn test_api_error_omits_missing_details() {
        let error = ApiError::malformed_json("Invalid JSON syntax");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"MALFORMED_JSON\""));
        assert!(json.contains("\"message\":\"Invalid JSON syntax\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_detailed_error_serializes_details() {
        let error = ApiError::validation_error("missing field `shift`").detailed("at line 1");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"VALIDATION_ERROR\""));
        assert!(json.contains("\"details\":\"at line 1\""));
    }

    #[test]
    fn test_grade_not_found_maps_to_404() {
        let api_error: ApiErrorResponse = EngineError::GradeNotFound {
            grade: "Colonel".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "GRADE_NOT_FOUND");
        assert!(api_error.error.message.contains("Colonel"));
    }

    #[test]
    fn test_config_errors_map_to_500() {
        let api_error: ApiErrorResponse = EngineError::InvalidRate {
            grade: "Pompier".to_string(),
            field: "garde".to_string(),
            message: "must not be negative, got -1".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");

        let api_error: ApiErrorResponse = EngineError::InvalidTimeZone {
            name: "Europe/Lutece".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(api_error.error.details.unwrap().contains("Europe/Lutece"));
    }

    #[test]
    fn test_invalid_intervention_maps_to_400() {
        let api_error: ApiErrorResponse = EngineError::InvalidIntervention {
            intervention_id: "int_001".to_string(),
            message: "not in progress".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_INTERVENTION");
    }

    #[tokio::test]
    async fn test_into_response_carries_status_and_body() {
        let response: Response = ApiErrorResponse::from(EngineError::GradeNotFound {
            grade: "Colonel".to_string(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()["content-type"], "application/json");
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "GRADE_NOT_FOUND");
    }
}
