use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Common error types used across the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid type for field '{field}': expected {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Invalid value for field '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Request body exceeds the {0} byte limit")]
    PayloadTooLarge(usize),
}

impl AppError {
    /// Machine-readable error category, returned as `kind` in error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingField(_) => "missing_field",
            AppError::InvalidType { .. } => "invalid_type",
            AppError::InvalidValue { .. } => "invalid_value",
            AppError::Decode(_) => "decode",
            AppError::PayloadTooLarge(_) => "payload_too_large",
        }
    }

    /// Name of the offending input field, if the error is about one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AppError::MissingField(field)
            | AppError::InvalidType { field, .. }
            | AppError::InvalidValue { field, .. } => Some(field),
            AppError::Decode(_) | AppError::PayloadTooLarge(_) => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.to_string(),
            "kind": self.kind(),
            "field": self.field(),
        });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_are_bad_request() {
        let err = AppError::MissingField("frame_rate");
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.kind(), "missing_field");
        assert_eq!(err.field(), Some("frame_rate"));
        assert_eq!(err.to_string(), "Missing required field: frame_rate");

        let err = AppError::InvalidValue {
            field: "adc_sample_rate",
            reason: "must be greater than zero".to_string(),
        };
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.field(), Some("adc_sample_rate"));
    }

    #[test]
    fn test_payload_too_large_status() {
        let err = AppError::PayloadTooLarge(16);
        assert_eq!(err.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.field(), None);
    }
}
