use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::shared::types::{ErrorResponse, FieldError};

/// Message returned for anything the client should not see the details of
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Upstream failure; the message is already safe to show to the client
    #[error("Upstream service error: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg, None)),
            AppError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Validation failed", Some(details)),
            ),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorResponse::new(msg, None),
            ),
            // Upstream detail is logged where the adapter error is converted
            AppError::Upstream(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(msg, None),
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(GENERIC_ERROR_MESSAGE, None),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[tokio::test]
    async fn test_validation_error_lists_every_field() {
        let response = AppError::Validation(vec![
            FieldError::new("customerName", "Customer name must be 2-100 characters"),
            FieldError::new("location", "Location must be 3-200 characters"),
        ])
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["details"].as_array().map(|d| d.len()), Some(2));
        assert_eq!(body["details"][1]["field"], "location");
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let response = AppError::Internal("connection reset by peer".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], GENERIC_ERROR_MESSAGE);
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_upstream_error_returns_client_message() {
        let response = AppError::Upstream(
            "Google Sheet not found. Please check the sheet ID.".to_string(),
        )
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Google Sheet not found. Please check the sheet ID.");
    }

    #[tokio::test]
    async fn test_payload_too_large_maps_to_413() {
        let response =
            AppError::PayloadTooLarge("Request too large. Please reduce file size.".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
