use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::features::warranty::dtos::{
    CarImage, RegistrationSummaryDto, WarrantyEndpointInfoDto, WarrantyFields, WarrantyFormDto,
    CAR_IMAGE_FIELD,
};
use crate::features::warranty::services::WarrantyService;
use crate::shared::types::{ErrorResponse, SubmissionResponse};

pub const REQUEST_TOO_LARGE_MESSAGE: &str = "Request too large. Please reduce file size.";

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(REQUEST_TOO_LARGE_MESSAGE.to_string())
    } else {
        debug!("Failed to read multipart field: {}", err);
        AppError::BadRequest(format!("Failed to read form data: {}", err.body_text()))
    }
}

/// Submit a warranty registration
///
/// Accepts multipart/form-data with the eight required text fields, an
/// optional `message` and an optional `carImage` file (JPEG, PNG or WebP,
/// max 10MB). Unknown fields are ignored.
#[utoipa::path(
    post,
    path = "/api/warranty",
    tag = "warranty",
    request_body(
        content = WarrantyFormDto,
        content_type = "multipart/form-data",
        description = "Warranty registration form with optional car image",
    ),
    responses(
        (status = 200, description = "Registration recorded", body = SubmissionResponse<RegistrationSummaryDto>),
        (status = 400, description = "Invalid image or validation error", body = ErrorResponse),
        (status = 413, description = "Request too large", body = ErrorResponse),
        (status = 500, description = "Image host or spreadsheet failure", body = ErrorResponse)
    )
)]
pub async fn submit_warranty(
    State(service): State<Arc<WarrantyService>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<SubmissionResponse<RegistrationSummaryDto>>> {
    let mut multipart = multipart
        .map_err(|e| AppError::BadRequest(format!("Invalid form data: {}", e.body_text())))?;

    let mut fields = WarrantyFields::default();
    let mut car_image: Option<CarImage> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let field_name = field.name().unwrap_or("").to_string();

        // A `carImage` part without a file name is a plain value, not an upload
        if field_name == CAR_IMAGE_FIELD && field.file_name().is_some() {
            let content_type = field
                .content_type()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "application/octet-stream".to_string());
            let file_name = field.file_name().unwrap_or_default().to_string();
            let data = field.bytes().await.map_err(multipart_error)?;

            car_image = Some(CarImage {
                data: data.to_vec(),
                file_name,
                content_type,
            });
        } else {
            let value = field.text().await.map_err(multipart_error)?;
            if !fields.set(&field_name, value) {
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let receipt = service.register(fields, car_image).await?;

    Ok(Json(SubmissionResponse::success(
        receipt.message,
        receipt.mock_mode,
        receipt.summary,
    )))
}

/// Describe the registration endpoint
#[utoipa::path(
    get,
    path = "/api/warranty",
    tag = "warranty",
    responses(
        (status = 200, description = "Accepted fields", body = WarrantyEndpointInfoDto)
    )
)]
pub async fn describe_warranty() -> Json<WarrantyEndpointInfoDto> {
    Json(WarrantyEndpointInfoDto::default())
}

/// CORS preflight for browsers posting from other origins
#[utoipa::path(
    options,
    path = "/api/warranty",
    tag = "warranty",
    responses(
        (status = 200, description = "Preflight accepted")
    )
)]
pub async fn warranty_preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
        ],
    )
}
