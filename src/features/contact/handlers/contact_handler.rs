//! Contact inquiry handler

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::core::error::Result;
use crate::core::extractor::AppJson;
use crate::features::contact::dtos::{ContactQueryDto, ContactReceiptDto};
use crate::features::contact::services::{ContactService, CONTACT_SUCCESS_MESSAGE};
use crate::shared::types::{ErrorResponse, SubmissionResponse};

/// Submit a contact inquiry
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactQueryDto,
    responses(
        (status = 200, description = "Inquiry recorded", body = SubmissionResponse<ContactReceiptDto>),
        (status = 400, description = "Malformed JSON or validation error", body = ErrorResponse),
        (status = 500, description = "Spreadsheet failure", body = ErrorResponse)
    ),
    tag = "contact"
)]
pub async fn submit_contact(
    State(service): State<Arc<ContactService>>,
    AppJson(dto): AppJson<ContactQueryDto>,
) -> Result<Json<SubmissionResponse<ContactReceiptDto>>> {
    let outcome = service.submit(dto).await?;

    Ok(Json(SubmissionResponse::success(
        CONTACT_SUCCESS_MESSAGE,
        outcome.mock_mode,
        outcome.receipt,
    )))
}
