use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::shared::validation::Schema;

/// Request DTO for a contact inquiry
///
/// Missing fields deserialize as empty strings and fail their length rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct ContactQueryDto {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    #[schema(example = "Rahul Verma")]
    pub name: String,

    #[validate(
        length(min = 10, max = 15, message = "Phone number must be 10-15 characters"),
        regex(
            path = "*crate::shared::validation::CONTACT_PHONE_REGEX",
            message = "Please enter a valid phone number"
        )
    )]
    #[schema(example = "(040) 2345 6789")]
    pub phone: String,

    #[validate(length(min = 10, max = 2000, message = "Query must be 10-2000 characters"))]
    #[schema(example = "Looking for a full-body PPF quote for a 2024 sedan.")]
    pub query: String,
}

impl Schema for ContactQueryDto {
    const FIELD_ORDER: &'static [&'static str] = &["name", "phone", "query"];
}

/// Response DTO for a recorded inquiry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceiptDto {
    pub name: String,
    #[schema(example = "2026-01-15T09:30:00.000Z")]
    pub submitted_at: String,
}
