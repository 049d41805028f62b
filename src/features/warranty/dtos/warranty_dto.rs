use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::error::AppError;
use crate::shared::validation::Schema;

/// Allowed MIME types for the car image
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Maximum car image size in bytes (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Multipart field carrying the car image
pub const CAR_IMAGE_FIELD: &str = "carImage";

/// Warranty registration form for OpenAPI documentation
/// Note: the handler reads the multipart stream directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
#[schema(rename_all = "camelCase")]
pub struct WarrantyFormDto {
    #[schema(example = "Jane Doe")]
    pub customer_name: String,
    #[schema(example = "+919876543210")]
    pub phone_number: String,
    #[schema(example = "jane@example.com")]
    pub email_address: String,
    #[schema(example = "SGM12345")]
    pub sigma_roll_code: String,
    #[schema(example = "Ultra Clear PPF")]
    pub ppf_category: String,
    #[schema(example = "AutoShine Studio")]
    pub detailer_name: String,
    #[schema(example = "9876500000")]
    pub detailer_mobile: String,
    #[schema(example = "Hyderabad")]
    pub location: String,
    pub message: Option<String>,
    /// Car photo showing the PPF roll (JPEG, PNG or WebP, max 10MB)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub car_image: Option<String>,
}

/// Text fields as received from the form; absent fields stay empty
#[derive(Debug, Clone, Default)]
pub struct WarrantyFields {
    pub customer_name: String,
    pub phone_number: String,
    pub email_address: String,
    pub sigma_roll_code: String,
    pub ppf_category: String,
    pub detailer_name: String,
    pub detailer_mobile: String,
    pub location: String,
    pub message: Option<String>,
}

impl WarrantyFields {
    /// Store a multipart text field; returns false for names the form does not define
    pub fn set(&mut self, name: &str, value: String) -> bool {
        match name {
            "customerName" => self.customer_name = value,
            "phoneNumber" => self.phone_number = value,
            "emailAddress" => self.email_address = value,
            "sigmaRollCode" => self.sigma_roll_code = value,
            "ppfCategory" => self.ppf_category = value,
            "detailerName" => self.detailer_name = value,
            "detailerMobile" => self.detailer_mobile = value,
            "location" => self.location = value,
            "message" => self.message = Some(value),
            _ => return false,
        }
        true
    }
}

/// Car image attached to a registration
#[derive(Debug, Clone)]
pub struct CarImage {
    pub data: Vec<u8>,
    pub file_name: String,
    pub content_type: String,
}

/// Warranty record as validated and written to the sheet
#[derive(Debug, Clone, Default, PartialEq, Validate)]
pub struct WarrantySubmission {
    #[validate(length(min = 2, max = 100, message = "Customer name must be 2-100 characters"))]
    pub customer_name: String,

    #[validate(
        length(min = 10, max = 15, message = "Phone number must be 10-15 characters"),
        regex(
            path = "*crate::shared::validation::PHONE_REGEX",
            message = "Please enter a valid phone number"
        )
    )]
    pub phone_number: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email_address: String,

    #[validate(length(
        min = 5,
        max = 50,
        message = "Sigma Roll Unique Code must be 5-50 characters"
    ))]
    pub sigma_roll_code: String,

    #[validate(length(min = 1, message = "Please select a PPF category"))]
    pub ppf_category: String,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: Option<String>,

    #[validate(length(
        min = 2,
        max = 100,
        message = "Detailer/Studio name must be 2-100 characters"
    ))]
    pub detailer_name: String,

    #[validate(
        length(min = 10, max = 15, message = "Mobile number must be 10-15 characters"),
        regex(
            path = "*crate::shared::validation::PHONE_REGEX",
            message = "Please enter a valid mobile number"
        )
    )]
    pub detailer_mobile: String,

    #[validate(length(min = 3, max = 200, message = "Location must be 3-200 characters"))]
    pub location: String,

    #[validate(length(max = 1000, message = "Message must be less than 1000 characters"))]
    pub message: Option<String>,
}

impl Schema for WarrantySubmission {
    const FIELD_ORDER: &'static [&'static str] = &[
        "customerName",
        "phoneNumber",
        "emailAddress",
        "sigmaRollCode",
        "ppfCategory",
        "imageUrl",
        "detailerName",
        "detailerMobile",
        "location",
        "message",
    ];
}

impl WarrantySubmission {
    /// Assemble the candidate record; empty optional values are treated as absent
    pub fn from_form(fields: WarrantyFields, image_url: Option<String>) -> Self {
        Self {
            customer_name: fields.customer_name,
            phone_number: fields.phone_number,
            email_address: fields.email_address,
            sigma_roll_code: fields.sigma_roll_code,
            ppf_category: fields.ppf_category,
            image_url: image_url.filter(|url| !url.is_empty()),
            detailer_name: fields.detailer_name,
            detailer_mobile: fields.detailer_mobile,
            location: fields.location,
            message: fields.message.filter(|m| !m.is_empty()),
        }
    }

    /// Image URL as written downstream (empty when no image was attached)
    pub fn image_url_or_empty(&self) -> &str {
        self.image_url.as_deref().unwrap_or_default()
    }

    pub fn message_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}

/// Local checks run before any upload is attempted
pub fn validate_image_file(size: usize, content_type: &str) -> Result<(), AppError> {
    if size > MAX_IMAGE_SIZE {
        return Err(AppError::BadRequest(
            "Image file is too large. Maximum size is 10MB.".to_string(),
        ));
    }

    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Err(AppError::BadRequest(
            "Invalid image format. Only JPEG, PNG, and WebP are allowed.".to_string(),
        ));
    }

    Ok(())
}

/// Summary echoed back after a successful registration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationSummaryDto {
    pub customer_name: String,
    pub email_address: String,
    pub sigma_roll_code: String,
    pub ppf_category: String,
    /// ISO-8601 registration timestamp
    #[schema(example = "2026-01-15T09:30:00.000Z")]
    pub registration_date: String,
}

/// Static description served on GET
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WarrantyEndpointInfoDto {
    pub message: String,
    pub required_fields: Vec<String>,
    pub optional_fields: Vec<String>,
}

impl Default for WarrantyEndpointInfoDto {
    fn default() -> Self {
        let required = [
            "customerName",
            "phoneNumber",
            "emailAddress",
            "sigmaRollCode",
            "ppfCategory",
            "detailerName",
            "detailerMobile",
            "location",
        ];
        Self {
            message: "Warranty registration endpoint. Use POST to submit a registration."
                .to_string(),
            required_fields: required.iter().map(|s| s.to_string()).collect(),
            optional_fields: vec!["message".to_string(), "carImage (file)".to_string()],
        }
    }
}
