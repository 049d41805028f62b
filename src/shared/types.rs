use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Success envelope shared by the submission endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse<T> {
    pub success: bool,
    pub message: String,
    /// True when the submission was handled by the local stub instead of the live service
    pub mock_mode: bool,
    pub data: T,
}

impl<T> SubmissionResponse<T> {
    pub fn success(message: impl Into<String>, mock_mode: bool, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            mock_mode,
            data,
        }
    }
}

/// A single violated constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// Field name in wire form (camelCase)
    #[schema(example = "phoneNumber")]
    pub field: String,
    #[schema(example = "Please enter a valid phone number")]
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error envelope returned for every failed request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, details: Option<Vec<FieldError>>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details,
        }
    }
}

/// UTC timestamp with millisecond precision and a `Z` suffix
pub fn iso_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
