//! Warranty Service - validation, image upload and sheet append

use chrono::Utc;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::warranty::dtos::{
    validate_image_file, CarImage, RegistrationSummaryDto, WarrantyFields, WarrantySubmission,
};
use crate::features::warranty::models::{
    WarrantyRow, WARRANTY_HEADERS, WARRANTY_ROW_SCHEMA_VERSION,
};
use crate::modules::media::ImageHost;
use crate::modules::sheets::{header_range, SheetStore};
use crate::shared::types::iso_timestamp;
use crate::shared::validation::Schema;

pub const SUCCESS_MESSAGE: &str = "Warranty registration submitted successfully";

/// Client message for sheet failures that map to no specific cause
pub const SUBMIT_FAILED_MESSAGE: &str =
    "Failed to submit warranty registration. Please try again later.";

/// Result of a completed registration
#[derive(Debug, Clone)]
pub struct RegistrationReceipt {
    pub summary: RegistrationSummaryDto,
    pub mock_mode: bool,
    pub message: String,
}

pub struct WarrantyService {
    image_host: Arc<dyn ImageHost>,
    sheet_store: Arc<dyn SheetStore>,
    range: String,
}

impl WarrantyService {
    pub fn new(
        image_host: Arc<dyn ImageHost>,
        sheet_store: Arc<dyn SheetStore>,
        range: impl Into<String>,
    ) -> Self {
        Self {
            image_host,
            sheet_store,
            range: range.into(),
        }
    }

    /// Run one registration end to end
    ///
    /// The image (if any) is checked and uploaded first, then the full record
    /// is validated, then a single row is appended. Nothing is appended unless
    /// every earlier step succeeded.
    pub async fn register(
        &self,
        fields: WarrantyFields,
        car_image: Option<CarImage>,
    ) -> Result<RegistrationReceipt> {
        let uploaded = match car_image.filter(|image| !image.data.is_empty()) {
            Some(image) => {
                validate_image_file(image.data.len(), &image.content_type)?;
                let uploaded = self
                    .image_host
                    .upload(image.data, &image.file_name, &image.content_type)
                    .await?;
                Some(uploaded)
            }
            None => None,
        };

        let submission =
            WarrantySubmission::from_form(fields, uploaded.as_ref().map(|u| u.url.clone()));
        submission.check().map_err(AppError::Validation)?;

        let submitted_at = Utc::now();
        let row = WarrantyRow::new(&submission, submitted_at);

        let outcome = match self.sheet_store.append_row(&self.range, row.into_values()).await {
            Ok(outcome) => outcome,
            Err(err) => {
                if let Some(ref image) = uploaded {
                    tracing::warn!(
                        "Orphaned image {} after failed append for roll code {}",
                        image.id,
                        submission.sigma_roll_code
                    );
                }
                return Err(err.into_app_error(SUBMIT_FAILED_MESSAGE));
            }
        };

        tracing::info!(
            "Warranty registered: roll_code={}, category={}, image={}, mock={}",
            submission.sigma_roll_code,
            submission.ppf_category,
            uploaded.is_some(),
            outcome.mock_mode
        );

        let message = if outcome.mock_mode {
            format!("{} (test mode)", SUCCESS_MESSAGE)
        } else {
            SUCCESS_MESSAGE.to_string()
        };

        Ok(RegistrationReceipt {
            summary: RegistrationSummaryDto {
                customer_name: submission.customer_name,
                email_address: submission.email_address,
                sigma_roll_code: submission.sigma_roll_code,
                ppf_category: submission.ppf_category,
                registration_date: iso_timestamp(&submitted_at),
            },
            mock_mode: outcome.mock_mode,
            message,
        })
    }

    /// Write the column titles to the first row of the warranty range
    pub async fn initialize_sheet(&self) -> Result<bool> {
        let range = header_range(&self.range, WARRANTY_HEADERS.len());
        tracing::info!(
            "Writing warranty header row (layout v{}) to {}",
            WARRANTY_ROW_SCHEMA_VERSION,
            range
        );
        self.sheet_store
            .write_header(&range, &WARRANTY_HEADERS)
            .await
            .map_err(|e| e.into_app_error("Failed to initialize warranty sheet headers"))
    }
}
