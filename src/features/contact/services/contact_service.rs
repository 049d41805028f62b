//! Contact Service - validates inquiries and appends them to the contact tab

use chrono::Utc;
use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::contact::dtos::{ContactQueryDto, ContactReceiptDto};
use crate::features::contact::models::{ContactRow, CONTACT_HEADERS};
use crate::modules::sheets::{header_range, SheetStore};
use crate::shared::types::iso_timestamp;
use crate::shared::validation::Schema;

pub const CONTACT_SUCCESS_MESSAGE: &str = "Thank you! We will get back to you shortly.";

pub const CONTACT_FAILED_MESSAGE: &str = "Failed to submit your query. Please try again later.";

/// Result of a recorded inquiry
#[derive(Debug, Clone)]
pub struct ContactOutcome {
    pub receipt: ContactReceiptDto,
    pub mock_mode: bool,
}

pub struct ContactService {
    sheet_store: Arc<dyn SheetStore>,
    range: String,
}

impl ContactService {
    pub fn new(sheet_store: Arc<dyn SheetStore>, range: impl Into<String>) -> Self {
        Self {
            sheet_store,
            range: range.into(),
        }
    }

    pub async fn submit(&self, dto: ContactQueryDto) -> Result<ContactOutcome> {
        dto.check().map_err(AppError::Validation)?;

        let submitted_at = Utc::now();
        let row = ContactRow::new(&dto, submitted_at);

        let outcome = self
            .sheet_store
            .append_row(&self.range, row.into_values())
            .await
            .map_err(|e| e.into_app_error(CONTACT_FAILED_MESSAGE))?;

        tracing::info!("Contact inquiry recorded (mock={})", outcome.mock_mode);

        Ok(ContactOutcome {
            receipt: ContactReceiptDto {
                name: dto.name,
                submitted_at: iso_timestamp(&submitted_at),
            },
            mock_mode: outcome.mock_mode,
        })
    }

    /// Write the column titles to the first row of the contact range
    pub async fn initialize_sheet(&self) -> Result<bool> {
        let range = header_range(&self.range, CONTACT_HEADERS.len());
        self.sheet_store
            .write_header(&range, &CONTACT_HEADERS)
            .await
            .map_err(|e| e.into_app_error("Failed to initialize contact sheet headers"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{valid_contact_query, RecordingSheetStore};

    #[tokio::test]
    async fn test_submit_appends_contact_row() {
        let sheet = RecordingSheetStore::new();
        let service = ContactService::new(sheet.clone(), "Contacts!A:E");
        let dto = valid_contact_query();

        let outcome = service.submit(dto.clone()).await.expect("contact");

        let rows = sheet.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0, "Contacts!A:E");
        assert_eq!(&rows[0].1[1..], &[dto.name.clone(), dto.phone, dto.query, "New".to_string()]);
        assert_eq!(outcome.receipt.name, dto.name);
        assert!(!outcome.mock_mode);
    }

    #[tokio::test]
    async fn test_invalid_query_is_not_appended() {
        let sheet = RecordingSheetStore::new();
        let service = ContactService::new(sheet.clone(), "Contacts!A:E");
        let dto = ContactQueryDto {
            phone: "call me".to_string(),
            ..valid_contact_query()
        };

        assert!(matches!(
            service.submit(dto).await,
            Err(AppError::Validation(_))
        ));
        assert_eq!(sheet.calls(), 0);
    }

    #[tokio::test]
    async fn test_initialize_sheet_targets_contact_tab() {
        let sheet = RecordingSheetStore::new();
        let service = ContactService::new(sheet.clone(), "Contacts!A:E");

        assert!(service.initialize_sheet().await.expect("headers"));
        assert_eq!(sheet.headers()[0].0, "Contacts!A1:E1");
    }
}
