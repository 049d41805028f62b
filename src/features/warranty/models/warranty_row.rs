//! Positional row layout of the warranty spreadsheet.
//!
//! Columns are addressed by position, not by header text. Existing columns must
//! never be reordered; new columns go after `Status` and bump the version.

use chrono::{DateTime, Utc};

use crate::features::warranty::dtos::WarrantySubmission;
use crate::shared::types::iso_timestamp;

/// Bumped whenever a column is appended to the row layout
pub const WARRANTY_ROW_SCHEMA_VERSION: u32 = 1;

/// Status written for every new registration
pub const INITIAL_STATUS: &str = "Pending";

/// Column titles, in row order
pub const WARRANTY_HEADERS: [&str; 12] = [
    "Timestamp",
    "Customer Name",
    "Phone",
    "Email",
    "Roll Code",
    "Category",
    "Image URL",
    "Detailer",
    "Detailer Phone",
    "Location",
    "Message",
    "Status",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarrantyRow {
    pub timestamp: String,
    pub customer_name: String,
    pub phone: String,
    pub email: String,
    pub roll_code: String,
    pub category: String,
    pub image_url: String,
    pub detailer_name: String,
    pub detailer_phone: String,
    pub location: String,
    pub message: String,
    pub status: String,
}

impl WarrantyRow {
    pub fn new(submission: &WarrantySubmission, submitted_at: DateTime<Utc>) -> Self {
        Self {
            timestamp: iso_timestamp(&submitted_at),
            customer_name: submission.customer_name.clone(),
            phone: submission.phone_number.clone(),
            email: submission.email_address.clone(),
            roll_code: submission.sigma_roll_code.clone(),
            category: submission.ppf_category.clone(),
            image_url: submission.image_url_or_empty().to_string(),
            detailer_name: submission.detailer_name.clone(),
            detailer_phone: submission.detailer_mobile.clone(),
            location: submission.location.clone(),
            message: submission.message_or_empty().to_string(),
            status: INITIAL_STATUS.to_string(),
        }
    }

    /// Cell values in column order (A through L)
    pub fn into_values(self) -> Vec<String> {
        vec![
            self.timestamp,
            self.customer_name,
            self.phone,
            self.email,
            self.roll_code,
            self.category,
            self.image_url,
            self.detailer_name,
            self.detailer_phone,
            self.location,
            self.message,
            self.status,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::valid_warranty_fields;
    use chrono::TimeZone;

    #[test]
    fn test_row_column_order() {
        let submission = WarrantySubmission::from_form(
            valid_warranty_fields(),
            Some("https://res.cloudinary.com/demo/image/upload/warranty-1.jpg".to_string()),
        );
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 10, 15, 0).unwrap();

        let values = WarrantyRow::new(&submission, at).into_values();

        assert_eq!(values.len(), WARRANTY_HEADERS.len());
        assert_eq!(values[0], "2026-03-01T10:15:00.000Z");
        assert_eq!(values[1], "Jane Doe");
        assert_eq!(values[2], "+919876543210");
        assert_eq!(values[3], "jane@example.com");
        assert_eq!(values[4], "SGM12345");
        assert_eq!(values[5], "Ultra Clear PPF");
        assert_eq!(
            values[6],
            "https://res.cloudinary.com/demo/image/upload/warranty-1.jpg"
        );
        assert_eq!(values[7], "AutoShine Studio");
        assert_eq!(values[8], "9876500000");
        assert_eq!(values[9], "Hyderabad");
        assert_eq!(values[10], "");
        assert_eq!(values[11], "Pending");
    }

    #[test]
    fn test_row_without_image_has_empty_url() {
        let submission = WarrantySubmission::from_form(valid_warranty_fields(), None);
        let row = WarrantyRow::new(&submission, Utc::now());
        assert_eq!(row.image_url, "");
        assert_eq!(row.status, INITIAL_STATUS);
    }
}
