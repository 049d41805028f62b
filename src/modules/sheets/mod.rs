//! Spreadsheet persistence for submissions
//!
//! `SheetStore` appends one row per submission. The live implementation talks
//! to the Google Sheets API with a service account; the stub only logs.

mod google_sheets_client;
mod stub;
mod token_manager;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::core::config::GoogleSheetsConfig;
use crate::core::error::AppError;

pub use google_sheets_client::GoogleSheetStore;
pub use stub::StubSheetStore;
pub use token_manager::TokenError;

/// Outcome of an append
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    pub mock_mode: bool,
    /// Range the row landed in, when the service reports it
    pub updated_range: Option<String>,
}

/// Append failures; the Display text is what the client sees except for `Failed`,
/// whose client text depends on the flow
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("Google authentication failed. Please check service account credentials.")]
    Authentication(String),

    #[error("Google Sheet not found. Please check the sheet ID.")]
    NotFound(String),

    #[error("Permission denied. Please share the sheet with the service account.")]
    PermissionDenied(String),

    #[error("Spreadsheet request failed: {0}")]
    Failed(String),
}

impl SheetError {
    /// Map an upstream error message (and HTTP status when known) to a failure kind
    pub fn from_upstream(status: Option<u16>, message: &str) -> Self {
        let detail = message.to_string();
        let lower = message.to_lowercase();
        if lower.contains("invalid_grant") || status == Some(401) {
            SheetError::Authentication(detail)
        } else if lower.contains("not found") || status == Some(404) {
            SheetError::NotFound(detail)
        } else if lower.contains("permission") || status == Some(403) {
            SheetError::PermissionDenied(detail)
        } else {
            SheetError::Failed(detail)
        }
    }

    /// Convert into a client-facing error; `fallback` replaces unrecognised failures
    pub fn into_app_error(self, fallback: &str) -> AppError {
        match self {
            SheetError::Failed(detail) => {
                tracing::error!("Spreadsheet append failed: {}", detail);
                AppError::Upstream(fallback.to_string())
            }
            SheetError::Authentication(ref detail)
            | SheetError::NotFound(ref detail)
            | SheetError::PermissionDenied(ref detail) => {
                tracing::error!("Spreadsheet append failed: {}", detail);
                AppError::Upstream(self.to_string())
            }
        }
    }
}

impl From<TokenError> for SheetError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::InvalidKey(detail) => SheetError::Authentication(detail),
            TokenError::FetchError(detail) => SheetError::from_upstream(None, &detail),
            TokenError::ParseError(detail) => SheetError::Failed(detail),
        }
    }
}

#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Append one row to `range`; a single attempt, no retry
    async fn append_row(&self, range: &str, row: Vec<String>) -> Result<AppendOutcome, SheetError>;

    /// Overwrite `range` with one row of column titles; `Ok(false)` when skipped
    async fn write_header(&self, range: &str, headers: &[&str]) -> Result<bool, SheetError>;

    fn is_mock(&self) -> bool;
}

/// Pick the live store when credentials are configured, the stub otherwise
pub fn create_sheet_store(
    config: Option<GoogleSheetsConfig>,
) -> Result<Arc<dyn SheetStore>, AppError> {
    match config {
        Some(config) => {
            info!(
                "Google Sheets store enabled for sheet '{}' as {}",
                config.sheet_id, config.service_account_email
            );
            Ok(Arc::new(GoogleSheetStore::new(config)?))
        }
        None => {
            info!("Google Sheets not configured. Submissions run in mock mode.");
            Ok(Arc::new(StubSheetStore))
        }
    }
}

/// Header range for the sheet a data range points at: `Sheet1!A:L` -> `Sheet1!A1:L1`
pub fn header_range(range: &str, columns: usize) -> String {
    let sheet = range.split_once('!').map(|(s, _)| s).unwrap_or(range);
    format!("{}!A1:{}1", sheet, column_letter(columns))
}

/// 1 -> A, 12 -> L, 27 -> AA
fn column_letter(mut index: usize) -> String {
    let mut letters = Vec::new();
    while index > 0 {
        let rem = (index - 1) % 26;
        letters.push((b'A' + rem as u8) as char);
        index = (index - 1) / 26;
    }
    letters.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_error_mapping() {
        assert!(matches!(
            SheetError::from_upstream(Some(400), r#"{"error":"invalid_grant"}"#),
            SheetError::Authentication(_)
        ));
        assert!(matches!(
            SheetError::from_upstream(Some(404), "Requested entity was not found."),
            SheetError::NotFound(_)
        ));
        assert!(matches!(
            SheetError::from_upstream(Some(403), "The caller does not have permission"),
            SheetError::PermissionDenied(_)
        ));
        assert!(matches!(
            SheetError::from_upstream(Some(503), "Backend Error"),
            SheetError::Failed(_)
        ));
    }

    #[test]
    fn test_unrecognised_failure_uses_fallback() {
        let err = SheetError::from_upstream(Some(500), "quota shard 12 exhausted");
        match err.into_app_error("Failed to submit warranty registration. Please try again later.") {
            AppError::Upstream(msg) => assert_eq!(
                msg,
                "Failed to submit warranty registration. Please try again later."
            ),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_known_failure_keeps_mapped_message() {
        let err = SheetError::from_upstream(Some(403), "The caller does not have permission");
        match err.into_app_error("fallback") {
            AppError::Upstream(msg) => assert_eq!(
                msg,
                "Permission denied. Please share the sheet with the service account."
            ),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_key_is_authentication_failure() {
        let err: SheetError = TokenError::InvalidKey("bad pem".to_string()).into();
        assert!(matches!(err, SheetError::Authentication(_)));
    }

    #[test]
    fn test_header_range() {
        assert_eq!(header_range("Sheet1!A:L", 12), "Sheet1!A1:L1");
        assert_eq!(header_range("Contacts!A:E", 5), "Contacts!A1:E1");
        assert_eq!(header_range("Sheet1", 27), "Sheet1!A1:AA1");
    }

    #[test]
    fn test_factory_selects_stub_without_credentials() {
        let store = create_sheet_store(None).expect("stub store");
        assert!(store.is_mock());
    }
}
