use async_trait::async_trait;
use tracing::info;

use super::{AppendOutcome, SheetError, SheetStore};

/// Stand-in used when Google Sheets is not configured; rows are only logged
pub struct StubSheetStore;

#[async_trait]
impl SheetStore for StubSheetStore {
    async fn append_row(&self, range: &str, row: Vec<String>) -> Result<AppendOutcome, SheetError> {
        info!(
            "Mock append (Google Sheets not configured): range={}, row={:?}",
            range, row
        );

        Ok(AppendOutcome {
            mock_mode: true,
            updated_range: None,
        })
    }

    async fn write_header(&self, range: &str, _headers: &[&str]) -> Result<bool, SheetError> {
        info!(
            "Google Sheets not configured. Skipping header initialization for {}",
            range
        );
        Ok(false)
    }

    fn is_mock(&self) -> bool {
        true
    }
}
