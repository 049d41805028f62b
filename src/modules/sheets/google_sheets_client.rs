//! Google Sheets API client (values:append / values:update)

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::token_manager::ServiceAccountTokenManager;
use super::{AppendOutcome, SheetError, SheetStore};
use crate::core::config::GoogleSheetsConfig;
use crate::core::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendResponse {
    updates: Option<AppendUpdates>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendUpdates {
    updated_range: Option<String>,
}

/// Google API error envelope
#[derive(Debug, Deserialize)]
struct GoogleErrorResponse {
    error: GoogleErrorBody,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    #[serde(default)]
    message: String,
}

pub struct GoogleSheetStore {
    sheet_id: String,
    api_base_url: String,
    token_manager: ServiceAccountTokenManager,
    http_client: Client,
}

impl GoogleSheetStore {
    pub fn new(config: GoogleSheetsConfig) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            token_manager: ServiceAccountTokenManager::new(&config, http_client.clone()),
            sheet_id: config.sheet_id,
            api_base_url: config.api_base_url,
            http_client,
        })
    }

    fn values_url(&self, range: &str) -> String {
        format!(
            "{}/spreadsheets/{}/values/{}",
            self.api_base_url,
            self.sheet_id,
            urlencoding::encode(range)
        )
    }

    /// Turn a non-success response into a mapped error
    async fn upstream_error(response: reqwest::Response) -> SheetError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<GoogleErrorResponse>(&body)
            .map(|e| e.error.message)
            .unwrap_or(body);
        SheetError::from_upstream(Some(status.as_u16()), &message)
    }
}

#[async_trait]
impl SheetStore for GoogleSheetStore {
    async fn append_row(&self, range: &str, row: Vec<String>) -> Result<AppendOutcome, SheetError> {
        let token = self.token_manager.get_access_token().await?;
        let url = format!(
            "{}:append?valueInputOption=USER_ENTERED&insertDataOption=INSERT_ROWS",
            self.values_url(range)
        );

        debug!("Appending row to {} ({} cells)", range, row.len());

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&token)
            .json(&json!({ "values": [row] }))
            .send()
            .await
            .map_err(|e| SheetError::Failed(format!("Sheets request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let updated_range = response
            .json::<AppendResponse>()
            .await
            .ok()
            .and_then(|r| r.updates)
            .and_then(|u| u.updated_range);

        info!(
            "Row appended to sheet {}: {}",
            self.sheet_id,
            updated_range.as_deref().unwrap_or(range)
        );

        Ok(AppendOutcome {
            mock_mode: false,
            updated_range,
        })
    }

    async fn write_header(&self, range: &str, headers: &[&str]) -> Result<bool, SheetError> {
        let token = self.token_manager.get_access_token().await?;
        let url = format!("{}?valueInputOption=RAW", self.values_url(range));

        let response = self
            .http_client
            .put(&url)
            .bearer_auth(&token)
            .json(&json!({ "values": [headers] }))
            .send()
            .await
            .map_err(|e| SheetError::Failed(format!("Sheets request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        info!("Header row written to {}", range);
        Ok(true)
    }

    fn is_mock(&self) -> bool {
        false
    }
}
