use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::core::config::GoogleSheetsConfig;

/// OAuth scope for reading and writing spreadsheets
pub const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Lifetime requested for each signed assertion
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Claims of the JWT-bearer assertion sent to the token endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Response from Google's token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    #[serde(rename = "token_type")]
    pub _token_type: String,
}

/// Cached token with expiration tracking
struct TokenCache {
    token: TokenResponse,
    fetched_at: Instant,
}

/// Exchanges service-account assertions for access tokens and caches them
pub struct ServiceAccountTokenManager {
    service_account_email: String,
    token_url: String,
    encoding_key: Result<EncodingKey, String>,
    client: reqwest::Client,
    cache: Arc<RwLock<Option<TokenCache>>>,
    /// Refresh token this many seconds before expiration
    refresh_margin: Duration,
}

impl ServiceAccountTokenManager {
    pub fn new(config: &GoogleSheetsConfig, client: reqwest::Client) -> Self {
        // A malformed key is reported on first use so the server still starts
        let encoding_key =
            EncodingKey::from_rsa_pem(config.private_key.as_bytes()).map_err(|e| e.to_string());
        if let Err(ref e) = encoding_key {
            tracing::warn!("Google private key could not be parsed: {}", e);
        }

        Self {
            service_account_email: config.service_account_email.clone(),
            token_url: config.token_url.clone(),
            encoding_key,
            client,
            cache: Arc::new(RwLock::new(None)),
            refresh_margin: Duration::from_secs(60),
        }
    }

    /// Get a valid access token, fetching a new one if necessary
    pub async fn get_access_token(&self) -> Result<String, TokenError> {
        {
            let cache = self.cache.read().await;
            if let Some(ref cached) = *cache {
                let elapsed = cached.fetched_at.elapsed();
                let expires_in = Duration::from_secs(cached.token.expires_in);

                if elapsed + self.refresh_margin < expires_in {
                    tracing::debug!(
                        "Using cached Google access token (expires in {} seconds)",
                        (expires_in - elapsed).as_secs()
                    );
                    return Ok(cached.token.access_token.clone());
                }
            }
        }

        self.fetch_token().await
    }

    /// Build and sign the RS256 assertion for the token endpoint
    pub fn signed_assertion(&self, issued_at: i64) -> Result<String, TokenError> {
        let key = self
            .encoding_key
            .as_ref()
            .map_err(|e| TokenError::InvalidKey(e.clone()))?;

        let claims = AssertionClaims {
            iss: self.service_account_email.clone(),
            scope: SHEETS_SCOPE.to_string(),
            aud: self.token_url.clone(),
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        };

        encode(&Header::new(Algorithm::RS256), &claims, key)
            .map_err(|e| TokenError::InvalidKey(e.to_string()))
    }

    async fn fetch_token(&self) -> Result<String, TokenError> {
        tracing::debug!("Fetching new Google access token from {}", self.token_url);

        let assertion = self.signed_assertion(Utc::now().timestamp())?;

        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| TokenError::FetchError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(TokenError::FetchError(format!(
                "Token request failed: HTTP {} - {}",
                status, body
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| TokenError::ParseError(e.to_string()))?;

        tracing::info!(
            "Fetched new Google access token, expires in {} seconds",
            token_response.expires_in
        );

        let access_token = token_response.access_token.clone();
        let mut cache = self.cache.write().await;
        *cache = Some(TokenCache {
            token: token_response,
            fetched_at: Instant::now(),
        });

        Ok(access_token)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Invalid service account key: {0}")]
    InvalidKey(String),

    #[error("Failed to fetch token: {0}")]
    FetchError(String),

    #[error("Failed to parse token response: {0}")]
    ParseError(String),
}
