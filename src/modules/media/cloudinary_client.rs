//! Cloudinary signed-upload client
//!
//! Uploads go to `{api_base_url}/{cloud_name}/image/upload` as a form post
//! carrying the image as a base64 data URI. Requests are signed over the
//! sorted parameters plus the API secret, with SHA-1 unless the product
//! environment is configured for SHA-256.

use async_trait::async_trait;
use base64::prelude::*;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::{ImageHost, UploadError, UploadedImage};
use crate::core::config::{CloudinaryConfig, SignatureAlgorithm};
use crate::core::error::AppError;

/// Incoming transformation: good automatic quality, automatic format, fit within 1920x1080
pub const UPLOAD_TRANSFORMATION: &str = "q_auto:good/f_auto/c_limit,h_1080,w_1920";

/// Tags attached to every warranty image
pub const UPLOAD_TAGS: &str = "warranty,car-image";

#[derive(Debug, Deserialize)]
struct CloudinaryUploadResponse {
    secure_url: String,
    public_id: String,
}

#[derive(Debug, Deserialize)]
struct CloudinaryErrorResponse {
    error: CloudinaryErrorBody,
}

#[derive(Debug, Deserialize)]
struct CloudinaryErrorBody {
    message: String,
}

pub struct CloudinaryImageHost {
    config: CloudinaryConfig,
    http_client: Client,
}

impl CloudinaryImageHost {
    pub fn new(config: CloudinaryConfig) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/{}/image/upload",
            self.config.api_base_url, self.config.cloud_name
        )
    }

    /// Parameters covered by the signature
    fn signed_params(&self, timestamp: i64, public_id: &str) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("folder", self.config.upload_folder.clone()),
            ("public_id", public_id.to_string()),
            ("tags", UPLOAD_TAGS.to_string()),
            ("timestamp", timestamp.to_string()),
            ("transformation", UPLOAD_TRANSFORMATION.to_string()),
        ])
    }

    /// Hex digest of `k1=v1&k2=v2...` (keys sorted) followed by the API secret
    pub fn sign(
        params: &BTreeMap<&'static str, String>,
        api_secret: &str,
        algorithm: SignatureAlgorithm,
    ) -> String {
        let to_sign = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        match algorithm {
            SignatureAlgorithm::Sha1 => hex_digest::<Sha1>(&to_sign, api_secret),
            SignatureAlgorithm::Sha256 => hex_digest::<Sha256>(&to_sign, api_secret),
        }
    }
}

fn hex_digest<D: Digest>(to_sign: &str, api_secret: &str) -> String {
    let mut hasher = D::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}

#[async_trait]
impl ImageHost for CloudinaryImageHost {
    async fn upload(
        &self,
        data: Vec<u8>,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadedImage, UploadError> {
        let now = Utc::now();
        let public_id = format!("warranty-{}", now.timestamp_millis());
        let params = self.signed_params(now.timestamp(), &public_id);
        let signature = Self::sign(
            &params,
            &self.config.api_secret,
            self.config.signature_algorithm,
        );

        let data_uri = format!(
            "data:{};base64,{}",
            content_type,
            BASE64_STANDARD.encode(&data)
        );

        let mut form: Vec<(&str, String)> = params.into_iter().collect();
        form.push(("api_key", self.config.api_key.clone()));
        form.push(("signature", signature));
        form.push(("file", data_uri));

        debug!(
            "Uploading '{}' ({} bytes, {}) to Cloudinary as {}",
            file_name,
            data.len(),
            content_type,
            public_id
        );

        let response = self
            .http_client
            .post(self.upload_url())
            .form(&form)
            .send()
            .await
            .map_err(|e| UploadError::Failed(format!("Cloudinary request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<CloudinaryErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(UploadError::from_upstream(Some(status.as_u16()), &message));
        }

        let uploaded: CloudinaryUploadResponse = response.json().await.map_err(|e| {
            UploadError::Failed(format!("Failed to parse Cloudinary response: {}", e))
        })?;

        info!("Image uploaded to Cloudinary: {}", uploaded.public_id);

        Ok(UploadedImage {
            url: uploaded.secure_url,
            id: uploaded.public_id,
            mock_mode: false,
        })
    }

    fn is_mock(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host() -> CloudinaryImageHost {
        let config = CloudinaryConfig::from_parts(
            Some("demo".to_string()),
            Some("123456".to_string()),
            Some("abcd".to_string()),
        )
        .expect("config");
        CloudinaryImageHost::new(config).expect("host")
    }

    #[test]
    fn test_sign_known_vector() {
        let params = BTreeMap::from([
            ("timestamp", "1315060510".to_string()),
            ("public_id", "sample".to_string()),
        ]);
        assert_eq!(
            CloudinaryImageHost::sign(&params, "abcd", SignatureAlgorithm::Sha1),
            "c3470533147774275dd37996cc4d0e68fd03cd4f"
        );
        assert_eq!(
            CloudinaryImageHost::sign(&params, "abcd", SignatureAlgorithm::Sha256),
            "0d4fe14b2b4a3f68a97ccc5097c43908b623d24293c296826a9390c14d891509"
        );
    }

    #[test]
    fn test_signed_params_cover_upload_options() {
        let host = host();
        let params = host.signed_params(1700000000, "warranty-1700000000000");

        assert_eq!(
            params.keys().copied().collect::<Vec<_>>(),
            vec!["folder", "public_id", "tags", "timestamp", "transformation"]
        );
        assert_eq!(
            CloudinaryImageHost::sign(&params, "abcd", host.config.signature_algorithm),
            "1eb2f6c1636edb597c832f6af21dc869212e4fef"
        );
        assert_eq!(
            CloudinaryImageHost::sign(&params, "abcd", SignatureAlgorithm::Sha256),
            "f3afbea6f43362cc685875eace141f6bc6c9225212eb5674b7e9c8d6916e91ea"
        );
    }

    #[test]
    fn test_upload_url() {
        assert_eq!(
            host().upload_url(),
            "https://api.cloudinary.com/v1_1/demo/image/upload"
        );
    }

    #[test]
    fn test_error_body_parsing() {
        let body = r#"{"error":{"message":"Invalid API Key 123456"}}"#;
        let parsed: CloudinaryErrorResponse = serde_json::from_str(body).expect("error body");
        assert!(matches!(
            UploadError::from_upstream(Some(401), &parsed.error.message),
            UploadError::Authentication(_)
        ));
    }
}
