//! Media hosting for warranty car images
//!
//! `ImageHost` has a live Cloudinary implementation and a stub used when no
//! Cloudinary credentials are configured. The choice is made once at startup.

mod cloudinary_client;
mod stub;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::core::config::CloudinaryConfig;
use crate::core::error::AppError;

pub use cloudinary_client::CloudinaryImageHost;
pub use stub::StubImageHost;

/// Folder (and URL segment) that groups warranty images
pub const WARRANTY_IMAGE_FOLDER: &str = "sigmappf-warranty";

/// Result of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Absolute URL of the hosted image
    pub url: String,
    /// Host-side identifier (Cloudinary public id)
    pub id: String,
    pub mock_mode: bool,
}

/// Upload failures; the Display text is what the client sees
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Cloudinary authentication failed. Please check API credentials.")]
    Authentication(String),

    #[error("Image file is too large. Please upload a smaller image.")]
    FileTooLarge(String),

    #[error("Invalid image format. Please upload a JPEG, PNG, or WebP image.")]
    InvalidFormat(String),

    #[error("Failed to upload image. Please try again later.")]
    Failed(String),
}

impl UploadError {
    /// Map an upstream error message (and HTTP status when known) to a failure kind
    pub fn from_upstream(status: Option<u16>, message: &str) -> Self {
        let detail = message.to_string();
        if message.contains("Invalid API Key") || status == Some(401) {
            UploadError::Authentication(detail)
        } else if message.contains("File size too large") {
            UploadError::FileTooLarge(detail)
        } else if message.contains("Invalid image file") {
            UploadError::InvalidFormat(detail)
        } else {
            UploadError::Failed(detail)
        }
    }

    /// Upstream detail, for server-side logs only
    pub fn detail(&self) -> &str {
        match self {
            UploadError::Authentication(d)
            | UploadError::FileTooLarge(d)
            | UploadError::InvalidFormat(d)
            | UploadError::Failed(d) => d,
        }
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        tracing::error!("Image upload failed: {}", err.detail());
        AppError::Upstream(err.to_string())
    }
}

#[async_trait]
pub trait ImageHost: Send + Sync {
    /// Upload one image; a single attempt, no retry
    async fn upload(
        &self,
        data: Vec<u8>,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadedImage, UploadError>;

    fn is_mock(&self) -> bool;
}

/// Pick the live host when credentials are configured, the stub otherwise
pub fn create_image_host(config: Option<CloudinaryConfig>) -> Result<Arc<dyn ImageHost>, AppError> {
    match config {
        Some(config) => {
            info!(
                "Cloudinary image host enabled for cloud '{}'",
                config.cloud_name
            );
            Ok(Arc::new(CloudinaryImageHost::new(config)?))
        }
        None => {
            info!("Cloudinary not configured. Image uploads run in mock mode.");
            Ok(Arc::new(StubImageHost::new(WARRANTY_IMAGE_FOLDER)))
        }
    }
}
