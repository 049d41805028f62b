use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use super::{ImageHost, UploadError, UploadedImage};

/// Stand-in used when Cloudinary is not configured; nothing leaves the process
pub struct StubImageHost {
    folder: String,
}

impl StubImageHost {
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    /// Placeholder URL for a file uploaded at `millis`
    pub fn placeholder_url(&self, millis: i64, file_name: &str) -> String {
        format!(
            "https://placeholder.com/{}/{}-{}",
            self.folder,
            millis,
            urlencoding::encode(file_name)
        )
    }
}

#[async_trait]
impl ImageHost for StubImageHost {
    async fn upload(
        &self,
        data: Vec<u8>,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadedImage, UploadError> {
        let millis = Utc::now().timestamp_millis();

        info!(
            "Mock upload (Cloudinary not configured): name={}, size={}, type={}",
            file_name,
            data.len(),
            content_type
        );

        Ok(UploadedImage {
            url: self.placeholder_url(millis, file_name),
            id: format!("{}/mock-{}", self.folder, millis),
            mock_mode: true,
        })
    }

    fn is_mock(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::media::WARRANTY_IMAGE_FOLDER;

    #[tokio::test]
    async fn test_stub_upload_returns_placeholder() {
        let host = StubImageHost::new(WARRANTY_IMAGE_FOLDER);

        let uploaded = host
            .upload(vec![0xFF, 0xD8, 0xFF], "front.jpg", "image/jpeg")
            .await
            .expect("stub upload");

        assert!(uploaded.mock_mode);
        assert!(uploaded
            .url
            .starts_with("https://placeholder.com/sigmappf-warranty/"));
        assert!(uploaded.url.ends_with("-front.jpg"));
        assert!(uploaded.id.starts_with("sigmappf-warranty/mock-"));
    }

    #[test]
    fn test_placeholder_url_encodes_file_name() {
        let host = StubImageHost::new("sigmappf-warranty");
        assert_eq!(
            host.placeholder_url(1700000000000, "my car.png"),
            "https://placeholder.com/sigmappf-warranty/1700000000000-my%20car.png"
        );
    }
}
