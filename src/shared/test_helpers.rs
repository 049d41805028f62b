use async_trait::async_trait;
use axum::Router;
use axum_test::TestServer;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::config::SheetRanges;
use crate::features::contact::{self, ContactService};
use crate::features::contact::dtos::ContactQueryDto;
use crate::features::warranty::dtos::WarrantyFields;
use crate::features::warranty::{self, WarrantyService};
use crate::modules::media::{ImageHost, UploadError, UploadedImage};
use crate::modules::sheets::{AppendOutcome, SheetError, SheetStore};

/// Body limit used by test routers
pub const TEST_MAX_BODY_SIZE: usize = 11 * 1024 * 1024;

pub fn valid_warranty_fields() -> WarrantyFields {
    WarrantyFields {
        customer_name: "Jane Doe".to_string(),
        phone_number: "+919876543210".to_string(),
        email_address: "jane@example.com".to_string(),
        sigma_roll_code: "SGM12345".to_string(),
        ppf_category: "Ultra Clear PPF".to_string(),
        detailer_name: "AutoShine Studio".to_string(),
        detailer_mobile: "9876500000".to_string(),
        location: "Hyderabad".to_string(),
        message: None,
    }
}

/// Warranty fields with a generated customer name and email
pub fn fake_warranty_fields() -> WarrantyFields {
    WarrantyFields {
        customer_name: Name().fake(),
        email_address: SafeEmail().fake(),
        ..valid_warranty_fields()
    }
}

pub fn valid_contact_query() -> ContactQueryDto {
    ContactQueryDto {
        name: Name().fake(),
        phone: "+91 98765-43210".to_string(),
        query: "Looking for a full-body PPF quote for a 2024 sedan.".to_string(),
    }
}

/// In-memory image host that records uploads and can be told to fail
#[derive(Default)]
pub struct RecordingImageHost {
    calls: AtomicUsize,
    uploads: Mutex<Vec<(String, String, usize)>>,
    /// Upstream message to fail every upload with
    failure: Option<String>,
}

impl RecordingImageHost {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(upstream_message: &str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some(upstream_message.to_string()),
            ..Default::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (file name, content type, size) per upload
    pub fn uploads(&self) -> Vec<(String, String, usize)> {
        self.uploads.lock().expect("uploads lock").clone()
    }
}

#[async_trait]
impl ImageHost for RecordingImageHost {
    async fn upload(
        &self,
        data: Vec<u8>,
        file_name: &str,
        content_type: &str,
    ) -> Result<UploadedImage, UploadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(ref message) = self.failure {
            return Err(UploadError::from_upstream(None, message));
        }

        self.uploads.lock().expect("uploads lock").push((
            file_name.to_string(),
            content_type.to_string(),
            data.len(),
        ));

        Ok(UploadedImage {
            url: format!(
                "https://res.cloudinary.com/test/image/upload/sigmappf-warranty/{}",
                urlencoding::encode(file_name)
            ),
            id: "sigmappf-warranty/warranty-test".to_string(),
            mock_mode: false,
        })
    }

    fn is_mock(&self) -> bool {
        false
    }
}

/// In-memory sheet store that records appended rows and can be told to fail
#[derive(Default)]
pub struct RecordingSheetStore {
    calls: AtomicUsize,
    rows: Mutex<Vec<(String, Vec<String>)>>,
    headers: Mutex<Vec<(String, Vec<String>)>>,
    /// Status and upstream message to fail every call with
    failure: Option<(Option<u16>, String)>,
}

impl RecordingSheetStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing(status: Option<u16>, upstream_message: &str) -> Arc<Self> {
        Arc::new(Self {
            failure: Some((status, upstream_message.to_string())),
            ..Default::default()
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// (range, cells) per successful append
    pub fn rows(&self) -> Vec<(String, Vec<String>)> {
        self.rows.lock().expect("rows lock").clone()
    }

    pub fn headers(&self) -> Vec<(String, Vec<String>)> {
        self.headers.lock().expect("headers lock").clone()
    }

    fn fail(&self) -> Option<SheetError> {
        self.failure
            .as_ref()
            .map(|(status, message)| SheetError::from_upstream(*status, message))
    }
}

#[async_trait]
impl SheetStore for RecordingSheetStore {
    async fn append_row(&self, range: &str, row: Vec<String>) -> Result<AppendOutcome, SheetError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fail() {
            return Err(err);
        }

        self.rows
            .lock()
            .expect("rows lock")
            .push((range.to_string(), row));

        Ok(AppendOutcome {
            mock_mode: false,
            updated_range: Some(range.to_string()),
        })
    }

    async fn write_header(&self, range: &str, headers: &[&str]) -> Result<bool, SheetError> {
        if let Some(err) = self.fail() {
            return Err(err);
        }

        self.headers.lock().expect("headers lock").push((
            range.to_string(),
            headers.iter().map(|h| h.to_string()).collect(),
        ));
        Ok(true)
    }

    fn is_mock(&self) -> bool {
        false
    }
}

/// Submission routes wired to the given adapters, with default sheet ranges
pub fn test_router(image_host: Arc<dyn ImageHost>, sheet_store: Arc<dyn SheetStore>) -> Router {
    let ranges = SheetRanges::default();
    let warranty_service = Arc::new(WarrantyService::new(
        image_host,
        sheet_store.clone(),
        ranges.warranty,
    ));
    let contact_service = Arc::new(ContactService::new(sheet_store, ranges.contact));

    Router::new()
        .merge(warranty::routes::routes(warranty_service, TEST_MAX_BODY_SIZE))
        .merge(contact::routes::routes(contact_service))
}

pub fn test_server(image_host: Arc<dyn ImageHost>, sheet_store: Arc<dyn SheetStore>) -> TestServer {
    TestServer::new(test_router(image_host, sheet_store)).expect("Failed to create test server")
}
