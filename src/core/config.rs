use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub swagger: SwaggerConfig,
    /// `None` when any Cloudinary credential is missing (uploads run in mock mode)
    pub cloudinary: Option<CloudinaryConfig>,
    /// `None` when any Google credential is missing (appends run in mock mode)
    pub google_sheets: Option<GoogleSheetsConfig>,
    pub sheet_ranges: SheetRanges,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

/// Cloudinary credentials for the signed upload API
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Folder that receives warranty car images
    pub upload_folder: String,
    /// Base URL of the Cloudinary API (overridable for tests)
    pub api_base_url: String,
    pub signature_algorithm: SignatureAlgorithm,
}

/// Digest used for Cloudinary request signatures, as set on the product environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

impl std::str::FromStr for SignatureAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha1" => Ok(SignatureAlgorithm::Sha1),
            "sha256" => Ok(SignatureAlgorithm::Sha256),
            other => Err(format!(
                "CLOUDINARY_SIGNATURE_ALGORITHM must be sha1 or sha256, got '{}'",
                other
            )),
        }
    }
}

/// Google service-account credentials for the Sheets API
#[derive(Debug, Clone)]
pub struct GoogleSheetsConfig {
    pub service_account_email: String,
    /// PEM private key with real newlines (escaped `\n` already restored)
    pub private_key: String,
    pub sheet_id: String,
    /// Write the column titles into the header row at startup
    pub init_headers: bool,
    pub token_url: String,
    pub api_base_url: String,
}

/// Target ranges for appended rows
#[derive(Debug, Clone)]
pub struct SheetRanges {
    pub warranty: String,
    pub contact: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if exists, ignore if not found (optional for production)
        if let Err(e) = dotenvy::dotenv() {
            if !e.to_string().contains("not found") {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            swagger: SwaggerConfig::from_env()?,
            cloudinary: CloudinaryConfig::from_env()?,
            google_sheets: GoogleSheetsConfig::from_env()?,
            sheet_ranges: SheetRanges::from_env(),
        })
    }
}

/// Read an env var, treating blank values as absent
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.trim().is_empty())
}

impl AppConfig {
    // Image limit (10MB) plus headroom for the other multipart fields
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 11 * 1024 * 1024;

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid PORT: {}", e))?;

        // Parse CORS allowed origins from comma-separated string
        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_request_body_size = env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| Self::DEFAULT_MAX_REQUEST_BODY_SIZE.to_string())
            .parse::<usize>()
            .map_err(|_| "MAX_REQUEST_BODY_SIZE must be a valid number".to_string())?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Result<Self, String> {
        let username = non_empty_var("SWAGGER_USERNAME");
        let password = non_empty_var("SWAGGER_PASSWORD");
        let title = env::var("SWAGGER_TITLE").unwrap_or_else(|_| "Sigma PPF API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "Warranty registration and contact inquiries for Sigma PPF".to_string()
        });

        Ok(Self {
            username,
            password,
            title,
            version,
            description,
        })
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

impl CloudinaryConfig {
    const DEFAULT_UPLOAD_FOLDER: &'static str = "sigmappf-warranty";
    const DEFAULT_API_BASE_URL: &'static str = "https://api.cloudinary.com/v1_1";

    pub fn from_env() -> Result<Option<Self>, String> {
        let signature_algorithm = non_empty_var("CLOUDINARY_SIGNATURE_ALGORITHM")
            .map(|v| v.parse::<SignatureAlgorithm>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self::from_parts(
            non_empty_var("CLOUDINARY_CLOUD_NAME"),
            non_empty_var("CLOUDINARY_API_KEY"),
            non_empty_var("CLOUDINARY_API_SECRET"),
        )
        .map(|mut config| {
            if let Some(folder) = non_empty_var("CLOUDINARY_UPLOAD_FOLDER") {
                config.upload_folder = folder;
            }
            if let Some(base) = non_empty_var("CLOUDINARY_API_BASE_URL") {
                config.api_base_url = base.trim_end_matches('/').to_string();
            }
            config.signature_algorithm = signature_algorithm;
            config
        }))
    }

    /// All three credentials must be present, otherwise uploads are mocked
    pub fn from_parts(
        cloud_name: Option<String>,
        api_key: Option<String>,
        api_secret: Option<String>,
    ) -> Option<Self> {
        Some(Self {
            cloud_name: cloud_name?,
            api_key: api_key?,
            api_secret: api_secret?,
            upload_folder: Self::DEFAULT_UPLOAD_FOLDER.to_string(),
            api_base_url: Self::DEFAULT_API_BASE_URL.to_string(),
            signature_algorithm: SignatureAlgorithm::default(),
        })
    }
}

impl GoogleSheetsConfig {
    const DEFAULT_TOKEN_URL: &'static str = "https://oauth2.googleapis.com/token";
    const DEFAULT_API_BASE_URL: &'static str = "https://sheets.googleapis.com/v4";

    pub fn from_env() -> Result<Option<Self>, String> {
        let init_headers = match env::var("GOOGLE_SHEETS_INIT_HEADERS") {
            Ok(v) => v
                .trim()
                .parse::<bool>()
                .map_err(|_| "GOOGLE_SHEETS_INIT_HEADERS must be true or false".to_string())?,
            Err(_) => false,
        };

        Ok(Self::from_parts(
            non_empty_var("GOOGLE_SERVICE_ACCOUNT_EMAIL"),
            non_empty_var("GOOGLE_PRIVATE_KEY"),
            non_empty_var("GOOGLE_SHEET_ID"),
        )
        .map(|mut config| {
            config.init_headers = init_headers;
            config
        }))
    }

    /// All three credentials must be present, otherwise appends are mocked
    pub fn from_parts(
        service_account_email: Option<String>,
        private_key: Option<String>,
        sheet_id: Option<String>,
    ) -> Option<Self> {
        Some(Self {
            service_account_email: service_account_email?,
            private_key: normalize_private_key(&private_key?),
            sheet_id: sheet_id?,
            init_headers: false,
            token_url: Self::DEFAULT_TOKEN_URL.to_string(),
            api_base_url: Self::DEFAULT_API_BASE_URL.to_string(),
        })
    }
}

impl SheetRanges {
    pub const DEFAULT_WARRANTY_RANGE: &'static str = "Sheet1!A:L";
    pub const DEFAULT_CONTACT_RANGE: &'static str = "Contacts!A:E";

    pub fn from_env() -> Self {
        Self {
            warranty: non_empty_var("GOOGLE_SHEET_RANGE")
                .unwrap_or_else(|| Self::DEFAULT_WARRANTY_RANGE.to_string()),
            contact: non_empty_var("GOOGLE_CONTACT_SHEET_RANGE")
                .unwrap_or_else(|| Self::DEFAULT_CONTACT_RANGE.to_string()),
        }
    }
}

impl Default for SheetRanges {
    fn default() -> Self {
        Self {
            warranty: Self::DEFAULT_WARRANTY_RANGE.to_string(),
            contact: Self::DEFAULT_CONTACT_RANGE.to_string(),
        }
    }
}

/// Private keys pasted into env files carry literal `\n` sequences
pub fn normalize_private_key(raw: &str) -> String {
    raw.replace("\\n", "\n")
}
