use utoipa::{Modify, OpenApi};

use crate::features::contact::{dtos as contact_dtos, handlers as contact_handlers};
use crate::features::warranty::{dtos as warranty_dtos, handlers as warranty_handlers};
use crate::shared::types::{ErrorResponse, FieldError, SubmissionResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Warranty (public)
        warranty_handlers::submit_warranty,
        warranty_handlers::describe_warranty,
        warranty_handlers::warranty_preflight,
        // Contact (public)
        contact_handlers::submit_contact,
    ),
    components(
        schemas(
            // Shared
            ErrorResponse,
            FieldError,
            // Warranty
            warranty_dtos::WarrantyFormDto,
            warranty_dtos::RegistrationSummaryDto,
            warranty_dtos::WarrantyEndpointInfoDto,
            SubmissionResponse<warranty_dtos::RegistrationSummaryDto>,
            // Contact
            contact_dtos::ContactQueryDto,
            contact_dtos::ContactReceiptDto,
            SubmissionResponse<contact_dtos::ContactReceiptDto>,
        )
    ),
    tags(
        (name = "warranty", description = "Warranty registration (public)"),
        (name = "contact", description = "Contact inquiries (public)"),
    ),
    info(
        title = "Sigma PPF API",
        version = "0.1.0",
        description = "Form submission API for the Sigma PPF website",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
