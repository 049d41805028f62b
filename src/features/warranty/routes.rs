//! Warranty routes

use axum::{extract::DefaultBodyLimit, routing::post, Router};
use std::sync::Arc;

use crate::features::warranty::handlers::{describe_warranty, submit_warranty, warranty_preflight};
use crate::features::warranty::services::WarrantyService;

/// Create routes for the warranty feature
///
/// `max_body_size` caps the whole multipart body (image plus text fields).
pub fn routes(service: Arc<WarrantyService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/api/warranty",
            post(submit_warranty)
                .layer(DefaultBodyLimit::max(max_body_size))
                .get(describe_warranty)
                .options(warranty_preflight),
        )
        .with_state(service)
}
