//! Warranty registration feature.
//!
//! Customers (or their detailer) register a PPF installation by submitting
//! the roll code, contact details and an optional car photo. The photo goes
//! to the image host and the record is appended as one spreadsheet row.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/warranty` | No | Submit a registration (multipart) |
//! | GET | `/api/warranty` | No | Describe the accepted fields |
//! | OPTIONS | `/api/warranty` | No | CORS preflight |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use routes::routes;
pub use services::WarrantyService;
