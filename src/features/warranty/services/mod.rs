pub mod warranty_service;

pub use warranty_service::*;
