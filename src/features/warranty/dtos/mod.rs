pub mod warranty_dto;

pub use warranty_dto::*;
