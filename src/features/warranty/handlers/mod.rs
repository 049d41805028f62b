pub mod warranty_handler;

pub use warranty_handler::*;
