//! Modules layer - adapters for the external services submissions are forwarded to
//!
//! Each adapter has a live client and a stub; the factories pick one at startup.

pub mod media;
pub mod sheets;
