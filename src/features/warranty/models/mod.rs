pub mod warranty_row;

pub use warranty_row::*;
