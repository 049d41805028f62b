pub mod contact_row;

pub use contact_row::*;
