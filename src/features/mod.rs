pub mod contact;
pub mod warranty;
