//! Row layout of the contact inquiries tab.

use chrono::{DateTime, Utc};

use crate::features::contact::dtos::ContactQueryDto;
use crate::shared::types::iso_timestamp;

/// Status written for every new inquiry
pub const CONTACT_INITIAL_STATUS: &str = "New";

pub const CONTACT_HEADERS: [&str; 5] = ["Timestamp", "Name", "Phone", "Query", "Status"];

pub struct ContactRow {
    pub timestamp: String,
    pub name: String,
    pub phone: String,
    pub query: String,
    pub status: String,
}

impl ContactRow {
    pub fn new(dto: &ContactQueryDto, submitted_at: DateTime<Utc>) -> Self {
        Self {
            timestamp: iso_timestamp(&submitted_at),
            name: dto.name.clone(),
            phone: dto.phone.clone(),
            query: dto.query.clone(),
            status: CONTACT_INITIAL_STATUS.to_string(),
        }
    }

    pub fn into_values(self) -> Vec<String> {
        vec![self.timestamp, self.name, self.phone, self.query, self.status]
    }
}
