//! E2SM-KPM indication header, format 1 (spec §6): fixed 8-byte start-time
//! plus optional vendor/sender strings, both absent by default.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq)]
pub struct IndicationHeader {
    pub collection_start_time: DateTime<Utc>,
    pub vendor_name: Option<String>,
    pub sender_name: Option<String>,
}

impl IndicationHeader {
    pub fn new(collection_start_time: DateTime<Utc>) -> Self {
        Self { collection_start_time, vendor_name: None, sender_name: None }
    }
}
