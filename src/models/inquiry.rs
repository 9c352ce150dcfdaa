use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A buyer's message about a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Inquiry {
    pub id: String,
    pub property_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    pub message: String,
    pub contact_email: String,
    #[serde(default)]
    pub contact_phone: Option<String>,
    /// new, contacted or closed
    #[serde(default = "new_status")]
    pub status: String,
    #[serde(default, deserialize_with = "super::timestamp::deserialize")]
    pub created_at: Option<DateTime<Utc>>,
}

fn new_status() -> String {
    "new".to_string()
}

/// Payload for sending an inquiry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InquiryCreate {
    pub property_id: String,
    pub message: String,
    pub contact_email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
}
