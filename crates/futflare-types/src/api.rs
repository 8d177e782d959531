use serde::{Deserialize, Serialize};

use crate::capsule::Capsule;

/// Envelope every API endpoint answers with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub message: String,
    pub data: T,
}

/// Error bodies carry only the message, when they carry anything at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// One page of the capsule listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapsulePage {
    pub data: Vec<Capsule>,
    pub total_count: u64,
    pub total_pages: u32,
}

impl CapsulePage {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
