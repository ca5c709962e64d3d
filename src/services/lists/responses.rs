//! Response types for the safelist/blocklist service.

use serde::Deserialize;
use serde_json::Value;

/// Pagination metadata for list views
#[derive(Debug, Clone, Deserialize)]
pub struct ListMeta {
    /// Total entries in the list
    #[serde(rename = "totalCount")]
    pub total_count: Option<u64>,
}

/// A page of list entries
#[derive(Debug, Clone, Deserialize)]
pub struct ListSearchResponse {
    /// Entry objects
    #[serde(default)]
    pub data: Vec<Value>,
    /// Pagination metadata
    #[serde(default)]
    pub meta: Option<ListMeta>,
}

impl ListSearchResponse {
    /// Total entries, zero when omitted
    pub fn total_count(&self) -> u64 {
        self.meta.as_ref().and_then(|m| m.total_count).unwrap_or(0)
    }
}

/// Acknowledgement for add/edit/delete operations
#[derive(Debug, Clone, Deserialize)]
pub struct ListActionResponse {
    /// Acknowledgement object
    #[serde(default)]
    pub data: Value,
}

impl ListActionResponse {
    /// Number of entries the appliance acted on
    pub fn total_count(&self) -> u64 {
        self.data
            .get("totalCount")
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }
}
