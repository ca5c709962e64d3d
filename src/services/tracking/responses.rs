//! Response types for the tracking service.

use serde::Deserialize;
use serde_json::Value;

/// Metadata returned by the tracking search
#[derive(Debug, Clone, Deserialize)]
pub struct TrackingMeta {
    /// Total matching records
    #[serde(rename = "totalCount")]
    pub total_count: Option<u64>,
    /// Records the appliance could not fully reconstruct
    #[serde(rename = "num_bad_records")]
    pub num_bad_records: Option<u64>,
}

/// Tracking search result page
#[derive(Debug, Clone, Deserialize)]
pub struct TrackingSearchResponse {
    /// Matching records
    #[serde(default)]
    pub data: Vec<Value>,
    /// Search metadata
    #[serde(default)]
    pub meta: Option<TrackingMeta>,
}

impl TrackingSearchResponse {
    /// Total matching records, zero when omitted
    pub fn total_count(&self) -> u64 {
        self.meta.as_ref().and_then(|m| m.total_count).unwrap_or(0)
    }

    /// Count of unreconstructable records, zero when omitted
    pub fn bad_records(&self) -> u64 {
        self.meta
            .as_ref()
            .and_then(|m| m.num_bad_records)
            .unwrap_or(0)
    }
}

/// Per-message tracking details, unwrapped from `data.messages`
#[derive(Debug, Clone, Deserialize)]
pub struct TrackingDetailsResponse {
    /// Raw payload
    #[serde(default)]
    pub data: Value,
}

impl TrackingDetailsResponse {
    /// The tracked message object
    pub fn message(&self) -> Value {
        self.data.get("messages").cloned().unwrap_or(Value::Null)
    }

    /// Message subject
    pub fn subject(&self) -> Option<String> {
        self.field_str("subject")
    }

    /// Delivery status
    pub fn status(&self) -> Option<String> {
        self.field_str("messageStatus")
    }

    /// Message direction (incoming/outgoing)
    pub fn direction(&self) -> Option<String> {
        self.field_str("direction")
    }

    fn field_str(&self, name: &str) -> Option<String> {
        self.data
            .pointer(&format!("/messages/{name}"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}
