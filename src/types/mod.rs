//! Shared types for the SMA client.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Terminal status of an invoked action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    /// The action completed successfully
    Success,
    /// The action failed
    Error,
}

/// Per-action outcome envelope: terminal status, human-readable message,
/// ordered result objects and a flat summary mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultEnvelope {
    /// Terminal status
    pub status: ActionStatus,
    /// Human-readable outcome message
    pub message: String,
    /// Ordered sequence of result objects
    pub data: Vec<Value>,
    /// Scalar/JSON summary fields
    pub summary: Map<String, Value>,
}

impl ResultEnvelope {
    /// Create a successful envelope
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Success,
            message: message.into(),
            data: Vec::new(),
            summary: Map::new(),
        }
    }

    /// Create a failed envelope
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: ActionStatus::Error,
            message: message.into(),
            data: Vec::new(),
            summary: Map::new(),
        }
    }

    /// Append a result object
    pub fn add_data(&mut self, value: Value) {
        self.data.push(value);
    }

    /// Set a summary field
    pub fn set_summary(&mut self, key: impl Into<String>, value: Value) {
        self.summary.insert(key.into(), value);
    }

    /// Builder-style variant of [`ResultEnvelope::add_data`]
    pub fn with_data(mut self, value: Value) -> Self {
        self.add_data(value);
        self
    }

    /// Builder-style variant of [`ResultEnvelope::set_summary`]
    pub fn with_summary(mut self, key: impl Into<String>, value: Value) -> Self {
        self.set_summary(key, value);
        self
    }

    /// Whether the action succeeded
    pub fn is_success(&self) -> bool {
        self.status == ActionStatus::Success
    }
}

/// Sort direction shared by the search-style endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    /// Ascending
    Asc,
    /// Descending
    Desc,
}

impl OrderDirection {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "asc",
            OrderDirection::Desc => "desc",
        }
    }

    /// Parse a direction name
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "asc" => Ok(OrderDirection::Asc),
            "desc" => Ok(OrderDirection::Desc),
            _ => Err("expected one of: asc, desc".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_order_direction_round_trip() {
        assert_eq!(OrderDirection::parse("asc").unwrap(), OrderDirection::Asc);
        assert_eq!(OrderDirection::Desc.as_str(), "desc");
        assert!(OrderDirection::parse("ASC").is_err());
    }

    #[test]
    fn test_envelope_accumulates_data_and_summary() {
        let mut envelope = ResultEnvelope::success("Successfully retrieved messages");
        envelope.add_data(json!({"mid": 100}));
        envelope.add_data(json!({"mid": 101}));
        envelope.set_summary("total_messages", json!(2));

        assert!(envelope.is_success());
        assert_eq!(envelope.data.len(), 2);
        assert_eq!(envelope.summary["total_messages"], json!(2));
    }

    #[test]
    fn test_failure_envelope() {
        let envelope = ResultEnvelope::failure("Parameter 'message_id' is required");
        assert!(!envelope.is_success());
        assert!(envelope.data.is_empty());
    }

    #[test]
    fn test_envelope_serializes_status_lowercase() {
        let envelope = ResultEnvelope::success("ok");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["status"], "success");
    }
}
