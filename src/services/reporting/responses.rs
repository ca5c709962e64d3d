//! Response types for the reporting service.

use serde::Deserialize;
use serde_json::Value;

/// Statistics report payload.
///
/// Report shapes vary per resource, so the body stays free-form; the
/// common envelope places the result under `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportResponse {
    /// Report data
    #[serde(default)]
    pub data: Value,
    /// Optional metadata
    #[serde(default)]
    pub meta: Option<Value>,
}

impl ReportResponse {
    /// Report resource type echoed by the appliance, when present
    pub fn report_type(&self) -> Option<&str> {
        self.data.get("type").and_then(Value::as_str)
    }

    /// Counter result set, when present
    pub fn result_set(&self) -> Option<&Value> {
        self.data.get("resultSet")
    }
}
