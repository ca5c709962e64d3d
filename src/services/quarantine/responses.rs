//! Response types for the quarantine service.

use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;

/// Pagination metadata returned by the search endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct SearchMeta {
    /// Total matching messages on the appliance
    #[serde(rename = "totalCount")]
    pub total_count: Option<u64>,
}

/// Search result page: free-form message objects plus metadata
#[derive(Debug, Clone, Deserialize)]
pub struct QuarantineSearchResponse {
    /// Matching messages
    #[serde(default)]
    pub data: Vec<Value>,
    /// Pagination metadata
    #[serde(default)]
    pub meta: Option<SearchMeta>,
}

impl QuarantineSearchResponse {
    /// Total matching messages, zero when the appliance omits the count
    pub fn total_count(&self) -> u64 {
        self.meta.as_ref().and_then(|m| m.total_count).unwrap_or(0)
    }
}

/// Single-message details payload
#[derive(Debug, Clone, Deserialize)]
pub struct MessageDetailsResponse {
    /// Message object
    #[serde(default)]
    pub data: Value,
}

impl MessageDetailsResponse {
    /// Message subject, when present under `attributes`
    pub fn subject(&self) -> Option<&str> {
        self.data
            .pointer("/attributes/subject")
            .and_then(Value::as_str)
    }
}

/// Acknowledgement for release/delete operations
#[derive(Debug, Clone, Deserialize)]
pub struct QuarantineActionResponse {
    /// Acknowledgement object
    #[serde(default)]
    pub data: Value,
}

impl QuarantineActionResponse {
    /// Number of messages the appliance acted on
    pub fn total_count(&self) -> u64 {
        self.data
            .get("totalCount")
            .and_then(Value::as_u64)
            .unwrap_or(0)
    }

    /// Action the appliance reports having taken
    pub fn action(&self) -> Option<&str> {
        self.data.get("action").and_then(Value::as_str)
    }
}

/// A downloaded attachment: recovered filename plus body bytes.
///
/// Persisting the file is the caller's concern.
#[derive(Debug, Clone)]
pub struct DownloadedAttachment {
    /// Sanitized filename
    pub file_name: String,
    /// Attachment body
    pub content: Bytes,
}

impl DownloadedAttachment {
    /// Body size in bytes
    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Recover a filename from a Content-Disposition header value.
pub(crate) fn filename_from_disposition(value: &str) -> Option<String> {
    let lower = value.to_ascii_lowercase();
    let start = lower.find("filename=")? + "filename=".len();
    let raw = value[start..].split(';').next().unwrap_or("").trim();
    let name = sanitize_file_name(raw);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Strip quote and comma characters from a derived filename.
pub(crate) fn sanitize_file_name(raw: &str) -> String {
    raw.chars()
        .filter(|c| !matches!(c, '"' | '\'' | ','))
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_search_response_counts() {
        let response: QuarantineSearchResponse = serde_json::from_value(json!({
            "data": [{"mid": 1}, {"mid": 2}],
            "meta": {"totalCount": 17}
        }))
        .unwrap();
        assert_eq!(response.data.len(), 2);
        assert_eq!(response.total_count(), 17);
    }

    #[test]
    fn test_search_response_tolerates_missing_meta() {
        let response: QuarantineSearchResponse =
            serde_json::from_value(json!({"data": []})).unwrap();
        assert_eq!(response.total_count(), 0);
    }

    #[test]
    fn test_details_subject_lookup() {
        let response: MessageDetailsResponse = serde_json::from_value(json!({
            "data": {"attributes": {"subject": "You won"}}
        }))
        .unwrap();
        assert_eq!(response.subject(), Some("You won"));
    }

    #[test]
    fn test_action_response_accessors() {
        let response: QuarantineActionResponse = serde_json::from_value(json!({
            "data": {"action": "release", "totalCount": 3}
        }))
        .unwrap();
        assert_eq!(response.action(), Some("release"));
        assert_eq!(response.total_count(), 3);
    }

    #[test]
    fn test_filename_from_disposition() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="report.pdf""#),
            Some("report.pdf".to_string())
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=plain.txt; size=12"),
            Some("plain.txt".to_string())
        );
        assert_eq!(filename_from_disposition("inline"), None);
    }

    #[test]
    fn test_sanitize_strips_quotes_and_commas() {
        assert_eq!(
            sanitize_file_name(r#""quarantine,report".csv"#),
            "quarantinereport.csv"
        );
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="a,b','c.txt""#),
            Some("abc.txt".to_string())
        );
    }
}
