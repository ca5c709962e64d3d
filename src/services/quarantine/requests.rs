//! Request types for the quarantine service.

use crate::errors::{SmaResult, ValidationError};
use crate::services::{push_opt, require_non_empty};
use crate::types::OrderDirection;
use serde_json::{json, Value};

/// Quarantine category on the appliance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuarantineType {
    /// Spam quarantine
    Spam,
    /// General (policy, virus and outbreak) quarantine
    Pvo,
}

impl QuarantineType {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            QuarantineType::Spam => "spam",
            QuarantineType::Pvo => "pvo",
        }
    }

    /// Parse a quarantine type name
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "spam" => Ok(QuarantineType::Spam),
            "pvo" => Ok(QuarantineType::Pvo),
            _ => Err("expected one of: spam, pvo".to_string()),
        }
    }
}

/// Sort fields accepted by the spam quarantine search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpamOrderField {
    /// Sender address
    FromAddress,
    /// Recipient address
    ToAddress,
    /// Message subject
    Subject,
}

impl SpamOrderField {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SpamOrderField::FromAddress => "from_address",
            SpamOrderField::ToAddress => "to_address",
            SpamOrderField::Subject => "subject",
        }
    }

    /// Parse a sort field name
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "from_address" => Ok(SpamOrderField::FromAddress),
            "to_address" => Ok(SpamOrderField::ToAddress),
            "subject" => Ok(SpamOrderField::Subject),
            _ => Err("expected one of: from_address, to_address, subject".to_string()),
        }
    }
}

/// Filter operators accepted by the quarantine searches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    /// Substring match
    Contains,
    /// Exact match
    Is,
    /// Prefix match
    BeginsWith,
    /// Suffix match
    EndsWith,
    /// Negated substring match
    DoesNotContain,
}

impl FilterOperator {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Contains => "contains",
            FilterOperator::Is => "is",
            FilterOperator::BeginsWith => "begins_with",
            FilterOperator::EndsWith => "ends_with",
            FilterOperator::DoesNotContain => "does_not_contain",
        }
    }

    /// Parse a filter operator name
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "contains" => Ok(FilterOperator::Contains),
            "is" => Ok(FilterOperator::Is),
            "begins_with" => Ok(FilterOperator::BeginsWith),
            "ends_with" => Ok(FilterOperator::EndsWith),
            "does_not_contain" => Ok(FilterOperator::DoesNotContain),
            _ => Err(
                "expected one of: contains, is, begins_with, ends_with, does_not_contain"
                    .to_string(),
            ),
        }
    }
}

/// Subject filters accepted by the general quarantine search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectFilter {
    /// Substring match
    Contains,
    /// Prefix match
    StartsWith,
    /// Suffix match
    EndsWith,
    /// Exact match
    MatchesExactly,
    /// Negated substring match
    DoesNotContain,
    /// Negated prefix match
    DoesNotStartWith,
    /// Negated suffix match
    DoesNotEndWith,
    /// Negated exact match
    DoesNotMatch,
}

impl SubjectFilter {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectFilter::Contains => "contains",
            SubjectFilter::StartsWith => "starts_with",
            SubjectFilter::EndsWith => "ends_with",
            SubjectFilter::MatchesExactly => "matches_exactly",
            SubjectFilter::DoesNotContain => "does_not_contain",
            SubjectFilter::DoesNotStartWith => "does_not_start_with",
            SubjectFilter::DoesNotEndWith => "does_not_end_with",
            SubjectFilter::DoesNotMatch => "does_not_match",
        }
    }

    /// Parse a subject filter name
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "contains" => Ok(SubjectFilter::Contains),
            "starts_with" => Ok(SubjectFilter::StartsWith),
            "ends_with" => Ok(SubjectFilter::EndsWith),
            "matches_exactly" => Ok(SubjectFilter::MatchesExactly),
            "does_not_contain" => Ok(SubjectFilter::DoesNotContain),
            "does_not_start_with" => Ok(SubjectFilter::DoesNotStartWith),
            "does_not_end_with" => Ok(SubjectFilter::DoesNotEndWith),
            "does_not_match" => Ok(SubjectFilter::DoesNotMatch),
            _ => Err(
                "expected one of: contains, starts_with, ends_with, matches_exactly, \
                 does_not_contain, does_not_start_with, does_not_end_with, does_not_match"
                    .to_string(),
            ),
        }
    }
}

/// Attachment size filters accepted by the general quarantine search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentSizeFilter {
    /// Between the from/to bounds
    Range,
    /// Below the bound
    LessThan,
    /// Above the bound
    MoreThan,
}

impl AttachmentSizeFilter {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentSizeFilter::Range => "range",
            AttachmentSizeFilter::LessThan => "less_than",
            AttachmentSizeFilter::MoreThan => "more_than",
        }
    }

    /// Parse a size filter name
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "range" => Ok(AttachmentSizeFilter::Range),
            "less_than" => Ok(AttachmentSizeFilter::LessThan),
            "more_than" => Ok(AttachmentSizeFilter::MoreThan),
            _ => Err("expected one of: range, less_than, more_than".to_string()),
        }
    }
}

/// Sort fields accepted by the general quarantine search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneralOrderField {
    /// Sender address
    Sender,
    /// Message subject
    Subject,
    /// Received timestamp
    Received,
    /// Message size
    Size,
}

impl GeneralOrderField {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneralOrderField::Sender => "sender",
            GeneralOrderField::Subject => "subject",
            GeneralOrderField::Received => "received",
            GeneralOrderField::Size => "size",
        }
    }

    /// Parse a sort field name
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "sender" => Ok(GeneralOrderField::Sender),
            "subject" => Ok(GeneralOrderField::Subject),
            "received" => Ok(GeneralOrderField::Received),
            "size" => Ok(GeneralOrderField::Size),
            _ => Err("expected one of: sender, subject, received, size".to_string()),
        }
    }
}

/// Spam quarantine search
#[derive(Debug, Clone)]
pub struct SpamSearchRequest {
    /// Window start (inclusive)
    pub start_date: String,
    /// Window end (exclusive)
    pub end_date: String,
    /// Pagination offset
    pub offset: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
    /// Sort field
    pub order_by: Option<SpamOrderField>,
    /// Sort direction
    pub order_direction: Option<OrderDirection>,
    /// Envelope recipient filter operator
    pub envelope_recipient_filter_operator: Option<FilterOperator>,
    /// Envelope recipient filter value
    pub envelope_recipient_filter_value: Option<String>,
    /// General filter operator
    pub filter_operator: Option<FilterOperator>,
    /// General filter value
    pub filter_value: Option<String>,
}

impl SpamSearchRequest {
    /// Create a new search over the given date window
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            offset: None,
            limit: None,
            order_by: None,
            order_direction: None,
            envelope_recipient_filter_operator: None,
            envelope_recipient_filter_value: None,
            filter_operator: None,
            filter_value: None,
        }
    }

    /// Set the pagination offset
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the page size
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the sort field
    pub fn order_by(mut self, field: SpamOrderField) -> Self {
        self.order_by = Some(field);
        self
    }

    /// Set the sort direction
    pub fn order_direction(mut self, direction: OrderDirection) -> Self {
        self.order_direction = Some(direction);
        self
    }

    /// Filter on the envelope recipient
    pub fn envelope_recipient_filter(
        mut self,
        operator: FilterOperator,
        value: impl Into<String>,
    ) -> Self {
        self.envelope_recipient_filter_operator = Some(operator);
        self.envelope_recipient_filter_value = Some(value.into());
        self
    }

    /// Apply the general filter
    pub fn filter(mut self, operator: FilterOperator, value: impl Into<String>) -> Self {
        self.filter_operator = Some(operator);
        self.filter_value = Some(value.into());
        self
    }

    /// Check required parameters
    pub fn validate(&self) -> SmaResult<()> {
        require_non_empty(&self.start_date, "start_date")?;
        require_non_empty(&self.end_date, "end_date")?;
        Ok(())
    }

    /// Build the query string pairs
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("startDate".to_string(), self.start_date.clone()),
            ("endDate".to_string(), self.end_date.clone()),
            (
                "quarantineType".to_string(),
                QuarantineType::Spam.as_str().to_string(),
            ),
        ];
        push_opt(&mut query, "offset", self.offset.map(|v| v.to_string()));
        push_opt(&mut query, "limit", self.limit.map(|v| v.to_string()));
        push_opt(
            &mut query,
            "orderBy",
            self.order_by.map(|v| v.as_str().to_string()),
        );
        push_opt(
            &mut query,
            "orderDir",
            self.order_direction.map(|v| v.as_str().to_string()),
        );
        push_opt(
            &mut query,
            "envelopeRecipientFilterOperator",
            self.envelope_recipient_filter_operator
                .map(|v| v.as_str().to_string()),
        );
        push_opt(
            &mut query,
            "envelopeRecipientFilterValue",
            self.envelope_recipient_filter_value.clone(),
        );
        push_opt(
            &mut query,
            "filterOperator",
            self.filter_operator.map(|v| v.as_str().to_string()),
        );
        push_opt(&mut query, "filterValue", self.filter_value.clone());
        query
    }
}

/// General (pvo) quarantine search
#[derive(Debug, Clone)]
pub struct GeneralSearchRequest {
    /// Window start (inclusive)
    pub start_date: String,
    /// Window end (exclusive)
    pub end_date: String,
    /// Quarantine names to search (Outbreak, Virus, Policy, ...)
    pub quarantines: Vec<String>,
    /// Subject filter
    pub subject_filter_by: Option<SubjectFilter>,
    /// Subject filter value
    pub subject_filter_value: Option<String>,
    /// Originating ESA IP filter
    pub originating_esa_ip: Option<String>,
    /// Attachment name filter
    pub attachment_name: Option<String>,
    /// Attachment size filter
    pub attachment_size_filter_by: Option<AttachmentSizeFilter>,
    /// Attachment size lower bound (KB)
    pub attachment_size_from_value: Option<String>,
    /// Attachment size upper bound (KB)
    pub attachment_size_to_value: Option<String>,
    /// Envelope recipient filter operator
    pub envelope_recipient_filter_by: Option<FilterOperator>,
    /// Envelope recipient filter value
    pub envelope_recipient_filter_value: Option<String>,
    /// Envelope sender filter operator
    pub envelope_sender_filter_by: Option<FilterOperator>,
    /// Envelope sender filter value
    pub envelope_sender_filter_value: Option<String>,
    /// Sort field
    pub order_by: Option<GeneralOrderField>,
    /// Sort direction
    pub order_direction: Option<OrderDirection>,
    /// Pagination offset
    pub offset: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
}

impl GeneralSearchRequest {
    /// Create a new search over the given window and quarantines
    pub fn new(
        start_date: impl Into<String>,
        end_date: impl Into<String>,
        quarantines: Vec<String>,
    ) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            quarantines,
            subject_filter_by: None,
            subject_filter_value: None,
            originating_esa_ip: None,
            attachment_name: None,
            attachment_size_filter_by: None,
            attachment_size_from_value: None,
            attachment_size_to_value: None,
            envelope_recipient_filter_by: None,
            envelope_recipient_filter_value: None,
            envelope_sender_filter_by: None,
            envelope_sender_filter_value: None,
            order_by: None,
            order_direction: None,
            offset: None,
            limit: None,
        }
    }

    /// Filter on subject
    pub fn subject_filter(mut self, filter: SubjectFilter, value: impl Into<String>) -> Self {
        self.subject_filter_by = Some(filter);
        self.subject_filter_value = Some(value.into());
        self
    }

    /// Set the sort field
    pub fn order_by(mut self, field: GeneralOrderField) -> Self {
        self.order_by = Some(field);
        self
    }

    /// Set the sort direction
    pub fn order_direction(mut self, direction: OrderDirection) -> Self {
        self.order_direction = Some(direction);
        self
    }

    /// Set the pagination offset
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set the page size
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Check required parameters
    pub fn validate(&self) -> SmaResult<()> {
        require_non_empty(&self.start_date, "start_date")?;
        require_non_empty(&self.end_date, "end_date")?;
        if self.quarantines.iter().all(|q| q.trim().is_empty()) {
            return Err(ValidationError::MissingParameter {
                name: "quarantines".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Build the query string pairs
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("startDate".to_string(), self.start_date.clone()),
            ("endDate".to_string(), self.end_date.clone()),
            (
                "quarantineType".to_string(),
                QuarantineType::Pvo.as_str().to_string(),
            ),
            ("quarantines".to_string(), self.quarantines.join(",")),
        ];
        push_opt(
            &mut query,
            "subjectFilterBy",
            self.subject_filter_by.map(|v| v.as_str().to_string()),
        );
        push_opt(
            &mut query,
            "subjectFilterValue",
            self.subject_filter_value.clone(),
        );
        push_opt(
            &mut query,
            "originatingEsaIp",
            self.originating_esa_ip.clone(),
        );
        push_opt(&mut query, "attachmentName", self.attachment_name.clone());
        push_opt(
            &mut query,
            "attachmentSizeFilterBy",
            self.attachment_size_filter_by
                .map(|v| v.as_str().to_string()),
        );
        push_opt(
            &mut query,
            "attachmentSizeFromValue",
            self.attachment_size_from_value.clone(),
        );
        push_opt(
            &mut query,
            "attachmentSizeToValue",
            self.attachment_size_to_value.clone(),
        );
        push_opt(
            &mut query,
            "envelopeRecipientFilterBy",
            self.envelope_recipient_filter_by
                .map(|v| v.as_str().to_string()),
        );
        push_opt(
            &mut query,
            "envelopeRecipientFilterValue",
            self.envelope_recipient_filter_value.clone(),
        );
        push_opt(
            &mut query,
            "envelopeSenderFilterBy",
            self.envelope_sender_filter_by
                .map(|v| v.as_str().to_string()),
        );
        push_opt(
            &mut query,
            "envelopeSenderFilterValue",
            self.envelope_sender_filter_value.clone(),
        );
        push_opt(
            &mut query,
            "orderBy",
            self.order_by.map(|v| v.as_str().to_string()),
        );
        push_opt(
            &mut query,
            "orderDir",
            self.order_direction.map(|v| v.as_str().to_string()),
        );
        push_opt(&mut query, "offset", self.offset.map(|v| v.to_string()));
        push_opt(&mut query, "limit", self.limit.map(|v| v.to_string()));
        query
    }
}

/// Quarantined message details lookup
#[derive(Debug, Clone)]
pub struct MessageDetailsRequest {
    /// Message identifier
    pub message_id: i64,
    /// Quarantine the message is held in
    pub quarantine: QuarantineType,
}

impl MessageDetailsRequest {
    /// Create a new details request
    pub fn new(message_id: i64, quarantine: QuarantineType) -> Self {
        Self {
            message_id,
            quarantine,
        }
    }

    /// Build the query string pairs
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("mid".to_string(), self.message_id.to_string()),
            (
                "quarantineType".to_string(),
                self.quarantine.as_str().to_string(),
            ),
        ]
    }
}

/// Release quarantined messages back to their recipients
#[derive(Debug, Clone)]
pub struct ReleaseMessagesRequest {
    /// Message identifiers to release
    pub message_ids: Vec<i64>,
    /// Quarantine the messages are held in
    pub quarantine: QuarantineType,
    /// Named quarantine, required for the general quarantine
    pub quarantine_name: Option<String>,
}

impl ReleaseMessagesRequest {
    /// Release from the spam quarantine
    pub fn spam(message_ids: Vec<i64>) -> Self {
        Self {
            message_ids,
            quarantine: QuarantineType::Spam,
            quarantine_name: None,
        }
    }

    /// Release from a named general quarantine
    pub fn general(message_ids: Vec<i64>, quarantine_name: impl Into<String>) -> Self {
        Self {
            message_ids,
            quarantine: QuarantineType::Pvo,
            quarantine_name: Some(quarantine_name.into()),
        }
    }

    /// Check required parameters
    pub fn validate(&self) -> SmaResult<()> {
        validate_action_target(&self.message_ids, self.quarantine, &self.quarantine_name)
    }

    /// Build the JSON body
    pub fn payload(&self) -> Value {
        let mut payload = json!({
            "action": "release",
            "quarantineType": self.quarantine.as_str(),
            "mids": self.message_ids,
        });
        if let Some(name) = &self.quarantine_name {
            payload["quarantineName"] = json!(name);
        }
        payload
    }
}

/// Delete quarantined messages
#[derive(Debug, Clone)]
pub struct DeleteMessagesRequest {
    /// Message identifiers to delete
    pub message_ids: Vec<i64>,
    /// Quarantine the messages are held in
    pub quarantine: QuarantineType,
    /// Named quarantine, required for the general quarantine
    pub quarantine_name: Option<String>,
}

impl DeleteMessagesRequest {
    /// Delete from the spam quarantine
    pub fn spam(message_ids: Vec<i64>) -> Self {
        Self {
            message_ids,
            quarantine: QuarantineType::Spam,
            quarantine_name: None,
        }
    }

    /// Delete from a named general quarantine
    pub fn general(message_ids: Vec<i64>, quarantine_name: impl Into<String>) -> Self {
        Self {
            message_ids,
            quarantine: QuarantineType::Pvo,
            quarantine_name: Some(quarantine_name.into()),
        }
    }

    /// Check required parameters
    pub fn validate(&self) -> SmaResult<()> {
        validate_action_target(&self.message_ids, self.quarantine, &self.quarantine_name)
    }

    /// Build the JSON body
    pub fn payload(&self) -> Value {
        let mut payload = json!({
            "quarantineType": self.quarantine.as_str(),
            "mids": self.message_ids,
        });
        if let Some(name) = &self.quarantine_name {
            payload["quarantineName"] = json!(name);
        }
        payload
    }
}

/// Download an attachment from a quarantined message
#[derive(Debug, Clone)]
pub struct DownloadAttachmentRequest {
    /// Message identifier
    pub message_id: i64,
    /// Attachment identifier within the message
    pub attachment_id: String,
    /// Quarantine the message is held in
    pub quarantine: QuarantineType,
    /// Base64-decode the body before returning it
    pub decode_base64: bool,
}

impl DownloadAttachmentRequest {
    /// Create a new download request against the general quarantine
    pub fn new(message_id: i64, attachment_id: impl Into<String>) -> Self {
        Self {
            message_id,
            attachment_id: attachment_id.into(),
            quarantine: QuarantineType::Pvo,
            decode_base64: false,
        }
    }

    /// Target a different quarantine
    pub fn quarantine(mut self, quarantine: QuarantineType) -> Self {
        self.quarantine = quarantine;
        self
    }

    /// Base64-decode the attachment body
    pub fn decode_base64(mut self, decode: bool) -> Self {
        self.decode_base64 = decode;
        self
    }

    /// Check required parameters
    pub fn validate(&self) -> SmaResult<()> {
        require_non_empty(&self.attachment_id, "attachment_id")
    }

    /// Build the query string pairs
    pub fn to_query(&self) -> Vec<(String, String)> {
        vec![
            ("mid".to_string(), self.message_id.to_string()),
            ("attachmentId".to_string(), self.attachment_id.clone()),
            (
                "quarantineType".to_string(),
                self.quarantine.as_str().to_string(),
            ),
        ]
    }

    /// Fallback name when the response carries no usable disposition
    pub fn default_file_name(&self) -> String {
        format!("attachment_{}_{}", self.message_id, self.attachment_id)
    }
}

fn validate_action_target(
    message_ids: &[i64],
    quarantine: QuarantineType,
    quarantine_name: &Option<String>,
) -> SmaResult<()> {
    if message_ids.is_empty() {
        return Err(ValidationError::MissingParameter {
            name: "message_id".to_string(),
        }
        .into());
    }
    if quarantine == QuarantineType::Pvo
        && quarantine_name.as_deref().map_or(true, |n| n.trim().is_empty())
    {
        return Err(ValidationError::MissingParameter {
            name: "quarantine_name".to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("from_address" => true; "from address accepted")]
    #[test_case("to_address" => true; "to address accepted")]
    #[test_case("subject" => true; "subject accepted")]
    #[test_case("invalid_field" => false; "unknown field rejected")]
    #[test_case("FROM_ADDRESS" => false; "case sensitive")]
    fn test_spam_order_field_parse(value: &str) -> bool {
        SpamOrderField::parse(value).is_ok()
    }

    #[test_case("contains" => true)]
    #[test_case("is" => true)]
    #[test_case("begins_with" => true)]
    #[test_case("ends_with" => true)]
    #[test_case("does_not_contain" => true)]
    #[test_case("matches" => false)]
    fn test_filter_operator_parse(value: &str) -> bool {
        FilterOperator::parse(value).is_ok()
    }

    #[test]
    fn test_spam_search_query_includes_fixed_and_optional_params() {
        let request = SpamSearchRequest::new("2024-01-01T00:00:00.000Z", "2024-02-01T00:00:00.000Z")
            .offset(10)
            .limit(50)
            .order_by(SpamOrderField::Subject)
            .order_direction(crate::types::OrderDirection::Desc)
            .filter(FilterOperator::Contains, "invoice");
        request.validate().unwrap();

        let query = request.to_query();
        assert!(query.contains(&("quarantineType".to_string(), "spam".to_string())));
        assert!(query.contains(&("orderBy".to_string(), "subject".to_string())));
        assert!(query.contains(&("orderDir".to_string(), "desc".to_string())));
        assert!(query.contains(&("filterOperator".to_string(), "contains".to_string())));
        assert!(query.contains(&("filterValue".to_string(), "invoice".to_string())));
        assert!(!query.iter().any(|(k, _)| k == "envelopeRecipientFilterOperator"));
    }

    #[test]
    fn test_spam_search_requires_date_window() {
        let err = SpamSearchRequest::new("", "2024-02-01").validate().unwrap_err();
        assert!(err.to_string().contains("start_date"));

        let err = SpamSearchRequest::new("2024-01-01", " ").validate().unwrap_err();
        assert!(err.to_string().contains("end_date"));
    }

    #[test]
    fn test_general_search_requires_quarantines() {
        let err = GeneralSearchRequest::new("2024-01-01", "2024-02-01", vec![])
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("quarantines"));
    }

    #[test]
    fn test_general_search_joins_quarantines() {
        let request = GeneralSearchRequest::new(
            "2024-01-01",
            "2024-02-01",
            vec!["Outbreak".to_string(), "Virus".to_string()],
        );
        let query = request.to_query();
        assert!(query.contains(&("quarantineType".to_string(), "pvo".to_string())));
        assert!(query.contains(&("quarantines".to_string(), "Outbreak,Virus".to_string())));
    }

    #[test]
    fn test_release_payload_spam() {
        let request = ReleaseMessagesRequest::spam(vec![100, 101]);
        request.validate().unwrap();
        assert_eq!(
            request.payload(),
            serde_json::json!({
                "action": "release",
                "quarantineType": "spam",
                "mids": [100, 101],
            })
        );
    }

    #[test]
    fn test_release_general_requires_quarantine_name() {
        let request = ReleaseMessagesRequest {
            message_ids: vec![5],
            quarantine: QuarantineType::Pvo,
            quarantine_name: None,
        };
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("quarantine_name"));

        let request = ReleaseMessagesRequest::general(vec![5], "Outbreak");
        request.validate().unwrap();
        assert_eq!(request.payload()["quarantineName"], "Outbreak");
    }

    #[test]
    fn test_delete_payload_has_no_action_field() {
        let request = DeleteMessagesRequest::spam(vec![7]);
        let payload = request.payload();
        assert!(payload.get("action").is_none());
        assert_eq!(payload["quarantineType"], "spam");
    }

    #[test]
    fn test_delete_requires_message_ids() {
        let err = DeleteMessagesRequest::spam(vec![]).validate().unwrap_err();
        assert!(err.to_string().contains("message_id"));
    }

    #[test]
    fn test_download_request_defaults() {
        let request = DownloadAttachmentRequest::new(42, "attach-1");
        request.validate().unwrap();
        let query = request.to_query();
        assert!(query.contains(&("quarantineType".to_string(), "pvo".to_string())));
        assert_eq!(request.default_file_name(), "attachment_42_attach-1");
    }
}
