//! Request types for the safelist/blocklist service.

use super::{BLOCKLIST_ENDPOINT, DEFAULT_LIST_LIMIT, DEFAULT_LIST_OFFSET, SAFELIST_ENDPOINT};
use crate::errors::{SmaResult, ValidationError};
use crate::types::OrderDirection;
use serde_json::{json, Value};

/// Which sender list to operate on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListType {
    /// Safelist (trusted senders)
    Safelist,
    /// Blocklist (blocked senders)
    Blocklist,
}

impl ListType {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ListType::Safelist => "safelist",
            ListType::Blocklist => "blocklist",
        }
    }

    /// Endpoint path for this list
    pub fn endpoint(&self) -> &'static str {
        match self {
            ListType::Safelist => SAFELIST_ENDPOINT,
            ListType::Blocklist => BLOCKLIST_ENDPOINT,
        }
    }

    /// Parse a list type name
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.to_ascii_lowercase().as_str() {
            "safelist" => Ok(ListType::Safelist),
            "blocklist" => Ok(ListType::Blocklist),
            _ => Err("expected one of: safelist, blocklist".to_string()),
        }
    }
}

/// Perspective the list is viewed from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListViewBy {
    /// Entries keyed by sender
    Sender,
    /// Entries keyed by recipient
    Recipient,
}

impl ListViewBy {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ListViewBy::Sender => "sender",
            ListViewBy::Recipient => "recipient",
        }
    }

    /// Parse a view name
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "sender" => Ok(ListViewBy::Sender),
            "recipient" => Ok(ListViewBy::Recipient),
            _ => Err("expected one of: sender, recipient".to_string()),
        }
    }
}

/// Sort fields accepted by the list view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListOrderField {
    /// Order by sender
    Sender,
    /// Order by recipient
    Recipient,
}

impl ListOrderField {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ListOrderField::Sender => "sender",
            ListOrderField::Recipient => "recipient",
        }
    }

    /// Parse a sort field name
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "sender" => Ok(ListOrderField::Sender),
            "recipient" => Ok(ListOrderField::Recipient),
            _ => Err("expected one of: sender, recipient".to_string()),
        }
    }
}

/// View entries of a safelist or blocklist
#[derive(Debug, Clone)]
pub struct ListSearchRequest {
    /// Which list to view
    pub list_type: ListType,
    /// Perspective
    pub view_by: ListViewBy,
    /// Sort field
    pub order_by: ListOrderField,
    /// Sort direction
    pub order_direction: OrderDirection,
    /// Pagination offset
    pub offset: u32,
    /// Page size
    pub limit: u32,
    /// Substring search, only honored when ordering by recipient
    pub search: Option<String>,
}

impl Default for ListSearchRequest {
    fn default() -> Self {
        Self::new(ListType::Safelist)
    }
}

impl ListSearchRequest {
    /// Create a new view request with the appliance defaults
    pub fn new(list_type: ListType) -> Self {
        Self {
            list_type,
            view_by: ListViewBy::Recipient,
            order_by: ListOrderField::Recipient,
            order_direction: OrderDirection::Desc,
            offset: DEFAULT_LIST_OFFSET,
            limit: DEFAULT_LIST_LIMIT,
            search: None,
        }
    }

    /// Set the perspective
    pub fn view_by(mut self, view_by: ListViewBy) -> Self {
        self.view_by = view_by;
        self
    }

    /// Set the sort field
    pub fn order_by(mut self, order_by: ListOrderField) -> Self {
        self.order_by = order_by;
        self
    }

    /// Set the sort direction
    pub fn order_direction(mut self, direction: OrderDirection) -> Self {
        self.order_direction = direction;
        self
    }

    /// Set the pagination window
    pub fn page(mut self, offset: u32, limit: u32) -> Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    /// Set the substring search
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Check parameter consistency
    pub fn validate(&self) -> SmaResult<()> {
        if self.search.is_some() && self.order_by != ListOrderField::Recipient {
            return Err(ValidationError::InvalidValue {
                name: "search".to_string(),
                message: "only supported when order_by is set to 'recipient'".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Build the query string pairs
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("action".to_string(), "view".to_string()),
            ("quarantineType".to_string(), "spam".to_string()),
            ("viewBy".to_string(), self.view_by.as_str().to_string()),
            ("orderBy".to_string(), self.order_by.as_str().to_string()),
            (
                "orderDir".to_string(),
                self.order_direction.as_str().to_string(),
            ),
            ("offset".to_string(), self.offset.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if let Some(search) = &self.search {
            query.push(("search".to_string(), search.clone()));
        }
        query
    }
}

/// Address material for an add/edit operation, keyed by perspective.
///
/// The appliance pairs each perspective with its opposite side: a
/// recipient-view entry names recipient addresses plus the senders that
/// apply to them, and vice versa.
#[derive(Debug, Clone)]
pub enum EntryScope {
    /// Recipient-view entry
    Recipient {
        /// Recipient addresses the entry applies to
        recipient_addresses: Vec<String>,
        /// Senders listed for those recipients
        sender_list: Vec<String>,
    },
    /// Sender-view entry
    Sender {
        /// Sender addresses the entry applies to
        sender_addresses: Vec<String>,
        /// Recipients listed for those senders
        recipient_list: Vec<String>,
    },
}

impl EntryScope {
    /// The perspective this scope belongs to
    pub fn view_by(&self) -> ListViewBy {
        match self {
            EntryScope::Recipient { .. } => ListViewBy::Recipient,
            EntryScope::Sender { .. } => ListViewBy::Sender,
        }
    }
}

/// Add or edit a safelist/blocklist entry
#[derive(Debug, Clone)]
pub struct ListEntryRequest {
    /// Which list to mutate
    pub list_type: ListType,
    /// Address material
    pub scope: EntryScope,
}

impl ListEntryRequest {
    /// Create a new add/edit request
    pub fn new(list_type: ListType, scope: EntryScope) -> Self {
        Self { list_type, scope }
    }

    /// Check required address material
    pub fn validate(&self) -> SmaResult<()> {
        match &self.scope {
            EntryScope::Recipient {
                recipient_addresses,
                sender_list,
            } => {
                require_entries(recipient_addresses, "recipient_addresses")?;
                require_entries(sender_list, "sender_list")?;
            }
            EntryScope::Sender {
                sender_addresses,
                recipient_list,
            } => {
                require_entries(sender_addresses, "sender_addresses")?;
                require_entries(recipient_list, "recipient_list")?;
            }
        }
        Ok(())
    }

    /// Build the JSON body for the given action ("add" or "edit")
    pub fn payload(&self, action: &str) -> Value {
        let mut payload = json!({
            "action": action,
            "quarantineType": "spam",
            "viewBy": self.scope.view_by().as_str(),
        });
        match &self.scope {
            EntryScope::Recipient {
                recipient_addresses,
                sender_list,
            } => {
                payload["recipientAddresses"] = json!(recipient_addresses);
                payload["senderList"] = json!(sender_list);
            }
            EntryScope::Sender {
                sender_addresses,
                recipient_list,
            } => {
                payload["senderAddresses"] = json!(sender_addresses);
                payload["recipientList"] = json!(recipient_list);
            }
        }
        payload
    }
}

/// Address material for a delete operation
#[derive(Debug, Clone)]
pub enum DeleteScope {
    /// Delete recipient-view entries
    Recipient {
        /// Recipients whose entries are removed
        recipient_list: Vec<String>,
    },
    /// Delete sender-view entries
    Sender {
        /// Senders whose entries are removed
        sender_list: Vec<String>,
    },
}

impl DeleteScope {
    /// The perspective this scope belongs to
    pub fn view_by(&self) -> ListViewBy {
        match self {
            DeleteScope::Recipient { .. } => ListViewBy::Recipient,
            DeleteScope::Sender { .. } => ListViewBy::Sender,
        }
    }
}

/// Delete safelist/blocklist entries
#[derive(Debug, Clone)]
pub struct DeleteEntryRequest {
    /// Which list to mutate
    pub list_type: ListType,
    /// Address material
    pub scope: DeleteScope,
}

impl DeleteEntryRequest {
    /// Create a new delete request
    pub fn new(list_type: ListType, scope: DeleteScope) -> Self {
        Self { list_type, scope }
    }

    /// Check required address material
    pub fn validate(&self) -> SmaResult<()> {
        match &self.scope {
            DeleteScope::Recipient { recipient_list } => {
                require_entries(recipient_list, "recipient_list")
            }
            DeleteScope::Sender { sender_list } => require_entries(sender_list, "sender_list"),
        }
    }

    /// Build the JSON body
    pub fn payload(&self) -> Value {
        let mut payload = json!({
            "quarantineType": "spam",
            "viewBy": self.scope.view_by().as_str(),
        });
        match &self.scope {
            DeleteScope::Recipient { recipient_list } => {
                payload["recipientList"] = json!(recipient_list);
            }
            DeleteScope::Sender { sender_list } => {
                payload["senderList"] = json!(sender_list);
            }
        }
        payload
    }
}

fn require_entries(values: &[String], name: &str) -> SmaResult<()> {
    if values.iter().all(|v| v.trim().is_empty()) {
        return Err(ValidationError::MissingParameter {
            name: name.to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_type_endpoints() {
        assert_eq!(
            ListType::Safelist.endpoint(),
            "/sma/api/v2.0/quarantine/safelist"
        );
        assert_eq!(
            ListType::Blocklist.endpoint(),
            "/sma/api/v2.0/quarantine/blocklist"
        );
        assert_eq!(ListType::parse("SafeList").unwrap(), ListType::Safelist);
        assert!(ListType::parse("greylist").is_err());
    }

    #[test]
    fn test_search_defaults_match_appliance() {
        let request = ListSearchRequest::new(ListType::Safelist);
        request.validate().unwrap();
        let query = request.to_query();
        assert!(query.contains(&("action".to_string(), "view".to_string())));
        assert!(query.contains(&("quarantineType".to_string(), "spam".to_string())));
        assert!(query.contains(&("viewBy".to_string(), "recipient".to_string())));
        assert!(query.contains(&("orderBy".to_string(), "recipient".to_string())));
        assert!(query.contains(&("orderDir".to_string(), "desc".to_string())));
        assert!(query.contains(&("offset".to_string(), "0".to_string())));
        assert!(query.contains(&("limit".to_string(), "25".to_string())));
    }

    #[test]
    fn test_search_only_with_recipient_ordering() {
        let request = ListSearchRequest::new(ListType::Safelist)
            .order_by(ListOrderField::Sender)
            .search("user@example.com");
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("search"));

        let request = ListSearchRequest::new(ListType::Safelist).search("user@example.com");
        request.validate().unwrap();
    }

    #[test]
    fn test_delete_payload_recipient_view() {
        let request = DeleteEntryRequest::new(
            ListType::Safelist,
            DeleteScope::Recipient {
                recipient_list: vec!["a@x.com".to_string(), "b@x.com".to_string()],
            },
        );
        request.validate().unwrap();
        assert_eq!(
            request.payload(),
            json!({
                "quarantineType": "spam",
                "viewBy": "recipient",
                "recipientList": ["a@x.com", "b@x.com"],
            })
        );
    }

    #[test]
    fn test_delete_payload_sender_view() {
        let request = DeleteEntryRequest::new(
            ListType::Blocklist,
            DeleteScope::Sender {
                sender_list: vec!["spammer@bad.com".to_string()],
            },
        );
        assert_eq!(
            request.payload(),
            json!({
                "quarantineType": "spam",
                "viewBy": "sender",
                "senderList": ["spammer@bad.com"],
            })
        );
    }

    #[test]
    fn test_entry_payload_includes_action_and_pairs() {
        let request = ListEntryRequest::new(
            ListType::Safelist,
            EntryScope::Recipient {
                recipient_addresses: vec!["user@corp.com".to_string()],
                sender_list: vec!["news@vendor.com".to_string()],
            },
        );
        request.validate().unwrap();
        let payload = request.payload("add");
        assert_eq!(payload["action"], "add");
        assert_eq!(payload["recipientAddresses"], json!(["user@corp.com"]));
        assert_eq!(payload["senderList"], json!(["news@vendor.com"]));
        assert!(payload.get("senderAddresses").is_none());
    }

    #[test]
    fn test_entry_validation_names_missing_field() {
        let request = ListEntryRequest::new(
            ListType::Safelist,
            EntryScope::Sender {
                sender_addresses: vec![],
                recipient_list: vec!["user@corp.com".to_string()],
            },
        );
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("sender_addresses"));
    }

    #[test]
    fn test_delete_validation_names_missing_field() {
        let request = DeleteEntryRequest::new(
            ListType::Safelist,
            DeleteScope::Recipient {
                recipient_list: vec![],
            },
        );
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("recipient_list"));
    }
}
