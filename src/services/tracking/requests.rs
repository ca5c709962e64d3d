//! Request types for the tracking service.

use crate::errors::SmaResult;
use crate::services::{push_opt, require_non_empty};

/// Tracking record search.
///
/// The optional parameter names mirror what the appliance accepts; the
/// vendor documentation is thin here, so the set follows observed
/// behavior.
#[derive(Debug, Clone)]
pub struct TrackingSearchRequest {
    /// Window start (inclusive)
    pub start_date: String,
    /// Window end (exclusive)
    pub end_date: String,
    /// Restrict to a single appliance host
    pub cisco_host: Option<String>,
    /// Pagination offset
    pub offset: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
    /// Envelope sender filter
    pub sender: Option<String>,
    /// Envelope recipient filter
    pub recipient: Option<String>,
    /// Subject filter
    pub subject: Option<String>,
    /// Message identifier filter
    pub message_id: Option<i64>,
    /// Delivery status filter
    pub status: Option<String>,
}

impl TrackingSearchRequest {
    /// Create a new search over the given date window
    pub fn new(start_date: impl Into<String>, end_date: impl Into<String>) -> Self {
        Self {
            start_date: start_date.into(),
            end_date: end_date.into(),
            cisco_host: None,
            offset: None,
            limit: None,
            sender: None,
            recipient: None,
            subject: None,
            message_id: None,
            status: None,
        }
    }

    /// Filter by envelope sender
    pub fn sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Filter by envelope recipient
    pub fn recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = Some(recipient.into());
        self
    }

    /// Filter by subject
    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
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
        Ok(())
    }

    /// Build the query string pairs
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("startDate".to_string(), self.start_date.clone()),
            ("endDate".to_string(), self.end_date.clone()),
            ("searchOption".to_string(), "messages".to_string()),
        ];
        push_opt(&mut query, "ciscoHost", self.cisco_host.clone());
        push_opt(&mut query, "offset", self.offset.map(|v| v.to_string()));
        push_opt(&mut query, "limit", self.limit.map(|v| v.to_string()));
        push_opt(&mut query, "sender", self.sender.clone());
        push_opt(&mut query, "recipient", self.recipient.clone());
        push_opt(&mut query, "subject", self.subject.clone());
        push_opt(&mut query, "mid", self.message_id.map(|v| v.to_string()));
        push_opt(&mut query, "status", self.status.clone());
        query
    }
}

/// Per-message tracking details lookup
#[derive(Debug, Clone)]
pub struct TrackingDetailsRequest {
    /// Message identifier
    pub mid: i64,
    /// Injection connection identifier
    pub icid: Option<i64>,
    /// Appliance serial number
    pub serial_number: Option<String>,
    /// Window start
    pub start_date: Option<String>,
    /// Window end
    pub end_date: Option<String>,
}

impl TrackingDetailsRequest {
    /// Create a new details request
    pub fn new(mid: i64) -> Self {
        Self {
            mid,
            icid: None,
            serial_number: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Scope to an injection connection
    pub fn icid(mut self, icid: i64) -> Self {
        self.icid = Some(icid);
        self
    }

    /// Scope to an appliance serial number
    pub fn serial_number(mut self, serial: impl Into<String>) -> Self {
        self.serial_number = Some(serial.into());
        self
    }

    /// Scope to a date window
    pub fn window(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self.end_date = Some(end.into());
        self
    }

    /// Build the query string pairs
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![("mid".to_string(), self.mid.to_string())];
        push_opt(&mut query, "icid", self.icid.map(|v| v.to_string()));
        push_opt(&mut query, "serialNumber", self.serial_number.clone());
        push_opt(&mut query, "startDate", self.start_date.clone());
        push_opt(&mut query, "endDate", self.end_date.clone());
        query
    }
}
