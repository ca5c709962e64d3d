//! Request types for the reporting service.

use super::REPORTING_ENDPOINT;
use crate::errors::{SmaResult, ValidationError};
use crate::services::{push_opt, require_non_empty};
use crate::types::OrderDirection;

/// Filter operators accepted by the reporting endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFilterOperator {
    /// Prefix match
    BeginsWith,
    /// Exact match
    Is,
}

impl ReportFilterOperator {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFilterOperator::BeginsWith => "begins_with",
            ReportFilterOperator::Is => "is",
        }
    }

    /// Parse a filter operator name
    pub fn parse(value: &str) -> Result<Self, String> {
        match value {
            "begins_with" => Ok(ReportFilterOperator::BeginsWith),
            "is" => Ok(ReportFilterOperator::Is),
            _ => Err("expected one of: begins_with, is".to_string()),
        }
    }
}

/// Statistics report request.
///
/// `report_type` (and `counter` when present) become path segments, so
/// neither may contain a slash.
#[derive(Debug, Clone)]
pub struct StatisticsReportRequest {
    /// Report resource name, e.g. `mail_incoming_traffic_summary`
    pub report_type: String,
    /// Optional counter within the report
    pub counter: Option<String>,
    /// Window start (inclusive)
    pub start_date: String,
    /// Window end (exclusive)
    pub end_date: String,
    /// Device class, defaults to `esa`
    pub device_type: Option<String>,
    /// Device group filter
    pub device_group_name: Option<String>,
    /// Device name filter
    pub device_name: Option<String>,
    /// Attribute to filter on
    pub filter_by: Option<String>,
    /// Filter operator
    pub filter_operator: Option<ReportFilterOperator>,
    /// Filter value
    pub filter_value: Option<String>,
    /// Sort field
    pub order_by: Option<String>,
    /// Sort direction
    pub order_direction: Option<OrderDirection>,
    /// Pagination offset
    pub offset: Option<u32>,
    /// Page size
    pub limit: Option<u32>,
    /// Top-N restriction
    pub top: Option<u32>,
}

impl StatisticsReportRequest {
    /// Create a new report request over the given window
    pub fn new(
        report_type: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            report_type: report_type.into(),
            counter: None,
            start_date: start_date.into(),
            end_date: end_date.into(),
            device_type: None,
            device_group_name: None,
            device_name: None,
            filter_by: None,
            filter_operator: None,
            filter_value: None,
            order_by: None,
            order_direction: None,
            offset: None,
            limit: None,
            top: None,
        }
    }

    /// Narrow to a single counter
    pub fn counter(mut self, counter: impl Into<String>) -> Self {
        self.counter = Some(counter.into());
        self
    }

    /// Override the device class
    pub fn device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = Some(device_type.into());
        self
    }

    /// Filter report rows
    pub fn filter(
        mut self,
        filter_by: impl Into<String>,
        operator: ReportFilterOperator,
        value: impl Into<String>,
    ) -> Self {
        self.filter_by = Some(filter_by.into());
        self.filter_operator = Some(operator);
        self.filter_value = Some(value.into());
        self
    }

    /// Restrict to the top N rows
    pub fn top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    /// Check required parameters
    pub fn validate(&self) -> SmaResult<()> {
        require_non_empty(&self.report_type, "report_type")?;
        require_non_empty(&self.start_date, "start_date")?;
        require_non_empty(&self.end_date, "end_date")?;
        if self.report_type.contains('/') {
            return Err(ValidationError::InvalidValue {
                name: "report_type".to_string(),
                message: "must not contain '/'".to_string(),
            }
            .into());
        }
        if self.counter.as_deref().is_some_and(|c| c.contains('/')) {
            return Err(ValidationError::InvalidValue {
                name: "counter".to_string(),
                message: "must not contain '/'".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Build the templated endpoint path
    pub fn endpoint(&self) -> String {
        match &self.counter {
            Some(counter) => format!("{REPORTING_ENDPOINT}/{}/{counter}", self.report_type),
            None => format!("{REPORTING_ENDPOINT}/{}", self.report_type),
        }
    }

    /// Build the query string pairs
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = vec![
            ("startDate".to_string(), self.start_date.clone()),
            ("endDate".to_string(), self.end_date.clone()),
            (
                "device_type".to_string(),
                self.device_type.clone().unwrap_or_else(|| "esa".to_string()),
            ),
        ];
        push_opt(
            &mut query,
            "device_group_name",
            self.device_group_name.clone(),
        );
        push_opt(&mut query, "device_name", self.device_name.clone());
        push_opt(&mut query, "filterBy", self.filter_by.clone());
        push_opt(
            &mut query,
            "filterOperator",
            self.filter_operator.map(|v| v.as_str().to_string()),
        );
        push_opt(&mut query, "filterValue", self.filter_value.clone());
        push_opt(&mut query, "orderBy", self.order_by.clone());
        push_opt(
            &mut query,
            "orderDir",
            self.order_direction.map(|v| v.as_str().to_string()),
        );
        push_opt(&mut query, "offset", self.offset.map(|v| v.to_string()));
        push_opt(&mut query, "limit", self.limit.map(|v| v.to_string()));
        push_opt(&mut query, "top", self.top.map(|v| v.to_string()));
        query
    }
}
