//! Service layer: one module per API domain, each split into request
//! types, response types and the service implementation.

pub mod lists;
pub mod quarantine;
pub mod reporting;
pub mod tracking;

pub use lists::{ListsService, ListsServiceTrait};
pub use quarantine::{QuarantineService, QuarantineServiceTrait};
pub use reporting::{ReportingService, ReportingServiceTrait};
pub use tracking::{TrackingService, TrackingServiceTrait};

use crate::errors::{ResponseError, SmaResult, ValidationError};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Map a JSON payload into a typed response, reporting mismatches as
/// response-shape errors rather than panics.
pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> SmaResult<T> {
    serde_json::from_value(value).map_err(|e| ResponseError::from(e).into())
}

/// Reject empty required string parameters, naming the offending field.
pub(crate) fn require_non_empty(value: &str, name: &str) -> SmaResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingParameter {
            name: name.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Append a query pair when the value is present.
pub(crate) fn push_opt(query: &mut Vec<(String, String)>, name: &str, value: Option<String>) {
    if let Some(value) = value {
        query.push((name.to_string(), value));
    }
}
