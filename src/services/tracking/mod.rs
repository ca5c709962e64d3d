//! Message tracking operations: searching delivery records and fetching
//! per-message tracking details.

mod requests;
mod responses;
mod service;

pub use requests::*;
pub use responses::*;
pub use service::{TrackingService, TrackingServiceTrait};

/// Tracking search endpoint
pub const TRACKING_MESSAGES_ENDPOINT: &str = "/sma/api/v2.0/message-tracking/messages";
/// Tracking details endpoint
pub const TRACKING_DETAILS_ENDPOINT: &str = "/sma/api/v2.0/message-tracking/details";
