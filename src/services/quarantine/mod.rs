//! Quarantine operations: searching, inspecting, releasing and deleting
//! held messages in the spam and general (policy/virus/outbreak)
//! quarantines, plus quarantined-attachment retrieval.

mod requests;
mod responses;
mod service;

pub use requests::*;
pub use responses::*;
pub use service::{QuarantineService, QuarantineServiceTrait};

/// Quarantine message search, release (POST) and delete (DELETE) endpoint
pub const MESSAGES_ENDPOINT: &str = "/sma/api/v2.0/quarantine/messages";
/// Quarantine message details endpoint
pub const MESSAGE_DETAILS_ENDPOINT: &str = "/sma/api/v2.0/quarantine/messages/details";
/// Quarantined attachment download endpoint
pub const ATTACHMENT_ENDPOINT: &str = "/sma/api/v2.0/quarantine/messages/attachment";
