//! Cisco Secure Email & Web Manager (SMA) API Client
//!
//! Production-ready client for the AsyncOS REST API:
//! - Spam and general (policy/virus/outbreak) quarantine search, details,
//!   release and delete
//! - Safelist/blocklist administration
//! - Message tracking search and details
//! - Statistics reporting
//! - Quarantined-attachment retrieval
//!
//! Authentication exchanges the configured username/passphrase for a JWT
//! and transparently re-authenticates once when the appliance reports an
//! expired token; a static basic-auth strategy is available for
//! deployments that use it.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sma_client::services::quarantine::SpamSearchRequest;
//! use sma_client::services::QuarantineServiceTrait;
//! use sma_client::{SmaClient, SmaConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SmaConfig::builder()
//!         .host("https://sma.example.com")
//!         .username("admin")
//!         .passphrase("passphrase")
//!         .build()?;
//!     let client = SmaClient::new(config)?;
//!
//!     let page = client
//!         .quarantine()
//!         .search_spam(SpamSearchRequest::new(
//!             "2024-01-01T00:00:00.000Z",
//!             "2024-02-01T00:00:00.000Z",
//!         ))
//!         .await?;
//!     println!("{} quarantined messages", page.total_count());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod transport;
pub mod types;

// Services
pub mod services;

// Flat action interface
pub mod actions;

// Testing utilities
pub mod mocks;

// Re-exports for convenience
pub use actions::ActionRunner;
pub use client::SmaClient;
pub use config::{AuthMethod, SmaConfig, SmaConfigBuilder};
pub use errors::{SmaError, SmaResult};
pub use types::{ActionStatus, ResultEnvelope};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Create a client with the given configuration
pub fn create_client(config: SmaConfig) -> SmaResult<SmaClient> {
    SmaClient::new(config)
}

/// Create a client from environment variables
///
/// Reads:
/// - `SMA_HOST` - appliance base URL
/// - `SMA_USERNAME` - API username
/// - `SMA_PASSPHRASE` - API passphrase
/// - `SMA_VERIFY_TLS` - "true"/"false", defaults to false
/// - `SMA_AUTH_METHOD` - "jwt" (default) or "basic"
pub fn create_client_from_env() -> SmaResult<SmaClient> {
    let config = SmaConfig::from_env()?;
    create_client(config)
}
