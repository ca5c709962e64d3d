//! Authentication management for the SMA client.
//!
//! Two interchangeable credential strategies: a JWT obtained from the
//! login endpoint and cached until the orchestrator detects expiry, or a
//! basic-auth value derived from the configured credentials on every
//! request.

use crate::config::{AuthMethod, SmaConfig};
use crate::errors::{AuthenticationError, SmaResult};
use crate::transport::{ApiRequest, HttpTransport};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use http::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// Token acquisition endpoint
pub const LOGIN_ENDPOINT: &str = "/sma/api/v2.0/login";

/// Credential strategy interface.
///
/// `force_refresh` bypasses any cached credential; providers that cannot
/// refresh report it through [`CredentialProvider::supports_refresh`] so
/// the orchestrator knows not to retry on their behalf.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Produce the Authorization header value for the next request
    async fn authorization_value(
        &self,
        transport: &dyn HttpTransport,
        force_refresh: bool,
    ) -> SmaResult<String>;

    /// Whether a detected expiry can be answered with a fresh credential
    fn supports_refresh(&self) -> bool;
}

/// JWT strategy: exchanges username/passphrase for a bearer token via the
/// login endpoint and caches it in memory.
pub struct JwtCredentialProvider {
    config: Arc<SmaConfig>,
    cached: Mutex<Option<String>>,
}

impl JwtCredentialProvider {
    /// Create a new provider with an empty token cache
    pub fn new(config: Arc<SmaConfig>) -> Self {
        Self {
            config,
            cached: Mutex::new(None),
        }
    }

    /// Build the login payload: username and passphrase are each
    /// independently base64-encoded, per the AsyncOS API contract.
    fn login_payload(&self) -> Value {
        json!({
            "data": {
                "userName": BASE64.encode(self.config.username.as_bytes()),
                "passphrase": BASE64.encode(self.config.passphrase().as_bytes()),
            }
        })
    }

    /// POST the login request and extract `data.jwtToken`
    async fn login(&self, transport: &dyn HttpTransport) -> SmaResult<String> {
        let request = ApiRequest::post(LOGIN_ENDPOINT)
            .json(self.login_payload())
            .into_http(self.config.build_url(LOGIN_ENDPOINT), json_headers());

        let value = transport.execute(request).await?.into_json()?;
        let token = value
            .pointer("/data/jwtToken")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or(AuthenticationError::TokenMissing)?;
        Ok(token.to_string())
    }

    /// Current cache contents, for diagnostics and tests
    pub fn cached_token(&self) -> Option<String> {
        self.cached.lock().clone()
    }
}

#[async_trait]
impl CredentialProvider for JwtCredentialProvider {
    async fn authorization_value(
        &self,
        transport: &dyn HttpTransport,
        force_refresh: bool,
    ) -> SmaResult<String> {
        if !force_refresh {
            if let Some(token) = self.cached.lock().clone() {
                return Ok(format!("Bearer {token}"));
            }
        }

        debug!(force_refresh, "acquiring JWT token");
        let token = self.login(transport).await?;
        *self.cached.lock() = Some(token.clone());
        Ok(format!("Bearer {token}"))
    }

    fn supports_refresh(&self) -> bool {
        true
    }
}

impl std::fmt::Debug for JwtCredentialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCredentialProvider")
            .field("has_cached_token", &self.cached.lock().is_some())
            .finish()
    }
}

/// Basic-auth strategy: derives the header value from configuration on
/// every call. Stateless, so expiry detection never applies.
pub struct BasicCredentialProvider {
    config: Arc<SmaConfig>,
}

impl BasicCredentialProvider {
    /// Create a new provider
    pub fn new(config: Arc<SmaConfig>) -> Self {
        Self { config }
    }
}

#[async_trait]
impl CredentialProvider for BasicCredentialProvider {
    async fn authorization_value(
        &self,
        _transport: &dyn HttpTransport,
        _force_refresh: bool,
    ) -> SmaResult<String> {
        let pair = format!("{}:{}", self.config.username, self.config.passphrase());
        Ok(format!("Basic {}", BASE64.encode(pair.as_bytes())))
    }

    fn supports_refresh(&self) -> bool {
        false
    }
}

impl std::fmt::Debug for BasicCredentialProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicCredentialProvider").finish()
    }
}

/// Wraps the selected provider and builds outgoing request headers
#[derive(Clone)]
pub struct AuthManager {
    provider: Arc<dyn CredentialProvider>,
}

impl AuthManager {
    /// Select the provider matching the configured auth method
    pub fn for_config(config: Arc<SmaConfig>) -> Self {
        let provider: Arc<dyn CredentialProvider> = match config.auth_method {
            AuthMethod::Jwt => Arc::new(JwtCredentialProvider::new(config)),
            AuthMethod::Basic => Arc::new(BasicCredentialProvider::new(config)),
        };
        Self { provider }
    }

    /// Wrap a custom provider
    pub fn with_provider(provider: Arc<dyn CredentialProvider>) -> Self {
        Self { provider }
    }

    /// Build headers for an authenticated request, acquiring the
    /// credential if needed
    pub async fn request_headers(
        &self,
        transport: &dyn HttpTransport,
        force_refresh: bool,
    ) -> SmaResult<HeaderMap> {
        let mut headers = json_headers();
        let value = self
            .provider
            .authorization_value(transport, force_refresh)
            .await?;
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&value).map_err(|_| AuthenticationError::InvalidHeader)?,
        );
        Ok(headers)
    }

    /// Whether the underlying provider can answer an expiry with a
    /// fresh credential
    pub fn supports_refresh(&self) -> bool {
        self.provider.supports_refresh()
    }
}

impl std::fmt::Debug for AuthManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthManager")
            .field("supports_refresh", &self.supports_refresh())
            .finish()
    }
}

/// Default JSON headers shared by every request
pub(crate) fn json_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}
