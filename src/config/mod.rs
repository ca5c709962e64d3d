//! Configuration management for the SMA client.
//!
//! Supports configuration via explicit values, environment variables and
//! a builder. The configuration is read once at client construction and
//! never mutated afterwards.

use crate::errors::{ConfigurationError, SmaResult};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use url::Url;

/// Credential strategy selected at configuration time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMethod {
    /// Exchange username/passphrase for a short-lived JWT via the login
    /// endpoint; the token is cached and refreshed on detected expiry.
    Jwt,
    /// Derive a basic-auth header from username/passphrase on every
    /// request; nothing is cached and nothing can expire.
    Basic,
}

impl AuthMethod {
    /// Parse an auth method name
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.to_ascii_lowercase().as_str() {
            "jwt" | "token" => Ok(AuthMethod::Jwt),
            "basic" => Ok(AuthMethod::Basic),
            _ => Err("expected one of: jwt, basic".to_string()),
        }
    }
}

/// Configuration for the SMA client
#[derive(Clone)]
pub struct SmaConfig {
    /// Appliance base URL, trailing slash stripped
    pub base_url: String,
    /// API username
    pub username: String,
    /// API passphrase
    pub(crate) passphrase: SecretString,
    /// Whether to verify the appliance TLS certificate
    pub verify_tls: bool,
    /// Credential strategy
    pub auth_method: AuthMethod,
    /// Request timeout
    pub timeout: Duration,
}

impl SmaConfig {
    /// Create a new configuration builder
    pub fn builder() -> SmaConfigBuilder {
        SmaConfigBuilder::new()
    }

    /// Create configuration from environment variables
    ///
    /// Reads:
    /// - `SMA_HOST` - appliance base URL
    /// - `SMA_USERNAME` - API username
    /// - `SMA_PASSPHRASE` - API passphrase
    /// - `SMA_VERIFY_TLS` - "true"/"false", defaults to false
    /// - `SMA_AUTH_METHOD` - "jwt" (default) or "basic"
    pub fn from_env() -> SmaResult<Self> {
        let host = std::env::var("SMA_HOST")
            .map_err(|_| ConfigurationError::EnvVar("SMA_HOST is not set".to_string()))?;
        let username = std::env::var("SMA_USERNAME")
            .map_err(|_| ConfigurationError::EnvVar("SMA_USERNAME is not set".to_string()))?;
        let passphrase = std::env::var("SMA_PASSPHRASE")
            .map_err(|_| ConfigurationError::EnvVar("SMA_PASSPHRASE is not set".to_string()))?;

        let mut builder = SmaConfigBuilder::new()
            .host(host)
            .username(username)
            .passphrase(passphrase);

        if let Ok(verify) = std::env::var("SMA_VERIFY_TLS") {
            builder = builder.verify_tls(matches!(verify.as_str(), "true" | "1"));
        }
        if let Ok(method) = std::env::var("SMA_AUTH_METHOD") {
            let method = AuthMethod::parse(&method)
                .map_err(|message| ConfigurationError::EnvVar(format!("SMA_AUTH_METHOD: {message}")))?;
            builder = builder.auth_method(method);
        }

        builder.build()
    }

    /// Expose the passphrase for credential derivation
    pub(crate) fn passphrase(&self) -> &str {
        self.passphrase.expose_secret()
    }

    /// Build a full URL for an endpoint path
    pub fn build_url(&self, endpoint: &str) -> String {
        if endpoint.starts_with('/') {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}/{}", self.base_url, endpoint)
        }
    }
}

impl std::fmt::Debug for SmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmaConfig")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("passphrase", &"[REDACTED]")
            .field("verify_tls", &self.verify_tls)
            .field("auth_method", &self.auth_method)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Builder for [`SmaConfig`]
#[derive(Debug, Default)]
pub struct SmaConfigBuilder {
    host: Option<String>,
    username: Option<String>,
    passphrase: Option<String>,
    verify_tls: bool,
    auth_method: Option<AuthMethod>,
    timeout: Option<Duration>,
}

impl SmaConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the appliance host URL
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the API username
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the API passphrase
    pub fn passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase = Some(passphrase.into());
        self
    }

    /// Set TLS certificate verification (defaults to false, matching the
    /// self-signed certificates most appliances ship with)
    pub fn verify_tls(mut self, verify: bool) -> Self {
        self.verify_tls = verify;
        self
    }

    /// Set the credential strategy (defaults to [`AuthMethod::Jwt`])
    pub fn auth_method(mut self, method: AuthMethod) -> Self {
        self.auth_method = Some(method);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate and build the configuration
    pub fn build(self) -> SmaResult<SmaConfig> {
        let host = self
            .host
            .filter(|h| !h.is_empty())
            .ok_or(ConfigurationError::MissingField { name: "host" })?;
        let username = self
            .username
            .filter(|u| !u.is_empty())
            .ok_or(ConfigurationError::MissingField { name: "username" })?;
        let passphrase = self
            .passphrase
            .filter(|p| !p.is_empty())
            .ok_or(ConfigurationError::MissingField { name: "passphrase" })?;

        let parsed = Url::parse(&host).map_err(|e| ConfigurationError::InvalidHost {
            host: host.clone(),
            message: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigurationError::InvalidHost {
                host,
                message: "scheme must be http or https".to_string(),
            }
            .into());
        }

        Ok(SmaConfig {
            base_url: host.trim_end_matches('/').to_string(),
            username,
            passphrase: SecretString::new(passphrase),
            verify_tls: self.verify_tls,
            auth_method: self.auth_method.unwrap_or(AuthMethod::Jwt),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(crate::DEFAULT_TIMEOUT_SECS)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> SmaConfigBuilder {
        SmaConfigBuilder::new()
            .host("https://sma.example.com")
            .username("admin")
            .passphrase("secret")
    }

    #[test]
    fn test_build_defaults() {
        let config = builder().build().unwrap();
        assert_eq!(config.base_url, "https://sma.example.com");
        assert_eq!(config.auth_method, AuthMethod::Jwt);
        assert!(!config.verify_tls);
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let config = builder().host("https://sma.example.com/").build().unwrap();
        assert_eq!(config.base_url, "https://sma.example.com");
        assert_eq!(
            config.build_url("/sma/api/v2.0/login"),
            "https://sma.example.com/sma/api/v2.0/login"
        );
    }

    #[test]
    fn test_missing_fields_rejected() {
        let err = SmaConfigBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("host"));

        let err = SmaConfigBuilder::new()
            .host("https://sma.example.com")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("username"));
    }

    #[test]
    fn test_invalid_host_rejected() {
        let err = builder().host("not a url").build().unwrap_err();
        assert!(err.to_string().contains("Invalid host URL"));

        let err = builder().host("ftp://sma.example.com").build().unwrap_err();
        assert!(err.to_string().contains("scheme"));
    }

    #[test]
    fn test_auth_method_parse() {
        assert_eq!(AuthMethod::parse("jwt").unwrap(), AuthMethod::Jwt);
        assert_eq!(AuthMethod::parse("Basic").unwrap(), AuthMethod::Basic);
        assert!(AuthMethod::parse("oauth").is_err());
    }

    #[test]
    fn test_debug_redacts_passphrase() {
        let rendered = format!("{:?}", builder().build().unwrap());
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("secret"));
    }
}
