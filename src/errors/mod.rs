//! Error types for the SMA client.
//!
//! Maps the failure classes of the AsyncOS API surface to semantic error
//! types: configuration, parameter validation, authentication, network,
//! protocol (HTTP status) and response-shape errors.

use thiserror::Error;

/// Result type for SMA operations
pub type SmaResult<T> = Result<T, SmaError>;

/// Root error type for the SMA integration
#[derive(Error, Debug)]
pub enum SmaError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Parameter validation error
    #[error("Parameter error: {0}")]
    Validation(#[from] ValidationError),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    /// Non-200 response from the API, carrying status code and raw body
    #[error("API call failed. Status code: {status}. Response: {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body text
        body: String,
    },

    /// Response parsing error
    #[error("Response error: {0}")]
    Response(#[from] ResponseError),
}

impl SmaError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "SMA_CONFIG",
            Self::Validation(_) => "SMA_PARAM",
            Self::Authentication(_) => "SMA_AUTH",
            Self::Network(_) => "SMA_NETWORK",
            Self::Api { .. } => "SMA_API",
            Self::Response(_) => "SMA_RESPONSE",
        }
    }

    /// Heuristic expiry detection: the appliance reports an expired or
    /// invalid JWT only through its error text, so a failure whose rendered
    /// message contains "token" (case-insensitive) is treated as credential
    /// expiry. Kept as a single named predicate so it can be swapped for a
    /// structured error code if the API ever grows one.
    pub fn hints_expired_token(&self) -> bool {
        self.to_string().to_ascii_lowercase().contains("token")
    }

    /// Whether the failure happened before any network call was made
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Validation(_))
    }
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// Missing required field
    #[error("Configuration field '{name}' is required")]
    MissingField {
        /// Field name
        name: &'static str,
    },

    /// Host URL failed to parse
    #[error("Invalid host URL '{host}': {message}")]
    InvalidHost {
        /// The offending host value
        host: String,
        /// Parse error detail
        message: String,
    },

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(String),
}

/// Parameter validation errors, detected locally before any network call
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Missing required parameter
    #[error("Parameter '{name}' is required")]
    MissingParameter {
        /// Parameter name
        name: String,
    },

    /// Out-of-set or malformed parameter value
    #[error("Invalid parameter '{name}': {message}")]
    InvalidValue {
        /// Parameter name
        name: String,
        /// What was expected
        message: String,
    },

    /// Identifier that must be an integer
    #[error("Parameter '{name}' must be a valid integer")]
    NotAnInteger {
        /// Parameter name
        name: String,
    },

    /// Action name outside the supported set
    #[error("Unsupported action '{name}'")]
    UnsupportedAction {
        /// Action name
        name: String,
    },
}

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthenticationError {
    /// Login response did not contain a token
    #[error("JWT token not found in response")]
    TokenMissing,

    /// Credential could not be encoded into a header value
    #[error("Credential produced an invalid header value")]
    InvalidHeader,
}

/// Network errors, classified separately from HTTP-status failures
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Connection failed (refused, reset, DNS)
    #[error("Error connecting to server: {message}")]
    ConnectionFailed {
        /// Transport error detail
        message: String,
    },

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Other transport-level failure
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout
        } else if err.is_connect() {
            NetworkError::ConnectionFailed {
                message: err.to_string(),
            }
        } else {
            NetworkError::Http(err.to_string())
        }
    }
}

/// Response parsing errors
#[derive(Error, Debug)]
pub enum ResponseError {
    /// Body advertised as JSON failed to parse
    #[error("Invalid JSON response from server: {body}")]
    InvalidJson {
        /// Raw body text
        body: String,
    },

    /// Successful response missing an expected field or shape
    #[error("Error parsing response: {message}")]
    UnexpectedShape {
        /// What was wrong
        message: String,
    },
}

impl From<serde_json::Error> for ResponseError {
    fn from(err: serde_json::Error) -> Self {
        ResponseError::UnexpectedShape {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_message_carries_status_and_body() {
        let err = SmaError::Api {
            status: 503,
            body: "upstream unavailable".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("503"));
        assert!(rendered.contains("upstream unavailable"));
    }

    #[test]
    fn test_hints_expired_token_matches_case_insensitively() {
        let err = SmaError::Api {
            status: 401,
            body: r#"{"error":"Token Expired"}"#.to_string(),
        };
        assert!(err.hints_expired_token());

        let err = SmaError::Api {
            status: 401,
            body: r#"{"error":"unauthorized"}"#.to_string(),
        };
        assert!(!err.hints_expired_token());
    }

    #[test]
    fn test_hints_expired_token_ignores_unrelated_failures() {
        let err = SmaError::Network(NetworkError::Timeout);
        assert!(!err.hints_expired_token());

        let err = SmaError::Validation(ValidationError::MissingParameter {
            name: "start_date".to_string(),
        });
        assert!(!err.hints_expired_token());
    }

    #[test]
    fn test_validation_error_names_offending_field() {
        let err = SmaError::Validation(ValidationError::MissingParameter {
            name: "message_id".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Parameter error: Parameter 'message_id' is required"
        );
        assert!(err.is_local());
    }

    #[test]
    fn test_token_missing_message() {
        let err = SmaError::Authentication(AuthenticationError::TokenMissing);
        assert!(err.to_string().contains("JWT token not found in response"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SmaError::Api {
                status: 500,
                body: String::new()
            }
            .error_code(),
            "SMA_API"
        );
        assert_eq!(
            SmaError::Network(NetworkError::Timeout).error_code(),
            "SMA_NETWORK"
        );
    }
}
