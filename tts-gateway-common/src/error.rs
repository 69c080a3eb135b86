//! Error types for the gateway.
//!
//! Everything a request can fail with is an [`Error`]. The HTTP layer decides
//! what each variant turns into on the wire:
//!
//! - [`AuthError`]: the bearer guard rejected the request (401)
//! - `Error::Validation`: the body parsed but a field is unusable (422)
//! - `Error::Api`: Workers AI answered with something other than 200, or not at all
//! - [`ConfigError`], `Error::Io`, `Error::Process`: local failures, never
//!   described to the caller

use thiserror::Error;

/// Unified error type for the gateway.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors (missing env vars, invalid values)
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Authentication errors (missing header, bad scheme, wrong token)
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Provider API errors with endpoint and HTTP status context.
    ///
    /// A `status_code` of 0 means no response was received at all
    /// (connection failure or a broken body stream).
    #[error("API error for {endpoint} (HTTP {status_code}): {message}")]
    Api {
        /// The API endpoint that was called
        endpoint: String,
        /// HTTP status code returned by the API
        status_code: u16,
        /// Error message from the API or describing the failure
        message: String,
    },

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// File system I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Speech client subprocess errors
    #[error("Process error: {0}")]
    Process(String),
}

impl Error {
    /// Create a new API error with endpoint, status code, and message.
    ///
    /// # Example
    ///
    /// ```
    /// use tts_gateway_common::error::Error;
    ///
    /// let err = Error::api(
    ///     "https://api.example.com/v1/run",
    ///     503,
    ///     "Service unavailable"
    /// );
    /// assert!(err.to_string().contains("api.example.com"));
    /// assert!(err.to_string().contains("503"));
    /// ```
    pub fn api(endpoint: impl Into<String>, status_code: u16, message: impl Into<String>) -> Self {
        Error::Api {
            endpoint: endpoint.into(),
            status_code,
            message: message.into(),
        }
    }

    /// Create a new validation error.
    ///
    /// # Example
    ///
    /// ```
    /// use tts_gateway_common::error::Error;
    ///
    /// let err = Error::validation("text cannot be empty");
    /// assert!(err.to_string().contains("text cannot be empty"));
    /// ```
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Create a new subprocess error.
    ///
    /// # Example
    ///
    /// ```
    /// use tts_gateway_common::error::Error;
    ///
    /// let err = Error::process("talk.py exited with status 1");
    /// assert!(err.to_string().contains("exited with status 1"));
    /// ```
    pub fn process(message: impl Into<String>) -> Self {
        Error::Process(message.into())
    }
}

/// Configuration errors.
///
/// These errors occur when loading configuration from environment variables
/// or when a provider needs a setting that was never supplied.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set
    #[error("Required environment variable {0} is not set")]
    MissingEnvVar(String),

    /// An environment variable has an invalid value
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl ConfigError {
    /// Create a new missing environment variable error.
    pub fn missing_env_var(name: impl Into<String>) -> Self {
        ConfigError::MissingEnvVar(name.into())
    }

    /// Create a new invalid value error.
    pub fn invalid_value(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue(name.into(), reason.into())
    }
}

/// Authentication errors.
///
/// All variants are reported to clients identically; the distinction only
/// shows up in logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `Authorization` header was sent
    #[error("Missing Authorization header")]
    MissingHeader,

    /// The header scheme is not `Bearer`
    #[error("Unsupported authorization scheme '{0}'")]
    InvalidScheme(String),

    /// The bearer token does not match the shared secret
    #[error("Invalid bearer token")]
    InvalidToken,
}

/// Result type alias using the unified Error type.
pub type Result<T> = std::result::Result<T, Error>;
