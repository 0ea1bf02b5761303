//! Error types for the Fivetran client
//!
//! Two layers live here:
//!
//! - [`ClassifiedError`] is the failure value every HTTP operation produces.
//!   Its [`ErrorKind`] is what retry decisions and callers branch on.
//! - [`Error`] is the crate-wide error for everything around the API calls
//!   (configuration, files, CLI). API and signature failures fold into it.

use std::fmt;
use thiserror::Error;

use crate::webhook::SignatureError;

// ============================================================================
// Classified API Errors
// ============================================================================

/// Category of a failed API call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// HTTP 401
    Unauthorized,
    /// HTTP 404
    NotFound,
    /// HTTP 429
    RateLimited,
    /// HTTP 5xx
    ServerError,
    /// Any other non-2xx status, or a transport/decode failure
    Unknown,
}

impl ErrorKind {
    /// Whether the default retry policy retries this kind
    pub fn is_transient(self) -> bool {
        matches!(self, Self::RateLimited | Self::ServerError)
    }

    /// Stable lowercase name, used in logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::ServerError => "server_error",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed API call, classified by kind
///
/// Built once per failed response or transport failure and never mutated.
/// `retry_after_seconds` is only ever present on [`ErrorKind::RateLimited`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ClassifiedError {
    kind: ErrorKind,
    message: String,
    http_status: Option<u16>,
    retry_after_seconds: Option<u64>,
}

impl ClassifiedError {
    fn new(kind: ErrorKind, message: impl Into<String>, http_status: Option<u16>) -> Self {
        Self {
            kind,
            message: message.into(),
            http_status,
            retry_after_seconds: None,
        }
    }

    /// 401 from the API
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message, Some(401))
    }

    /// 404 from the API
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message, Some(404))
    }

    /// 429 from the API, with the server's wait hint if it sent a usable one
    pub fn rate_limited(message: impl Into<String>, retry_after_seconds: Option<u64>) -> Self {
        Self {
            retry_after_seconds,
            ..Self::new(ErrorKind::RateLimited, message, Some(429))
        }
    }

    /// 5xx from the API
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ServerError, message, Some(status))
    }

    /// Any other non-success status
    pub fn unexpected_status(status: u16, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message, Some(status))
    }

    /// Connection refused, timeout, undecodable body, ...
    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, message, None)
    }

    /// Classify a non-success HTTP status
    ///
    /// `retry_after_seconds` is dropped unless the status is 429.
    pub fn from_status(
        status: u16,
        message: impl Into<String>,
        retry_after_seconds: Option<u64>,
    ) -> Self {
        match status {
            401 => Self::unauthorized(message),
            404 => Self::not_found(message),
            429 => Self::rate_limited(message, retry_after_seconds),
            500..=599 => Self::server_error(status, message),
            _ => Self::unexpected_status(status, message),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn http_status(&self) -> Option<u16> {
        self.http_status
    }

    pub fn retry_after_seconds(&self) -> Option<u64> {
        self.retry_after_seconds
    }
}

// ============================================================================
// Crate Error
// ============================================================================

/// The main error type for the crate
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // API Errors
    // ============================================================================
    #[error("API request failed: {0}")]
    Api(#[from] ClassifiedError),

    #[error("Webhook rejected: {0}")]
    Signature(#[from] SignatureError),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The classified API error, if this is one
    pub fn as_classified(&self) -> Option<&ClassifiedError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Check if this error is retryable under the default policy
    pub fn is_retryable(&self) -> bool {
        self.as_classified()
            .is_some_and(|e| e.kind().is_transient())
    }
}

/// Result type alias for the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
