//! API key credentials

use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::AUTHORIZATION;
use reqwest::RequestBuilder;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "FIVETRAN_API_KEY";

/// Environment variable holding the API secret
pub const API_SECRET_ENV: &str = "FIVETRAN_API_SECRET";

/// API key and secret used for Basic authentication
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Create credentials from a key and secret
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Read credentials from `FIVETRAN_API_KEY` and `FIVETRAN_API_SECRET`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV).map_err(|_| Error::missing_field(API_KEY_ENV))?;
        let api_secret =
            std::env::var(API_SECRET_ENV).map_err(|_| Error::missing_field(API_SECRET_ENV))?;
        let credentials = Self::new(api_key, api_secret);
        credentials.validate()?;
        Ok(credentials)
    }

    /// The public half of the pair
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Reject empty keys or secrets
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(Error::invalid_value("api_key", "must not be empty"));
        }
        if self.api_secret.is_empty() {
            return Err(Error::invalid_value("api_secret", "must not be empty"));
        }
        Ok(())
    }

    /// Value for the `Authorization` header
    pub fn authorization_header(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.api_key, self.api_secret));
        format!("Basic {token}")
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.header(AUTHORIZATION, self.authorization_header())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
