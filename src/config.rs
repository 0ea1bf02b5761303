//! Client configuration
//!
//! Settings are read from a YAML file and then overridden from the
//! environment, so credentials never have to live on disk:
//!
//! ```yaml
//! api_key: my-key
//! base_url: https://api.fivetran.com/v1
//! timeout_secs: 30
//! page_size: 100
//! retry:
//!   max_attempts: 3
//!   base_delay_ms: 1000
//!   max_delay_ms: 30000
//!   jitter: true
//! rate_limit:
//!   requests_per_second: 5
//!   burst_size: 10
//! webhook:
//!   listen_port: 8080
//!   path: /webhooks
//! ```

use crate::auth::{Credentials, API_KEY_ENV, API_SECRET_ENV};
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig, DEFAULT_BASE_URL, DEFAULT_PAGE_SIZE};
use crate::retry::RetryPolicy;
use crate::webhook::WebhookSecret;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Environment variable overriding `base_url`
pub const BASE_URL_ENV: &str = "FIVETRAN_BASE_URL";

/// Environment variable overriding `webhook.secret`
pub const WEBHOOK_SECRET_ENV: &str = "FIVETRAN_WEBHOOK_SECRET";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete client configuration
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API key
    #[serde(default)]
    pub api_key: Option<String>,

    /// API secret
    #[serde(default)]
    pub api_secret: Option<String>,

    /// API root
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Items requested per page when listing
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Retry settings
    #[serde(default)]
    pub retry: RetryConfig,

    /// Client-side throttling, off when absent
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Inbound webhook receiver settings
    #[serde(default)]
    pub webhook: WebhookConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            page_size: default_page_size(),
            retry: RetryConfig::default(),
            rate_limit: None,
            webhook: WebhookConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

// ============================================================================
// Retry Config
// ============================================================================

/// Retry settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Cap on computed delays in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Add random jitter to each delay
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            jitter: default_true(),
        }
    }
}

impl RetryConfig {
    /// Build the policy these settings describe
    pub fn to_policy(&self) -> Result<RetryPolicy> {
        RetryPolicy::builder()
            .max_attempts(self.max_attempts)
            .base_delay(Duration::from_millis(self.base_delay_ms))
            .max_delay(Duration::from_millis(self.max_delay_ms))
            .jitter(self.jitter)
            .build()
    }
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_max_delay_ms() -> u64 {
    30000
}

fn default_true() -> bool {
    true
}

// ============================================================================
// Webhook Config
// ============================================================================

/// Inbound webhook receiver settings
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Shared signing secret
    #[serde(default)]
    pub secret: Option<String>,

    /// Port the receiver binds
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,

    /// Route callbacks are posted to
    #[serde(default = "default_webhook_path")]
    pub path: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            secret: None,
            listen_port: default_listen_port(),
            path: default_webhook_path(),
        }
    }
}

fn default_listen_port() -> u16 {
    8080
}

fn default_webhook_path() -> String {
    "/webhooks".to_string()
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("secret", &redact(self.secret.as_ref()))
            .field("listen_port", &self.listen_port)
            .field("path", &self.path)
            .finish()
    }
}

// ============================================================================
// Loading
// ============================================================================

impl ClientConfig {
    /// Parse a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read a YAML file without applying environment overrides
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load from an optional file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from a lookup function; empty values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(key) = lookup(API_KEY_ENV) {
            self.api_key = Some(key);
        }
        if let Some(secret) = lookup(API_SECRET_ENV) {
            self.api_secret = Some(secret);
        }
        if let Some(url) = lookup(BASE_URL_ENV) {
            self.base_url = url;
        }
        if let Some(secret) = lookup(WEBHOOK_SECRET_ENV) {
            self.webhook.secret = Some(secret);
        }
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)?;

        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be at least 1"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be at least 1"));
        }
        if matches!(self.webhook.secret.as_deref(), Some("")) {
            return Err(Error::invalid_value("webhook.secret", "must not be empty"));
        }
        if !self.webhook.path.starts_with('/') {
            return Err(Error::invalid_value("webhook.path", "must start with '/'"));
        }

        self.retry.to_policy()?;
        Ok(())
    }

    /// Credentials for API calls
    pub fn credentials(&self) -> Result<Credentials> {
        let api_key = self
            .api_key
            .clone()
            .ok_or_else(|| Error::missing_field("api_key"))?;
        let api_secret = self
            .api_secret
            .clone()
            .ok_or_else(|| Error::missing_field("api_secret"))?;

        let credentials = Credentials::new(api_key, api_secret);
        credentials.validate()?;
        Ok(credentials)
    }

    /// Secret for the webhook receiver
    pub fn webhook_secret(&self) -> Result<WebhookSecret> {
        match self.webhook.secret.as_deref() {
            None => Err(Error::missing_field("webhook.secret")),
            Some("") => Err(Error::invalid_value("webhook.secret", "must not be empty")),
            Some(secret) => Ok(WebhookSecret::from(secret)),
        }
    }

    /// Transport settings for [`HttpClient`](crate::http::HttpClient)
    pub fn to_http_config(&self) -> Result<HttpClientConfig> {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_secs))
            .page_size(self.page_size)
            .retry(self.retry.to_policy()?);

        if let Some(rate_limit) = self.rate_limit {
            builder = builder.rate_limit(rate_limit);
        }

        Ok(builder.build())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key)
            .field("api_secret", &redact(self.api_secret.as_ref()))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("page_size", &self.page_size)
            .field("retry", &self.retry)
            .field("rate_limit", &self.rate_limit)
            .field("webhook", &self.webhook)
            .finish()
    }
}

fn redact(value: Option<&String>) -> Option<&'static str> {
    value.map(|_| "[REDACTED]")
}
