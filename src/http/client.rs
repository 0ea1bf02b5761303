//! HTTP client with retry and rate limiting
//!
//! Provides the transport every resource endpoint goes through:
//! - Basic authentication on every request
//! - Optional client-side rate limiting
//! - Classified errors and retries for idempotent methods
//! - Envelope decoding and cursor pagination

use super::classify::{classify_response, classify_transport, Envelope};
use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::Credentials;
use crate::error::{ClassifiedError, Error, Result};
use crate::pagination::{BoxPaginator, ListParams, Page, Paginator};
use crate::retry::{Retrier, RetryPolicy};
use crate::types::StringMap;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.fivetran.com/v1";

/// Items requested per page when listing
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Page size sent as `limit` when listing
    pub page_size: u32,
    /// Retry policy for idempotent requests
    pub retry: RetryPolicy,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        let mut default_headers = StringMap::new();
        default_headers.insert(
            "Accept".to_string(),
            "application/json;version=2".to_string(),
        );

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            page_size: DEFAULT_PAGE_SIZE,
            retry: RetryPolicy::default(),
            rate_limit: None,
            default_headers,
            user_agent: format!("fivetran-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the page size used when listing
    pub fn page_size(mut self, size: u32) -> Self {
        self.config.page_size = size;
        self
    }

    /// Set the retry policy
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.config.retry = policy;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, in order
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: StringMap,
    /// Request body (JSON)
    pub body: Option<Value>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
    /// Override whether this request is retried
    pub retry: Option<bool>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Force retries on or off regardless of method
    #[must_use]
    pub fn retry(mut self, enabled: bool) -> Self {
        self.retry = Some(enabled);
        self
    }

    /// Whether a request with this method should go through the retrier
    pub fn retries(&self, method: &Method) -> bool {
        self.retry.unwrap_or(*method != Method::POST)
    }
}

/// HTTP client with retry and rate limiting
///
/// Cheap to clone; clones share the connection pool and rate limiter.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: Arc<HttpClientConfig>,
    credentials: Option<Credentials>,
    rate_limiter: Option<RateLimiter>,
    retrier: Retrier,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn new(config: HttpClientConfig) -> Result<Self> {
        url::Url::parse(&config.base_url)?;

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {e}")))?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);
        let retrier = Retrier::new(config.retry.clone());

        Ok(Self {
            client,
            config: Arc::new(config),
            credentials: None,
            rate_limiter,
            retrier,
        })
    }

    /// Create a client that authenticates every request
    pub fn with_credentials(config: HttpClientConfig, credentials: Credentials) -> Result<Self> {
        let mut client = Self::new(config)?;
        client.credentials = Some(credentials);
        Ok(client)
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Check if rate limiting is enabled
    pub fn has_rate_limiter(&self) -> bool {
        self.rate_limiter.is_some()
    }

    /// Make a GET request and decode `data`
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClassifiedError> {
        self.request_json(Method::GET, path, RequestConfig::default())
            .await
    }

    /// Make a POST request and decode `data`
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<T, ClassifiedError> {
        self.request_json(Method::POST, path, RequestConfig::default().json(body))
            .await
    }

    /// Make a PATCH request and decode `data`
    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<T, ClassifiedError> {
        self.request_json(Method::PATCH, path, RequestConfig::default().json(body))
            .await
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<Envelope, ClassifiedError> {
        self.request(Method::DELETE, path, RequestConfig::default())
            .await
    }

    /// Make a request and decode `data` into `T`
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<T, ClassifiedError> {
        self.request(method, path, config).await?.into_data()
    }

    /// Make a request, retrying it when the method allows
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        config: RequestConfig,
    ) -> Result<Envelope, ClassifiedError> {
        let url = self.build_url(path);

        if config.retries(&method) {
            self.retrier
                .run(|| self.send_once(&method, &url, &config))
                .await
        } else {
            self.send_once(&method, &url, &config).await
        }
    }

    /// Fetch a single page of a list endpoint
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &ListParams,
    ) -> Result<Page<T>, ClassifiedError> {
        let mut config = RequestConfig::default();
        config.query = params.to_query();
        self.request_json(Method::GET, path, config).await
    }

    /// Lazily iterate every item of a list endpoint
    pub fn paginate<T>(&self, path: impl Into<String>) -> BoxPaginator<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let client = self.clone();
        let path = path.into();
        let limit = self.config.page_size;

        Paginator::boxed(move |cursor| {
            let client = client.clone();
            let path = path.clone();
            async move {
                let params = ListParams::new().cursor(cursor).limit(limit);
                client.get_page(&path, &params).await
            }
        })
    }

    /// Send one request with no retries
    async fn send_once(
        &self,
        method: &Method,
        url: &str,
        config: &RequestConfig,
    ) -> Result<Envelope, ClassifiedError> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let mut req = self.client.request(method.clone(), url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        if let Some(ref body) = config.body {
            req = req.json(body);
        }

        req = req.timeout(config.timeout.unwrap_or(self.config.timeout));

        if let Some(ref credentials) = self.credentials {
            req = credentials.apply(req);
        }

        let response = req.send().await.map_err(|e| classify_transport(&e))?;
        let status = response.status();

        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            let err = classify_response(status, &headers, &body);
            debug!(%method, %url, status = status.as_u16(), kind = %err.kind(), "Request failed");
            return Err(err);
        }

        let body = response.text().await.map_err(|e| classify_transport(&e))?;
        debug!(%method, %url, status = status.as_u16(), "Request succeeded");
        Envelope::parse(&body)
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        let base = self.config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_credentials", &self.credentials.is_some())
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}
