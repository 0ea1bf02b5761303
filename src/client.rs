//! Top-level API client

use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::resources::{Connectors, Destinations, Groups, Webhooks};

/// Entry point for the REST API
///
/// ```rust,no_run
/// use fivetran_client::{Client, Credentials};
/// use futures::StreamExt;
///
/// # async fn run() -> fivetran_client::Result<()> {
/// let client = Client::new(Credentials::new("key", "secret"))?;
///
/// let mut groups = client.groups().list().into_stream();
/// while let Some(group) = groups.next().await {
///     println!("{}", group?.name);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    http: HttpClient,
}

impl Client {
    /// Client for the production API with default settings
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(HttpClientConfig::default(), credentials)
    }

    /// Client with explicit transport settings
    pub fn with_config(config: HttpClientConfig, credentials: Credentials) -> Result<Self> {
        credentials.validate()?;
        Ok(Self {
            http: HttpClient::with_credentials(config, credentials)?,
        })
    }

    /// Client built from loaded configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        Self::with_config(config.to_http_config()?, config.credentials()?)
    }

    /// Client using `FIVETRAN_API_KEY` and `FIVETRAN_API_SECRET`
    pub fn from_env() -> Result<Self> {
        Self::new(Credentials::from_env()?)
    }

    /// The underlying transport
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn groups(&self) -> Groups<'_> {
        Groups::new(&self.http)
    }

    pub fn connectors(&self) -> Connectors<'_> {
        Connectors::new(&self.http)
    }

    pub fn destinations(&self) -> Destinations<'_> {
        Destinations::new(&self.http)
    }

    pub fn webhooks(&self) -> Webhooks<'_> {
        Webhooks::new(&self.http)
    }
}
