//! CLI runner - executes commands

use crate::cli::commands::{
    Cli, Commands, ConnectorCommands, DestinationCommands, GroupCommands, OutputFormat,
    PayloadArgs, WebhookCommands,
};
use crate::client::Client;
use crate::config::ClientConfig;
use crate::error::{ClassifiedError, Error, Result};
use crate::pagination::BoxPaginator;
use crate::webhook::{self, LoggingHandler, ReceiverConfig, WebhookSecret};
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::sync::Arc;
use tracing::debug;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Groups { command } => self.groups(command).await,
            Commands::Connectors { command } => self.connectors(command).await,
            Commands::Destinations { command } => self.destinations(command).await,
            Commands::Webhooks { command } => self.webhooks(command).await,
            Commands::Sign { secret, payload } => self.sign(secret.as_deref(), payload),
            Commands::Verify {
                secret,
                signature,
                payload,
            } => self.verify(secret.as_deref(), signature, payload),
            Commands::Serve { port } => self.serve(*port).await,
        }
    }

    /// Load configuration from `--config` and the environment
    fn load_config(&self) -> Result<ClientConfig> {
        let config = ClientConfig::load(self.cli.config.as_deref())?;
        debug!(?config, "Loaded configuration");
        Ok(config)
    }

    fn client(&self) -> Result<Client> {
        Client::from_config(&self.load_config()?)
    }

    async fn groups(&self, command: &GroupCommands) -> Result<()> {
        let client = self.client()?;
        let groups = client.groups();

        match command {
            GroupCommands::List { limit } => self.output_list(groups.list(), *limit).await,
            GroupCommands::Get { id } => self.output(&groups.get(id).await?),
        }
    }

    async fn connectors(&self, command: &ConnectorCommands) -> Result<()> {
        let client = self.client()?;

        match command {
            ConnectorCommands::List { group, limit } => {
                self.output_list(client.groups().connectors(group), *limit)
                    .await
            }
            ConnectorCommands::Get { id } => self.output(&client.connectors().get(id).await?),
            ConnectorCommands::Sync { id, force } => {
                client.connectors().sync(id, *force).await?;
                self.output(&json!({
                    "connector_id": id,
                    "sync_triggered": true,
                    "force": force
                }))
            }
        }
    }

    async fn destinations(&self, command: &DestinationCommands) -> Result<()> {
        let client = self.client()?;
        let destinations = client.destinations();

        match command {
            DestinationCommands::List { limit } => {
                self.output_list(destinations.list(), *limit).await
            }
            DestinationCommands::Get { id } => self.output(&destinations.get(id).await?),
        }
    }

    async fn webhooks(&self, command: &WebhookCommands) -> Result<()> {
        let client = self.client()?;
        let webhooks = client.webhooks();

        match command {
            WebhookCommands::List { limit } => self.output_list(webhooks.list(), *limit).await,
            WebhookCommands::Get { id } => self.output(&webhooks.get(id).await?),
        }
    }

    fn sign(&self, secret: Option<&str>, payload: &PayloadArgs) -> Result<()> {
        let secret = self.resolve_secret(secret)?;
        let payload = read_payload(payload)?;

        self.output(&json!({
            "header": webhook::signature_header_name(),
            "signature": secret.sign(&payload)
        }))
    }

    fn verify(&self, secret: Option<&str>, signature: &str, payload: &PayloadArgs) -> Result<()> {
        let secret = self.resolve_secret(secret)?;
        let payload = read_payload(payload)?;

        secret.verify(&payload, Some(signature))?;
        self.output(&json!({ "valid": true }))
    }

    async fn serve(&self, port: Option<u16>) -> Result<()> {
        let config = self.load_config()?;
        config.validate()?;

        let receiver = ReceiverConfig::new(config.webhook_secret()?).path(&config.webhook.path);
        let port = port.unwrap_or(config.webhook.listen_port);

        webhook::serve(receiver, Arc::new(LoggingHandler), port).await
    }

    /// Secret from the command line, else from configuration
    fn resolve_secret(&self, secret: Option<&str>) -> Result<WebhookSecret> {
        match secret {
            Some(secret) => Ok(WebhookSecret::from(secret)),
            None => self.load_config()?.webhook_secret(),
        }
    }

    async fn output_list<T: Serialize>(
        &self,
        paginator: BoxPaginator<T>,
        limit: Option<usize>,
    ) -> Result<()> {
        let items = collect_limited(paginator, limit).await?;
        self.output(&items)
    }

    fn output<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let rendered = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{rendered}");
        Ok(())
    }
}

/// Collect a listing, stopping after `limit` items when given
///
/// Pages past the one holding the last requested item are never fetched.
pub async fn collect_limited<T>(
    paginator: BoxPaginator<T>,
    limit: Option<usize>,
) -> Result<Vec<T>, ClassifiedError> {
    match limit {
        Some(limit) => paginator.into_stream().take(limit).try_collect().await,
        None => paginator.collect_all().await,
    }
}

fn read_payload(args: &PayloadArgs) -> Result<Vec<u8>> {
    match (&args.file, &args.data) {
        (Some(path), _) => fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        }),
        (None, Some(data)) => Ok(data.clone().into_bytes()),
        (None, None) => Err(Error::config("Provide a payload with --file or --data")),
    }
}
