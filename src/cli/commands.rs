//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Command-line client for the Fivetran REST API
#[derive(Parser, Debug)]
#[command(name = "fivetran")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage groups
    Groups {
        #[command(subcommand)]
        command: GroupCommands,
    },

    /// Manage connectors
    Connectors {
        #[command(subcommand)]
        command: ConnectorCommands,
    },

    /// Manage destinations
    Destinations {
        #[command(subcommand)]
        command: DestinationCommands,
    },

    /// Manage webhook subscriptions
    Webhooks {
        #[command(subcommand)]
        command: WebhookCommands,
    },

    /// Compute the signature of a webhook payload
    Sign {
        /// Signing secret (defaults to the configured webhook secret)
        #[arg(long)]
        secret: Option<String>,

        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Check a webhook payload against a signature
    Verify {
        /// Signing secret (defaults to the configured webhook secret)
        #[arg(long)]
        secret: Option<String>,

        /// Signature header value, hex encoded
        #[arg(long)]
        signature: String,

        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Run the webhook receiver
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

/// Group subcommands
#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// List groups
    List {
        /// Stop after this many items
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one group
    Get { id: String },
}

/// Connector subcommands
#[derive(Subcommand, Debug)]
pub enum ConnectorCommands {
    /// List the connectors in a group
    List {
        /// Group to list
        #[arg(long)]
        group: String,

        /// Stop after this many items
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one connector
    Get { id: String },
    /// Trigger a sync
    Sync {
        id: String,

        /// Restart a sync already in progress
        #[arg(long)]
        force: bool,
    },
}

/// Destination subcommands
#[derive(Subcommand, Debug)]
pub enum DestinationCommands {
    /// List destinations
    List {
        /// Stop after this many items
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one destination
    Get { id: String },
}

/// Webhook subcommands
#[derive(Subcommand, Debug)]
pub enum WebhookCommands {
    /// List webhook subscriptions
    List {
        /// Stop after this many items
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one subscription
    Get { id: String },
}

/// Where a webhook payload comes from
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct PayloadArgs {
    /// Read the payload from a file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Use this literal payload
    #[arg(long)]
    pub data: Option<String>,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}
