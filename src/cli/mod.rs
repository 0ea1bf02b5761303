//! CLI module
//!
//! Command-line interface over the client.
//!
//! # Commands
//!
//! - `groups`, `connectors`, `destinations`, `webhooks` - Read and act on resources
//! - `sign` / `verify` - Compute or check webhook signatures offline
//! - `serve` - Run the webhook receiver

mod commands;
mod runner;

pub use commands::{
    Cli, Commands, ConnectorCommands, DestinationCommands, GroupCommands, OutputFormat,
    PayloadArgs, WebhookCommands,
};
pub use runner::{collect_limited, Runner};
