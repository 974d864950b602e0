//! Command implementations.

pub mod config;
pub mod issue;
pub mod link;
pub mod manifest;
pub mod register;
pub mod run;
pub mod stage;

use fleetprov::{IotClient, StorageClient};

use crate::config::Settings;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective settings after merging flags, environment, and config file
    pub settings: Settings,

    /// Output format
    pub output_format: OutputFormat,

    /// Verbose output
    pub verbose: bool,
}

impl Context {
    /// Create the object storage client for the configured region.
    pub async fn storage(&self) -> StorageClient {
        StorageClient::from_env(&self.settings.region).await
    }

    /// Create the device registry client for the configured region.
    pub async fn registry(&self) -> IotClient {
        IotClient::from_env(&self.settings.region).await
    }
}
