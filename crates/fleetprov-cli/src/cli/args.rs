//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Bulk provisioning for AWS IoT device fleets
///
/// Builds a provisioning manifest, stages it in S3, drives the bulk
/// registration task, issues per-device credentials, and attaches
/// certificates and the access policy.
#[derive(Parser, Debug)]
#[command(name = "fleetprov")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// AWS region the bucket and registry live in
    #[arg(long, env = "AWS_REGION", global = true)]
    pub region: Option<String>,

    /// Staging bucket for the provisioning manifest
    #[arg(long, env = "FLEETPROV_BUCKET", global = true)]
    pub bucket: Option<String>,

    /// Execution role the registry assumes during registration
    #[arg(long, env = "FLEETPROV_ROLE_ARN", global = true)]
    pub role_arn: Option<String>,

    /// Access policy attached to every certificate
    #[arg(long, env = "FLEETPROV_POLICY", global = true)]
    pub policy: Option<String>,

    /// Device type registered for the fleet
    #[arg(long, env = "FLEETPROV_DEVICE_TYPE", global = true)]
    pub device_type: Option<String>,

    /// Device name prefix
    #[arg(long, env = "FLEETPROV_PREFIX", global = true)]
    pub prefix: Option<String>,

    /// Object key for the uploaded manifest
    #[arg(long, global = true)]
    pub manifest_key: Option<String>,

    /// Page size for registry listings
    #[arg(long, global = true)]
    pub page_size: Option<i32>,

    /// Seconds between registration task polls
    #[arg(long, global = true)]
    pub poll_interval: Option<u64>,

    /// Maximum number of task polls before giving up
    #[arg(long, global = true)]
    pub poll_attempts: Option<u32>,

    /// Root directory for issued PEM artifacts
    #[arg(long, global = true)]
    pub credential_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full provisioning pipeline
    Run(RunArgs),

    /// Build the provisioning manifest file
    Manifest(ManifestArgs),

    /// Reset the staging bucket and upload the manifest
    Stage(StageArgs),

    /// Submit the bulk registration task and poll it to completion
    Register(RegisterArgs),

    /// Issue credentials for every registered device
    Issue,

    /// Attach certificates and the access policy
    Link,

    /// Manage CLI configuration
    Config(ConfigArgs),
}

// ============================================================================
// Run command
// ============================================================================

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Number of devices in the batch
    #[arg(short, long, default_value = "5")]
    pub count: u64,

    /// Sequence number of the first device
    #[arg(long, default_value = "0")]
    pub start: u64,

    /// Where the manifest file is written
    #[arg(long, default_value = "provisioning-data.json")]
    pub manifest_path: PathBuf,

    /// Provisioning template forwarded to the registry
    #[arg(long, default_value = "provisioning-template.json")]
    pub template: PathBuf,
}

// ============================================================================
// Manifest command
// ============================================================================

#[derive(Args, Debug)]
pub struct ManifestArgs {
    /// Number of devices in the batch
    #[arg(short, long, default_value = "5")]
    pub count: u64,

    /// Sequence number of the first device
    #[arg(long, default_value = "0")]
    pub start: u64,

    /// Where the manifest file is written
    #[arg(long, default_value = "provisioning-data.json")]
    pub manifest_path: PathBuf,
}

// ============================================================================
// Stage command
// ============================================================================

#[derive(Args, Debug)]
pub struct StageArgs {
    /// Manifest file to upload
    #[arg(long, default_value = "provisioning-data.json")]
    pub manifest_path: PathBuf,
}

// ============================================================================
// Register command
// ============================================================================

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Provisioning template forwarded to the registry
    #[arg(long, default_value = "provisioning-template.json")]
    pub template: PathBuf,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (e.g., bucket, role_arn, policy)
        key: String,

        /// Value to set
        value: String,
    },

    /// Show config file path
    Path,
}
