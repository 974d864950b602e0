//! Configuration management.
//!
//! Provisioning parameters resolve in order: CLI flag, environment
//! variable, config file, built-in default. Parameters without a sensible
//! default (bucket, role ARN, policy) are surfaced through accessors that
//! explain how to set them.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::cli::args::Cli;
use crate::output::OutputFormat;
use fleetprov::workflow::PollPolicy;

const DEFAULT_REGION: &str = "eu-central-1";
const DEFAULT_DEVICE_TYPE: &str = "TRACKER";
const DEFAULT_PREFIX: &str = "device";
const DEFAULT_MANIFEST_KEY: &str = "provisioning-data.json";
const DEFAULT_PAGE_SIZE: i32 = 25;
const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_POLL_ATTEMPTS: u32 = 120;
const DEFAULT_CREDENTIAL_DIR: &str = "secure";

/// Persisted CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// AWS region the bucket and registry live in.
    pub region: Option<String>,

    /// Device type registered for the fleet.
    pub device_type: Option<String>,

    /// Device name prefix.
    pub prefix: Option<String>,

    /// Staging bucket for the provisioning manifest.
    pub bucket: Option<String>,

    /// Object key for the uploaded manifest.
    pub manifest_key: Option<String>,

    /// Execution role the registry assumes during registration.
    pub role_arn: Option<String>,

    /// Access policy attached to every certificate.
    pub policy: Option<String>,

    /// Page size for registry listings.
    pub page_size: Option<i32>,

    /// Seconds between registration task polls.
    pub poll_interval_secs: Option<u64>,

    /// Maximum number of task polls before giving up.
    pub poll_attempts: Option<u32>,

    /// Root directory for issued PEM artifacts.
    pub credential_dir: Option<PathBuf>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("io", "fleetprov", "fleetprov")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;

        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }
}

/// Effective settings after merging flags, environment, and config file.
#[derive(Debug, Clone)]
pub struct Settings {
    /// AWS region the bucket and registry live in
    pub region: String,

    /// Device type registered for the fleet
    pub device_type: String,

    /// Device name prefix
    pub prefix: String,

    /// Object key for the uploaded manifest
    pub manifest_key: String,

    /// Page size for registry listings
    pub page_size: i32,

    /// Registration task polling policy
    pub poll: PollPolicy,

    /// Root directory for issued PEM artifacts
    pub credential_root: PathBuf,

    bucket: Option<String>,
    role_arn: Option<String>,
    policy: Option<String>,
}

impl Settings {
    /// Merge CLI flags (which clap already backed with environment
    /// variables) over the config file over the built-in defaults.
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        Self {
            region: cli
                .region
                .clone()
                .or_else(|| config.region.clone())
                .unwrap_or_else(|| DEFAULT_REGION.to_owned()),
            device_type: cli
                .device_type
                .clone()
                .or_else(|| config.device_type.clone())
                .unwrap_or_else(|| DEFAULT_DEVICE_TYPE.to_owned()),
            prefix: cli
                .prefix
                .clone()
                .or_else(|| config.prefix.clone())
                .unwrap_or_else(|| DEFAULT_PREFIX.to_owned()),
            manifest_key: cli
                .manifest_key
                .clone()
                .or_else(|| config.manifest_key.clone())
                .unwrap_or_else(|| DEFAULT_MANIFEST_KEY.to_owned()),
            page_size: cli
                .page_size
                .or(config.page_size)
                .unwrap_or(DEFAULT_PAGE_SIZE),
            poll: PollPolicy {
                interval: Duration::from_secs(
                    cli.poll_interval
                        .or(config.poll_interval_secs)
                        .unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
                ),
                max_attempts: cli
                    .poll_attempts
                    .or(config.poll_attempts)
                    .unwrap_or(DEFAULT_POLL_ATTEMPTS),
            },
            credential_root: cli
                .credential_dir
                .clone()
                .or_else(|| config.credential_dir.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIAL_DIR)),
            bucket: cli.bucket.clone().or_else(|| config.bucket.clone()),
            role_arn: cli.role_arn.clone().or_else(|| config.role_arn.clone()),
            policy: cli.policy.clone().or_else(|| config.policy.clone()),
        }
    }

    /// Get the staging bucket, returning an error if not set.
    pub fn bucket(&self) -> Result<&str> {
        self.bucket.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Staging bucket required.\n\n\
                 Set it with one of:\n  \
                 1. --bucket <NAME>\n  \
                 2. FLEETPROV_BUCKET environment variable\n  \
                 3. fleetprov config set bucket <NAME>"
            )
        })
    }

    /// Get the registration role ARN, returning an error if not set.
    pub fn role_arn(&self) -> Result<&str> {
        self.role_arn.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Registration role ARN required.\n\n\
                 Set it with one of:\n  \
                 1. --role-arn <ARN>\n  \
                 2. FLEETPROV_ROLE_ARN environment variable\n  \
                 3. fleetprov config set role_arn <ARN>"
            )
        })
    }

    /// Get the access policy name, returning an error if not set.
    pub fn policy_name(&self) -> Result<&str> {
        self.policy.as_deref().ok_or_else(|| {
            anyhow::anyhow!(
                "Access policy name required.\n\n\
                 Set it with one of:\n  \
                 1. --policy <NAME>\n  \
                 2. FLEETPROV_POLICY environment variable\n  \
                 3. fleetprov config set policy <NAME>"
            )
        })
    }
}
