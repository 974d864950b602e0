//! # fleetprov-cli
//!
//! Command-line interface for bulk provisioning AWS IoT device fleets.
//!
//! ## Features
//!
//! - **Full pipeline**: `fleetprov run` builds the manifest, stages it in
//!   S3, drives the registration task, issues credentials, and links
//!   certificates to devices and the access policy
//! - **Step commands**: each pipeline stage is individually drivable
//! - **Configuration**: flags, environment variables, and a TOML config
//!   file, merged in that order
//! - **Multiple output formats**: human-readable status lines or JSON

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
