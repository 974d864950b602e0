//! Core types and service contracts for the fleetprov bulk-provisioning
//! workflow.
//!
//! This crate provides the foundations shared across the fleetprov library:
//!
//! - **Types**: Strongly-typed representations of manifests, registration
//!   tasks, credentials, and paginated listings
//! - **Contracts**: The async traits the orchestration expects from object
//!   storage, the device registry, and the credential authority
//! - **Errors**: Comprehensive error handling with [`ProvisionError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use fleetprov_core::{DeviceIdentity, ProvisionError, Result};
//!
//! fn describe(identity: &DeviceIdentity) -> Result<()> {
//!     println!("name: {}", identity.name);
//!     println!("sequence: {}", identity.sequence);
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/fleetprov-core/0.1.0")]

mod contracts;
mod error;
pub mod types;

pub use contracts::{CredentialAuthority, DeviceRegistry, ObjectStore};
pub use error::{ProvisionError, Result};
pub use types::*;
