//! AWS implementations of the fleetprov service contracts.
//!
//! [`StorageClient`] backs [`ObjectStore`](fleetprov_core::ObjectStore)
//! with S3; [`IotClient`] backs both
//! [`DeviceRegistry`](fleetprov_core::DeviceRegistry) and
//! [`CredentialAuthority`](fleetprov_core::CredentialAuthority) with AWS
//! IoT Core. Both accept an injected SDK client so tests can point them at
//! a local mock endpoint.

#![doc(html_root_url = "https://docs.rs/fleetprov-client/0.1.0")]

mod registry;
mod sdk;
mod storage;

pub use registry::IotClient;
pub use storage::StorageClient;

pub use fleetprov_core::{ProvisionError, Result};
