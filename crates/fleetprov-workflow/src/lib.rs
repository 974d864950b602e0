//! Bulk-provisioning orchestration for IoT device fleets.
//!
//! The workflow runs five steps in order, each built on the service
//! contracts from `fleetprov-core`:
//!
//! 1. [`ManifestBuilder`] writes the newline-delimited provisioning
//!    manifest
//! 2. [`Stager`] resets the staging bucket and uploads the manifest
//! 3. [`TaskDriver`] submits the bulk registration task and polls it to a
//!    terminal state
//! 4. [`CredentialIssuer`] issues one credential per registered device and
//!    persists the PEM artifacts
//! 5. [`Linker`] attaches certificates to devices and the access policy to
//!    certificates
//!
//! [`Workflow`] ties the steps together for a full run; each component can
//! also be driven on its own.

#![doc(html_root_url = "https://docs.rs/fleetprov-workflow/0.1.0")]

mod credentials;
mod linking;
mod manifest;
mod paging;
mod registration;
mod staging;
mod workflow;

#[cfg(test)]
pub(crate) mod testing;

pub use credentials::{CredentialIssuer, CredentialLayout, IssueReport};
pub use linking::{LinkOutcome, Linker};
pub use manifest::{ManifestBuilder, ManifestSummary};
pub use paging::{collect_all, list_all_certificates, list_all_devices, list_all_policies};
pub use registration::{PollPolicy, TaskDriver, TaskReport};
pub use staging::{ResetPolicy, Stager};
pub use workflow::{Workflow, WorkflowConfig, WorkflowReport};

pub use fleetprov_core::{ProvisionError, Result};
