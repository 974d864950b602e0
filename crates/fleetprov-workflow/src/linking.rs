//! Certificate and policy attachment.

use fleetprov_core::{DeviceRegistry, ProvisionError, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::paging::{list_all_certificates, list_all_devices, list_all_policies};

/// What the linking step did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LinkOutcome {
    /// Every device was paired with its certificate and the policy
    Attached {
        /// Number of device/certificate pairs attached
        devices: u64,
    },
    /// Device and certificate counts differed; nothing was attached
    SkippedMismatch {
        /// Number of registered devices
        devices: u64,
        /// Number of registered certificates
        certificates: u64,
    },
}

/// Attaches certificates to devices and the access policy to certificates
pub struct Linker<'a, R: DeviceRegistry + ?Sized> {
    registry: &'a R,
    policy_name: String,
    page_size: i32,
}

impl<'a, R: DeviceRegistry + ?Sized> Linker<'a, R> {
    /// A linker attaching the named policy
    #[must_use]
    pub fn new(registry: &'a R, policy_name: impl Into<String>, page_size: i32) -> Self {
        Self {
            registry,
            policy_name: policy_name.into(),
            page_size,
        }
    }

    /// Pair certificates with devices by listing position and attach the
    /// access policy to each certificate.
    ///
    /// Positional pairing is only defined when the device and certificate
    /// counts agree; on a mismatch the whole batch is skipped and
    /// [`LinkOutcome::SkippedMismatch`] returned. A policy name that is
    /// not registered fails with [`ProvisionError::PolicyNotFound`] before
    /// any attachment is made.
    pub async fn attach_all(&self) -> Result<LinkOutcome> {
        let devices = list_all_devices(self.registry, self.page_size).await?;
        let certificates = list_all_certificates(self.registry, self.page_size).await?;
        let policies = list_all_policies(self.registry, self.page_size).await?;

        let policy = policies
            .iter()
            .find(|policy| policy.name == self.policy_name)
            .ok_or_else(|| ProvisionError::PolicyNotFound {
                name: self.policy_name.clone(),
            })?;

        if devices.len() != certificates.len() {
            warn!(
                devices = devices.len(),
                certificates = certificates.len(),
                "device and certificate counts differ, skipping attachment"
            );
            return Ok(LinkOutcome::SkippedMismatch {
                devices: devices.len() as u64,
                certificates: certificates.len() as u64,
            });
        }

        for (device, certificate) in devices.iter().zip(&certificates) {
            self.registry
                .attach_certificate(&device.name, &certificate.arn)
                .await?;
            self.registry
                .attach_policy(&policy.name, &certificate.arn)
                .await?;
        }

        info!(
            devices = devices.len(),
            policy = %policy.name,
            "attached certificates and policy"
        );
        Ok(LinkOutcome::Attached {
            devices: devices.len() as u64,
        })
    }
}
