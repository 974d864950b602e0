//! Per-device credential issuance.

use std::path::PathBuf;

use fleetprov_core::{CredentialAuthority, CredentialBundle, DeviceRegistry, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::paging::list_all_devices;

/// Local directory layout for issued PEM artifacts
#[derive(Debug, Clone)]
pub struct CredentialLayout {
    root: PathBuf,
}

impl CredentialLayout {
    /// A layout rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding device certificates
    #[must_use]
    pub fn certs_dir(&self) -> PathBuf {
        self.root.join("certs")
    }

    /// Directory holding private keys
    #[must_use]
    pub fn private_dir(&self) -> PathBuf {
        self.root.join("private")
    }

    /// Directory holding public keys
    #[must_use]
    pub fn public_dir(&self) -> PathBuf {
        self.root.join("public")
    }

    /// Create the three artifact directories if they are missing
    pub fn materialize(&self) -> Result<()> {
        for dir in [self.certs_dir(), self.private_dir(), self.public_dir()] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    /// Write the three PEM files for `device`, overwriting any prior issue
    pub fn persist(&self, device: &str, bundle: &CredentialBundle) -> Result<()> {
        let file = format!("{device}.pem");
        std::fs::write(self.certs_dir().join(&file), &bundle.certificate_pem)?;
        std::fs::write(self.private_dir().join(&file), &bundle.private_key_pem)?;
        std::fs::write(self.public_dir().join(&file), &bundle.public_key_pem)?;
        Ok(())
    }
}

/// What a credential issuance pass produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueReport {
    /// Number of devices that received a credential
    pub issued: u64,
}

/// Issues one credential per registered device and persists the artifacts
pub struct CredentialIssuer<'a, R: ?Sized, C: ?Sized> {
    registry: &'a R,
    authority: &'a C,
    layout: CredentialLayout,
    page_size: i32,
}

impl<'a, R, C> CredentialIssuer<'a, R, C>
where
    R: DeviceRegistry + ?Sized,
    C: CredentialAuthority + ?Sized,
{
    /// An issuer writing artifacts under `layout`
    #[must_use]
    pub fn new(registry: &'a R, authority: &'a C, layout: CredentialLayout, page_size: i32) -> Self {
        Self {
            registry,
            authority,
            layout,
            page_size,
        }
    }

    /// Issue and persist a credential for every registered device.
    ///
    /// `progress` is invoked with each device name after its artifacts are
    /// on disk. Credentials issued before a mid-loop failure stay on disk
    /// and in the registry.
    pub async fn issue_all(&self, mut progress: impl FnMut(&str) + Send) -> Result<IssueReport> {
        self.layout.materialize()?;

        let devices = list_all_devices(self.registry, self.page_size).await?;
        info!(devices = devices.len(), "issuing credentials");

        let mut issued = 0u64;
        for device in &devices {
            let bundle = self.authority.issue_credential().await?;
            self.layout.persist(&device.name, &bundle)?;
            debug!(device = %device.name, arn = %bundle.certificate_arn, "credential issued");
            issued += 1;
            progress(&device.name);
        }

        Ok(IssueReport { issued })
    }
}
