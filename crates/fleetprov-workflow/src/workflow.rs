//! End-to-end bulk-provisioning pipeline.

use std::path::PathBuf;

use fleetprov_core::{
    CredentialAuthority, DeviceRegistry, ObjectStore, RegistrationSubmission, Result,
};
use serde::Serialize;
use tracing::info;

use crate::credentials::{CredentialIssuer, CredentialLayout, IssueReport};
use crate::linking::{LinkOutcome, Linker};
use crate::manifest::{ManifestBuilder, ManifestSummary};
use crate::registration::{PollPolicy, TaskDriver, TaskReport};
use crate::staging::{ResetPolicy, Stager};

/// Everything one provisioning batch needs
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Device type registered for the fleet
    pub device_type: String,
    /// Device name prefix
    pub name_prefix: String,
    /// Number of devices in the batch
    pub count: u64,
    /// Sequence number of the first device
    pub start_sequence: u64,
    /// Staging bucket name
    pub bucket: String,
    /// Object key of the uploaded manifest
    pub manifest_key: String,
    /// Where the manifest file is written locally
    pub manifest_path: PathBuf,
    /// Provisioning template forwarded to the registry
    pub template_path: PathBuf,
    /// Execution role the provider assumes during registration
    pub role_arn: String,
    /// Access policy attached to every certificate
    pub policy_name: String,
    /// Page size for registry listings
    pub page_size: i32,
    /// Root directory for issued PEM artifacts
    pub credential_root: PathBuf,
    /// Bucket reset retry policy
    pub reset: ResetPolicy,
    /// Registration task polling policy
    pub poll: PollPolicy,
}

/// Aggregated result of a full pipeline run
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowReport {
    /// Manifest build summary
    pub manifest: ManifestSummary,
    /// Registration task outcome
    pub task: TaskReport,
    /// Credential issuance summary
    pub credentials: IssueReport,
    /// Linking outcome
    pub link: LinkOutcome,
}

/// Sequential bulk-provisioning pipeline
pub struct Workflow<'a, S: ?Sized, R: ?Sized> {
    store: &'a S,
    registry: &'a R,
    config: WorkflowConfig,
}

impl<'a, S, R> Workflow<'a, S, R>
where
    S: ObjectStore + ?Sized,
    R: DeviceRegistry + CredentialAuthority + ?Sized,
{
    /// A pipeline over the given collaborators
    #[must_use]
    pub fn new(store: &'a S, registry: &'a R, config: WorkflowConfig) -> Self {
        Self {
            store,
            registry,
            config,
        }
    }

    /// Run the five provisioning steps in order.
    ///
    /// `progress` is forwarded to the credential issuer. The first failing
    /// step aborts the run; completed remote work is not rolled back.
    pub async fn run(&self, progress: impl FnMut(&str) + Send) -> Result<WorkflowReport> {
        let manifest = ManifestBuilder::new(
            self.config.name_prefix.as_str(),
            self.config.device_type.as_str(),
        )
        .build(
            &self.config.manifest_path,
            self.config.start_sequence,
            self.config.count,
        )?;

        let stager = Stager::new(self.store).reset_policy(self.config.reset.clone());
        stager.ensure_bucket(&self.config.bucket).await?;
        stager
            .upload(
                &self.config.bucket,
                &self.config.manifest_key,
                &self.config.manifest_path,
            )
            .await?;

        let template_body = tokio::fs::read_to_string(&self.config.template_path).await?;
        let task = TaskDriver::new(self.registry)
            .poll_policy(self.config.poll.clone())
            .run(
                &self.config.device_type,
                RegistrationSubmission {
                    template_body,
                    bucket: self.config.bucket.clone(),
                    key: self.config.manifest_key.clone(),
                    role_arn: self.config.role_arn.clone(),
                },
            )
            .await?;

        let credentials = CredentialIssuer::new(
            self.registry,
            self.registry,
            CredentialLayout::new(&self.config.credential_root),
            self.config.page_size,
        )
        .issue_all(progress)
        .await?;

        let link = Linker::new(
            self.registry,
            self.config.policy_name.clone(),
            self.config.page_size,
        )
        .attach_all()
        .await?;

        info!("bulk provisioning finished");
        Ok(WorkflowReport {
            manifest,
            task,
            credentials,
            link,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryRegistry, MemoryStore};
    use fleetprov_core::{ProvisionError, TaskStatus};
    use std::time::Duration;

    fn config(dir: &std::path::Path) -> WorkflowConfig {
        WorkflowConfig {
            device_type: "TRACKER".to_owned(),
            name_prefix: "MOTO".to_owned(),
            count: 5,
            start_sequence: 0,
            bucket: "fleet-staging".to_owned(),
            manifest_key: "provisioning-data.json".to_owned(),
            manifest_path: dir.join("provisioning-data.json"),
            template_path: dir.join("provisioning-template.json"),
            role_arn: "arn:aws:iam::0:role/registration".to_owned(),
            policy_name: "fleet-policy".to_owned(),
            page_size: 2,
            credential_root: dir.join("secure"),
            reset: ResetPolicy {
                max_attempts: 3,
                initial_backoff: Duration::ZERO,
                max_backoff: Duration::ZERO,
            },
            poll: PollPolicy {
                interval: Duration::ZERO,
                max_attempts: 10,
            },
        }
    }

    fn write_template(dir: &std::path::Path) {
        std::fs::write(
            dir.join("provisioning-template.json"),
            r#"{"Parameters":{"ThingName":{"Type":"String"}}}"#,
        )
        .unwrap();
    }

    #[tokio::test]
    async fn full_run_provisions_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path());

        let store = MemoryStore::default();
        let registry = MemoryRegistry::with_fleet(5, "fleet-policy");
        registry.script_statuses([
            TaskStatus::InProgress,
            TaskStatus::InProgress,
            TaskStatus::Completed,
        ]);

        let report = Workflow::new(&store, &registry, config(dir.path()))
            .run(|_| {})
            .await
            .unwrap();

        assert_eq!(report.manifest.devices, 5);
        assert_eq!(report.task.polls, 3);
        assert_eq!(report.credentials.issued, 5);
        assert_eq!(report.link, LinkOutcome::Attached { devices: 5 });

        // Manifest was staged under the expected key.
        assert!(store
            .object("fleet-staging", "provisioning-data.json")
            .is_some());
        assert_eq!(registry.attached_certificates().len(), 5);
    }

    #[tokio::test]
    async fn failed_task_aborts_before_credential_issuance() {
        let dir = tempfile::tempdir().unwrap();
        write_template(dir.path());

        let store = MemoryStore::default();
        let registry = MemoryRegistry::with_fleet(5, "fleet-policy");
        registry.script_statuses([TaskStatus::InProgress, TaskStatus::Failed]);

        let err = Workflow::new(&store, &registry, config(dir.path()))
            .run(|_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::TaskFailed { .. }));
        assert_eq!(registry.issued_count(), 0);
        assert!(registry.attached_certificates().is_empty());
    }

    #[tokio::test]
    async fn missing_template_surfaces_as_io_error() {
        let dir = tempfile::tempdir().unwrap();

        let store = MemoryStore::default();
        let registry = MemoryRegistry::with_fleet(5, "fleet-policy");

        let err = Workflow::new(&store, &registry, config(dir.path()))
            .run(|_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, ProvisionError::Io(_)));
        assert_eq!(registry.issued_count(), 0);
    }
}
