//! Service contracts the orchestration expects from its collaborators.
//!
//! The workflow never talks to a provider SDK directly; it drives these
//! traits. `fleetprov-client` supplies the AWS implementations, tests
//! supply in-memory fakes.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    CertificateSummary, CredentialBundle, DeviceSummary, Page, PolicySummary,
    RegistrationSubmission, TaskPoll,
};

/// Object storage used to stage the provisioning manifest
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Names of every bucket visible to the caller
    async fn list_buckets(&self) -> Result<Vec<String>>;

    /// Create a bucket in the configured region
    async fn create_bucket(&self, name: &str) -> Result<()>;

    /// Delete an empty bucket
    async fn delete_bucket(&self, name: &str) -> Result<()>;

    /// Keys of every object in `bucket`
    async fn list_objects(&self, bucket: &str) -> Result<Vec<String>>;

    /// Delete a single object
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;

    /// Store `body` under `key` in `bucket`
    async fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<()>;
}

/// The provider's device registry
#[async_trait]
pub trait DeviceRegistry: Send + Sync {
    /// Register the device type, tolerating a type that already exists
    async fn ensure_device_type(&self, name: &str) -> Result<()>;

    /// Submit a bulk registration task; returns the provider's task id
    async fn start_registration(&self, submission: RegistrationSubmission) -> Result<String>;

    /// Fetch the current status of a registration task
    async fn registration_status(&self, task_id: &str) -> Result<TaskPoll>;

    /// One page of the registry's device listing
    async fn list_devices(
        &self,
        page_size: i32,
        token: Option<String>,
    ) -> Result<Page<DeviceSummary>>;

    /// One page of the registry's certificate listing
    async fn list_certificates(
        &self,
        page_size: i32,
        marker: Option<String>,
    ) -> Result<Page<CertificateSummary>>;

    /// One page of the registry's policy listing
    async fn list_policies(
        &self,
        page_size: i32,
        marker: Option<String>,
    ) -> Result<Page<PolicySummary>>;

    /// Attach a certificate to a device as its principal
    async fn attach_certificate(&self, device_name: &str, certificate_arn: &str) -> Result<()>;

    /// Attach a named policy to a certificate
    async fn attach_policy(&self, policy_name: &str, certificate_arn: &str) -> Result<()>;
}

/// Issues device credentials
#[async_trait]
pub trait CredentialAuthority: Send + Sync {
    /// Create a new active key pair and certificate
    async fn issue_credential(&self) -> Result<CredentialBundle>;
}
