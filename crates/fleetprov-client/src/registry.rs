//! AWS IoT Core device registry and credential authority.

use async_trait::async_trait;
use aws_sdk_iot::Client;
use fleetprov_core::{
    CertificateSummary, CredentialAuthority, CredentialBundle, DeviceRegistry, DeviceSummary,
    Page, PolicySummary, ProvisionError, RegistrationSubmission, Result, TaskPoll, TaskStatus,
};
use tracing::debug;

use crate::sdk::sdk_error;

/// Device registry and credential authority backed by AWS IoT Core
#[derive(Debug, Clone)]
pub struct IotClient {
    inner: Client,
}

impl IotClient {
    /// Wrap an existing SDK client (useful for testing against a local
    /// endpoint)
    #[must_use]
    pub fn new(inner: Client) -> Self {
        Self { inner }
    }

    /// Build a client from the ambient AWS environment
    pub async fn from_env(region: &str) -> Self {
        let config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_owned()))
            .load()
            .await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl DeviceRegistry for IotClient {
    async fn ensure_device_type(&self, name: &str) -> Result<()> {
        debug!(thing_type = name, "CreateThingType");
        match self
            .inner
            .create_thing_type()
            .thing_type_name(name)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_resource_already_exists_exception() {
                    debug!(thing_type = name, "thing type already registered");
                    Ok(())
                } else {
                    Err(sdk_error("CreateThingType", service_err))
                }
            }
        }
    }

    async fn start_registration(&self, submission: RegistrationSubmission) -> Result<String> {
        debug!(
            bucket = %submission.bucket,
            key = %submission.key,
            "StartThingRegistrationTask"
        );
        let response = self
            .inner
            .start_thing_registration_task()
            .template_body(submission.template_body)
            .input_file_bucket(submission.bucket)
            .input_file_key(submission.key)
            .role_arn(submission.role_arn)
            .send()
            .await
            .map_err(|e| sdk_error("StartThingRegistrationTask", e))?;

        response
            .task_id()
            .map(str::to_owned)
            .ok_or(ProvisionError::MissingField {
                operation: "StartThingRegistrationTask",
                field: "taskId",
            })
    }

    async fn registration_status(&self, task_id: &str) -> Result<TaskPoll> {
        debug!(task_id, "DescribeThingRegistrationTask");
        let response = self
            .inner
            .describe_thing_registration_task()
            .task_id(task_id)
            .send()
            .await
            .map_err(|e| sdk_error("DescribeThingRegistrationTask", e))?;

        let status = response.status().ok_or(ProvisionError::MissingField {
            operation: "DescribeThingRegistrationTask",
            field: "status",
        })?;

        Ok(TaskPoll {
            status: TaskStatus::from(status.as_str()),
            message: response.message().map(str::to_owned),
        })
    }

    async fn list_devices(
        &self,
        page_size: i32,
        token: Option<String>,
    ) -> Result<Page<DeviceSummary>> {
        debug!(page_size, continued = token.is_some(), "ListThings");
        let response = self
            .inner
            .list_things()
            .max_results(page_size)
            .set_next_token(token)
            .send()
            .await
            .map_err(|e| sdk_error("ListThings", e))?;

        let items = response
            .things()
            .iter()
            .filter_map(|thing| {
                Some(DeviceSummary {
                    name: thing.thing_name()?.to_owned(),
                    arn: thing.thing_arn()?.to_owned(),
                })
            })
            .collect();

        Ok(Page::new(items, response.next_token().map(str::to_owned)))
    }

    async fn list_certificates(
        &self,
        page_size: i32,
        marker: Option<String>,
    ) -> Result<Page<CertificateSummary>> {
        debug!(page_size, continued = marker.is_some(), "ListCertificates");
        let response = self
            .inner
            .list_certificates()
            .page_size(page_size)
            .set_marker(marker)
            .send()
            .await
            .map_err(|e| sdk_error("ListCertificates", e))?;

        let items = response
            .certificates()
            .iter()
            .filter_map(|certificate| {
                Some(CertificateSummary {
                    arn: certificate.certificate_arn()?.to_owned(),
                    id: certificate.certificate_id()?.to_owned(),
                })
            })
            .collect();

        Ok(Page::new(items, response.next_marker().map(str::to_owned)))
    }

    async fn list_policies(
        &self,
        page_size: i32,
        marker: Option<String>,
    ) -> Result<Page<PolicySummary>> {
        debug!(page_size, continued = marker.is_some(), "ListPolicies");
        let response = self
            .inner
            .list_policies()
            .page_size(page_size)
            .set_marker(marker)
            .send()
            .await
            .map_err(|e| sdk_error("ListPolicies", e))?;

        let items = response
            .policies()
            .iter()
            .filter_map(|policy| {
                Some(PolicySummary {
                    name: policy.policy_name()?.to_owned(),
                    arn: policy.policy_arn()?.to_owned(),
                })
            })
            .collect();

        Ok(Page::new(items, response.next_marker().map(str::to_owned)))
    }

    async fn attach_certificate(&self, device_name: &str, certificate_arn: &str) -> Result<()> {
        debug!(device = device_name, "AttachThingPrincipal");
        self.inner
            .attach_thing_principal()
            .thing_name(device_name)
            .principal(certificate_arn)
            .send()
            .await
            .map_err(|e| sdk_error("AttachThingPrincipal", e))?;
        Ok(())
    }

    async fn attach_policy(&self, policy_name: &str, certificate_arn: &str) -> Result<()> {
        debug!(policy = policy_name, "AttachPrincipalPolicy");
        self.inner
            .attach_principal_policy()
            .policy_name(policy_name)
            .principal(certificate_arn)
            .send()
            .await
            .map_err(|e| sdk_error("AttachPrincipalPolicy", e))?;
        Ok(())
    }
}

#[async_trait]
impl CredentialAuthority for IotClient {
    async fn issue_credential(&self) -> Result<CredentialBundle> {
        debug!("CreateKeysAndCertificate");
        let response = self
            .inner
            .create_keys_and_certificate()
            .set_as_active(true)
            .send()
            .await
            .map_err(|e| sdk_error("CreateKeysAndCertificate", e))?;

        let missing = |field: &'static str| ProvisionError::MissingField {
            operation: "CreateKeysAndCertificate",
            field,
        };

        let key_pair = response.key_pair().ok_or_else(|| missing("keyPair"))?;

        Ok(CredentialBundle {
            certificate_arn: response
                .certificate_arn()
                .ok_or_else(|| missing("certificateArn"))?
                .to_owned(),
            certificate_pem: response
                .certificate_pem()
                .ok_or_else(|| missing("certificatePem"))?
                .to_owned(),
            public_key_pem: key_pair
                .public_key()
                .ok_or_else(|| missing("keyPair.PublicKey"))?
                .to_owned(),
            private_key_pem: key_pair
                .private_key()
                .ok_or_else(|| missing("keyPair.PrivateKey"))?
                .to_owned(),
        })
    }
}
