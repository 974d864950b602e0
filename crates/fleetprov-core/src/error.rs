use thiserror::Error;

use crate::types::TaskStatus;

/// Result type alias for provisioning operations
pub type Result<T> = std::result::Result<T, ProvisionError>;

/// Errors that can occur while driving a bulk-provisioning run
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// Local filesystem operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A remote service call failed
    #[error("{operation} failed: {message}")]
    Service {
        /// Name of the remote operation that failed
        operation: &'static str,
        /// Error message, with the source chain flattened in
        message: String,
    },

    /// Upload was attempted against a bucket that does not exist
    #[error("bucket {bucket} does not exist")]
    BucketMissing {
        /// The bucket the upload targeted
        bucket: String,
    },

    /// The bucket reset-and-recreate cycle ran out of attempts
    #[error("could not reset bucket {bucket} after {attempts} attempts")]
    BucketReset {
        /// The bucket being reset
        bucket: String,
        /// How many create attempts were made
        attempts: u32,
    },

    /// The registration task reported failure
    #[error("registration task {task_id} failed: {message}")]
    TaskFailed {
        /// Provider-assigned task id
        task_id: String,
        /// Failure detail from the provider, if any
        message: String,
    },

    /// The registration task reported a status the driver cannot act on
    #[error("registration task {task_id} reported unexpected status {status}")]
    TaskUnexpectedStatus {
        /// Provider-assigned task id
        task_id: String,
        /// The status the provider returned
        status: TaskStatus,
    },

    /// The registration task never reached a terminal state
    #[error("registration task {task_id} still running after {attempts} polls")]
    TaskTimeout {
        /// Provider-assigned task id
        task_id: String,
        /// How many polls were made before giving up
        attempts: u32,
    },

    /// The configured access policy is not registered with the provider
    #[error("policy {name} is not registered")]
    PolicyNotFound {
        /// The policy name that was looked up
        name: String,
    },

    /// A provider response lacked a field the workflow depends on
    #[error("{operation} response missing {field}")]
    MissingField {
        /// The remote operation whose response was incomplete
        operation: &'static str,
        /// The absent field
        field: &'static str,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl ProvisionError {
    /// Build a [`ProvisionError::Service`] for a failed remote call
    #[must_use]
    pub fn service(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Service {
            operation,
            message: message.into(),
        }
    }

    /// Returns true if the error describes a terminal registration-task state
    #[must_use]
    pub const fn is_task_terminal(&self) -> bool {
        matches!(
            self,
            Self::TaskFailed { .. } | Self::TaskUnexpectedStatus { .. } | Self::TaskTimeout { .. }
        )
    }
}
