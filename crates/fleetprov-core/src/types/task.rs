use serde::{Deserialize, Serialize};

/// Everything the provider needs to start a bulk registration task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationSubmission {
    /// Provisioning template body, forwarded verbatim
    pub template_body: String,

    /// Bucket holding the staged manifest
    pub bucket: String,

    /// Object key of the staged manifest
    pub key: String,

    /// Execution role the provider assumes while registering devices
    pub role_arn: String,
}

/// Status of a bulk registration task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Task is still registering devices
    InProgress,
    /// Task finished successfully
    Completed,
    /// Task finished with a failure
    Failed,
    /// Task was cancelled on the provider side
    Cancelled,
    /// A status string the driver does not recognize
    Other(String),
}

impl TaskStatus {
    /// Returns true if the task will make no further progress
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl From<&str> for TaskStatus {
    fn from(status: &str) -> Self {
        match status {
            "InProgress" => Self::InProgress,
            "Completed" => Self::Completed,
            "Failed" => Self::Failed,
            "Cancelled" => Self::Cancelled,
            other => Self::Other(other.to_owned()),
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress => write!(f, "InProgress"),
            Self::Completed => write!(f, "Completed"),
            Self::Failed => write!(f, "Failed"),
            Self::Cancelled => write!(f, "Cancelled"),
            Self::Other(status) => write!(f, "{status}"),
        }
    }
}

/// One observation of a registration task's state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPoll {
    /// Status reported by the provider
    pub status: TaskStatus,

    /// Detail message accompanying the status, if any
    pub message: Option<String>,
}

impl TaskPoll {
    /// A poll carrying only a status
    #[must_use]
    pub const fn status(status: TaskStatus) -> Self {
        Self {
            status,
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_statuses() {
        assert_eq!(TaskStatus::from("InProgress"), TaskStatus::InProgress);
        assert_eq!(TaskStatus::from("Completed"), TaskStatus::Completed);
        assert_eq!(TaskStatus::from("Failed"), TaskStatus::Failed);
        assert_eq!(TaskStatus::from("Cancelled"), TaskStatus::Cancelled);
    }

    #[test]
    fn preserves_unrecognized_status() {
        let status = TaskStatus::from("Draining");
        assert_eq!(status, TaskStatus::Other("Draining".to_owned()));
        assert_eq!(status.to_string(), "Draining");
    }

    #[test]
    fn only_in_progress_is_non_terminal() {
        assert!(!TaskStatus::InProgress.is_terminal());
        assert!(TaskStatus::Completed.is_terminal());
        assert!(TaskStatus::Failed.is_terminal());
        assert!(TaskStatus::Cancelled.is_terminal());
        assert!(TaskStatus::Other("Draining".to_owned()).is_terminal());
    }
}
