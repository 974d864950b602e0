//! Bulk registration task submission and polling.

use std::time::Duration;

use fleetprov_core::{DeviceRegistry, ProvisionError, RegistrationSubmission, Result, TaskStatus};
use serde::Serialize;
use tracing::{info, warn};

/// Polling policy for the registration task state machine
#[derive(Debug, Clone)]
pub struct PollPolicy {
    /// Fixed delay between status polls
    pub interval: Duration,

    /// Maximum number of polls before the task is declared hung
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_attempts: 120,
        }
    }
}

/// Outcome of a completed registration task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskReport {
    /// Provider-assigned task id
    pub task_id: String,

    /// How many polls it took to observe completion
    pub polls: u32,
}

/// Submits a bulk registration task and polls it to a terminal state
pub struct TaskDriver<'a, R: DeviceRegistry + ?Sized> {
    registry: &'a R,
    poll: PollPolicy,
}

impl<'a, R: DeviceRegistry + ?Sized> TaskDriver<'a, R> {
    /// A driver with the default polling policy
    #[must_use]
    pub fn new(registry: &'a R) -> Self {
        Self {
            registry,
            poll: PollPolicy::default(),
        }
    }

    /// Override the polling policy
    #[must_use]
    pub fn poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Register the device type, submit `submission`, and poll the task to
    /// completion
    pub async fn run(
        &self,
        device_type: &str,
        submission: RegistrationSubmission,
    ) -> Result<TaskReport> {
        self.registry.ensure_device_type(device_type).await?;
        let task_id = self.registry.start_registration(submission).await?;
        info!(%task_id, "registration task started");
        self.wait(&task_id).await
    }

    /// Poll an already-submitted task until it reaches a terminal state.
    ///
    /// `Failed`, `Cancelled`, and unrecognized statuses abort the run;
    /// exhausting the attempt budget yields
    /// [`ProvisionError::TaskTimeout`].
    pub async fn wait(&self, task_id: &str) -> Result<TaskReport> {
        for attempt in 1..=self.poll.max_attempts {
            let poll = self.registry.registration_status(task_id).await?;

            match poll.status {
                TaskStatus::InProgress => {
                    info!(task_id, attempt, "registration task in progress");
                    if !self.poll.interval.is_zero() {
                        tokio::time::sleep(self.poll.interval).await;
                    }
                }
                TaskStatus::Completed => {
                    info!(task_id, attempt, "registration task completed");
                    return Ok(TaskReport {
                        task_id: task_id.to_owned(),
                        polls: attempt,
                    });
                }
                TaskStatus::Failed => {
                    return Err(ProvisionError::TaskFailed {
                        task_id: task_id.to_owned(),
                        message: poll
                            .message
                            .unwrap_or_else(|| "provider reported failure".to_owned()),
                    });
                }
                status => {
                    warn!(task_id, %status, "registration task in unexpected state");
                    return Err(ProvisionError::TaskUnexpectedStatus {
                        task_id: task_id.to_owned(),
                        status,
                    });
                }
            }
        }

        Err(ProvisionError::TaskTimeout {
            task_id: task_id.to_owned(),
            attempts: self.poll.max_attempts,
        })
    }
}
