//! Bulk provisioning for AWS IoT device fleets.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use fleetprov::workflow::{PollPolicy, ResetPolicy, Workflow, WorkflowConfig};
//! use fleetprov::{IotClient, StorageClient};
//!
//! #[tokio::main]
//! async fn main() -> fleetprov::Result<()> {
//!     let store = StorageClient::from_env("eu-central-1").await;
//!     let registry = IotClient::from_env("eu-central-1").await;
//!
//!     let config = WorkflowConfig {
//!         device_type: "TRACKER".into(),
//!         name_prefix: "MOTO".into(),
//!         count: 5,
//!         start_sequence: 0,
//!         bucket: "fleet-staging".into(),
//!         manifest_key: "provisioning-data.json".into(),
//!         manifest_path: "provisioning-data.json".into(),
//!         template_path: "provisioning-template.json".into(),
//!         role_arn: "arn:aws:iam::123456789012:role/registration".into(),
//!         policy_name: "fleet-policy".into(),
//!         page_size: 25,
//!         credential_root: "secure".into(),
//!         reset: ResetPolicy::default(),
//!         poll: PollPolicy::default(),
//!     };
//!
//!     let report = Workflow::new(&store, &registry, config)
//!         .run(|device| println!("issued {device}"))
//!         .await?;
//!     println!("registered task {}", report.task.task_id);
//!
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/fleetprov/0.1.0")]

// Re-export core types and contracts
pub use fleetprov_core::*;

// Re-export the AWS clients
pub use fleetprov_client::{IotClient, StorageClient};

// Re-export the orchestration components
pub use fleetprov_workflow as workflow;

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
