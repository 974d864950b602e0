//! `fleetprov run` - Full provisioning pipeline.

use anyhow::Result;
use colored::Colorize;
use indicatif::ProgressBar;
use std::time::Duration;

use fleetprov::workflow::{LinkOutcome, ResetPolicy, Workflow, WorkflowConfig};

use super::Context;
use crate::cli::args::RunArgs;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: RunArgs) -> Result<()> {
    let config = WorkflowConfig {
        device_type: ctx.settings.device_type.clone(),
        name_prefix: ctx.settings.prefix.clone(),
        count: args.count,
        start_sequence: args.start,
        bucket: ctx.settings.bucket()?.to_owned(),
        manifest_key: ctx.settings.manifest_key.clone(),
        manifest_path: args.manifest_path,
        template_path: args.template,
        role_arn: ctx.settings.role_arn()?.to_owned(),
        policy_name: ctx.settings.policy_name()?.to_owned(),
        page_size: ctx.settings.page_size,
        credential_root: ctx.settings.credential_root.clone(),
        reset: ResetPolicy::default(),
        poll: ctx.settings.poll.clone(),
    };

    let store = ctx.storage().await;
    let registry = ctx.registry().await;

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message(format!("provisioning {} devices", args.count));

    let report = Workflow::new(&store, &registry, config)
        .run(|device| spinner.set_message(format!("issued {device}")))
        .await?;

    spinner.finish_and_clear();

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Pretty => {
            println!("{}", "Provisioning complete!".green().bold());
            println!("  {} {}", "Devices:".bold(), report.manifest.devices);
            println!(
                "  {} {} ({} polls)",
                "Task:".bold(),
                report.task.task_id,
                report.task.polls
            );
            println!("  {} {}", "Credentials:".bold(), report.credentials.issued);
            match report.link {
                LinkOutcome::Attached { devices } => {
                    println!("  {} {} devices linked to the policy", "Linked:".bold(), devices);
                }
                LinkOutcome::SkippedMismatch {
                    devices,
                    certificates,
                } => {
                    println!(
                        "  {} {} devices vs {} certificates, linking skipped",
                        "Warning:".yellow().bold(),
                        devices,
                        certificates
                    );
                }
            }
        }
    }

    Ok(())
}
