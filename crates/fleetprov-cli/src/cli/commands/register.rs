//! `fleetprov register` - Submit and poll the bulk registration task.

use anyhow::Result;
use colored::Colorize;
use indicatif::ProgressBar;
use std::time::Duration;

use fleetprov::workflow::TaskDriver;
use fleetprov::RegistrationSubmission;

use super::Context;
use crate::cli::args::RegisterArgs;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: RegisterArgs) -> Result<()> {
    let bucket = ctx.settings.bucket()?.to_owned();
    let role_arn = ctx.settings.role_arn()?.to_owned();
    let template_body = tokio::fs::read_to_string(&args.template).await?;

    let registry = ctx.registry().await;

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message("waiting for registration task");

    let report = TaskDriver::new(&registry)
        .poll_policy(ctx.settings.poll.clone())
        .run(
            &ctx.settings.device_type,
            RegistrationSubmission {
                template_body,
                bucket,
                key: ctx.settings.manifest_key.clone(),
                role_arn,
            },
        )
        .await?;

    spinner.finish_and_clear();

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Pretty => {
            println!("{}", "Registration task completed".green().bold());
            println!("  {} {}", "Task:".bold(), report.task_id);
            println!("  {} {}", "Polls:".bold(), report.polls);
        }
    }

    Ok(())
}
