//! `fleetprov link` - Attach certificates and the access policy.

use anyhow::Result;
use colored::Colorize;

use fleetprov::workflow::{LinkOutcome, Linker};

use super::Context;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context) -> Result<()> {
    let policy = ctx.settings.policy_name()?.to_owned();

    let registry = ctx.registry().await;
    let outcome = Linker::new(&registry, policy.as_str(), ctx.settings.page_size)
        .attach_all()
        .await?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        OutputFormat::Pretty => match outcome {
            LinkOutcome::Attached { devices } => {
                println!("{}", "Linking complete".green().bold());
                println!("  {} {}", "Devices:".bold(), devices);
                println!("  {} {}", "Policy:".bold(), policy);
            }
            LinkOutcome::SkippedMismatch {
                devices,
                certificates,
            } => {
                println!(
                    "{} {} devices vs {} certificates, nothing attached",
                    "Warning:".yellow().bold(),
                    devices,
                    certificates
                );
            }
        },
    }

    Ok(())
}
