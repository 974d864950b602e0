//! `fleetprov issue` - Issue credentials for every registered device.

use anyhow::Result;
use colored::Colorize;
use indicatif::ProgressBar;
use std::time::Duration;

use fleetprov::workflow::{CredentialIssuer, CredentialLayout};

use super::Context;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context) -> Result<()> {
    let registry = ctx.registry().await;
    let layout = CredentialLayout::new(&ctx.settings.credential_root);

    let spinner = ProgressBar::new_spinner();
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner.set_message("issuing credentials");

    let report = CredentialIssuer::new(&registry, &registry, layout, ctx.settings.page_size)
        .issue_all(|device| spinner.set_message(format!("issued {device}")))
        .await?;

    spinner.finish_and_clear();

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Pretty => {
            println!("{}", "Credentials issued".green().bold());
            println!("  {} {}", "Devices:".bold(), report.issued);
            println!(
                "  {} {}",
                "Artifacts:".bold(),
                ctx.settings.credential_root.display()
            );
        }
    }

    Ok(())
}
