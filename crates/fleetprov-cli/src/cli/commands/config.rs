//! `fleetprov config` - CLI configuration management.

use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::cli::args::{ConfigArgs, ConfigCommands};
use crate::config::Config;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Show => show_config(ctx).await,
        ConfigCommands::Set { key, value } => set_config(ctx, &key, &value).await,
        ConfigCommands::Path => show_path(ctx).await,
    }
}

async fn show_config(ctx: Context) -> Result<()> {
    let config = Config::load()?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        OutputFormat::Pretty => {
            println!("{}", "Current Configuration:".bold());
            println!();

            let display = |value: Option<String>| {
                value.unwrap_or_else(|| "(not set)".dimmed().to_string())
            };

            println!("  {} {}", "region:".bold(), display(config.region));
            println!("  {} {}", "device_type:".bold(), display(config.device_type));
            println!("  {} {}", "prefix:".bold(), display(config.prefix));
            println!("  {} {}", "bucket:".bold(), display(config.bucket));
            println!("  {} {}", "manifest_key:".bold(), display(config.manifest_key));
            println!("  {} {}", "role_arn:".bold(), display(config.role_arn));
            println!("  {} {}", "policy:".bold(), display(config.policy));
            println!(
                "  {} {}",
                "page_size:".bold(),
                display(config.page_size.map(|v| v.to_string()))
            );
            println!(
                "  {} {}",
                "poll_interval_secs:".bold(),
                display(config.poll_interval_secs.map(|v| v.to_string()))
            );
            println!(
                "  {} {}",
                "poll_attempts:".bold(),
                display(config.poll_attempts.map(|v| v.to_string()))
            );
            println!(
                "  {} {}",
                "credential_dir:".bold(),
                display(config.credential_dir.map(|p| p.display().to_string()))
            );
            println!(
                "  {} {}",
                "output_format:".bold(),
                display(config.output_format.map(|f| f.to_string()))
            );
        }
    }

    Ok(())
}

async fn set_config(_ctx: Context, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;

    match key {
        "region" => config.region = Some(value.to_owned()),
        "device_type" => config.device_type = Some(value.to_owned()),
        "prefix" => config.prefix = Some(value.to_owned()),
        "bucket" => config.bucket = Some(value.to_owned()),
        "manifest_key" => config.manifest_key = Some(value.to_owned()),
        "role_arn" => config.role_arn = Some(value.to_owned()),
        "policy" => config.policy = Some(value.to_owned()),
        "page_size" => config.page_size = Some(value.parse()?),
        "poll_interval_secs" => config.poll_interval_secs = Some(value.parse()?),
        "poll_attempts" => config.poll_attempts = Some(value.parse()?),
        "credential_dir" => config.credential_dir = Some(value.into()),
        "output_format" | "output" => config.output_format = Some(value.parse()?),
        _ => {
            anyhow::bail!(
                "Unknown config key: {}\n\n\
                 Available keys:\n  \
                 region             - AWS region\n  \
                 device_type        - Device type registered for the fleet\n  \
                 prefix             - Device name prefix\n  \
                 bucket             - Staging bucket for the manifest\n  \
                 manifest_key       - Object key for the uploaded manifest\n  \
                 role_arn           - Registration execution role ARN\n  \
                 policy             - Access policy name\n  \
                 page_size          - Page size for registry listings\n  \
                 poll_interval_secs - Seconds between task polls\n  \
                 poll_attempts      - Maximum task polls\n  \
                 credential_dir     - Root directory for PEM artifacts\n  \
                 output_format      - Default output format (pretty/json)",
                key
            );
        }
    }

    config.save()?;
    println!("{} {} set to {}.", "Success:".green().bold(), key, value.cyan());

    Ok(())
}

async fn show_path(_ctx: Context) -> Result<()> {
    let path = Config::path()?;
    println!("{}", path.display());
    Ok(())
}
