//! `fleetprov manifest` - Build the provisioning manifest file.

use anyhow::Result;
use colored::Colorize;

use fleetprov::workflow::ManifestBuilder;

use super::Context;
use crate::cli::args::ManifestArgs;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: ManifestArgs) -> Result<()> {
    let summary = ManifestBuilder::new(
        ctx.settings.prefix.as_str(),
        ctx.settings.device_type.as_str(),
    )
    .build(&args.manifest_path, args.start, args.count)?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Pretty => {
            println!("{}", "Manifest written".green().bold());
            println!("  {} {}", "Path:".bold(), summary.path.display());
            println!("  {} {}", "Devices:".bold(), summary.devices);
            if summary.devices > 0 {
                println!(
                    "  {} {}_{} .. {}_{}",
                    "Names:".bold(),
                    ctx.settings.prefix,
                    summary.first_sequence,
                    ctx.settings.prefix,
                    summary.first_sequence + summary.devices - 1
                );
            }
        }
    }

    Ok(())
}
