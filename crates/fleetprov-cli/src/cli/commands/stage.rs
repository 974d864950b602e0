//! `fleetprov stage` - Reset the staging bucket and upload the manifest.

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use fleetprov::workflow::Stager;

use super::Context;
use crate::cli::args::StageArgs;
use crate::output::OutputFormat;

pub async fn execute(ctx: Context, args: StageArgs) -> Result<()> {
    let bucket = ctx.settings.bucket()?.to_owned();
    let key = ctx.settings.manifest_key.clone();

    let store = ctx.storage().await;
    let stager = Stager::new(&store);

    stager.ensure_bucket(&bucket).await?;
    stager.upload(&bucket, &key, &args.manifest_path).await?;

    match ctx.output_format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json!({
                    "bucket": bucket,
                    "key": key,
                    "manifest_path": args.manifest_path,
                }))?
            );
        }
        OutputFormat::Pretty => {
            println!("{}", "Manifest staged".green().bold());
            println!("  {} {}", "Bucket:".bold(), bucket);
            println!("  {} {}", "Key:".bold(), key);
        }
    }

    Ok(())
}
