//! fleetprov - Bulk provisioning CLI for AWS IoT device fleets.

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    fleetprov_cli::run().await
}
