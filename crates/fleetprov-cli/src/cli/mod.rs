//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, Settings};
use crate::output::OutputFormat;

/// Run the CLI application.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Load configuration
    let config = Config::load()?;

    // Determine output format
    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);

    // Merge flags, environment, and config file
    let settings = Settings::resolve(&cli, &config);

    // Create context for commands
    let ctx = commands::Context {
        settings,
        output_format,
        verbose: cli.verbose,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Run(args) => commands::run::execute(ctx, args).await,
        Commands::Manifest(args) => commands::manifest::execute(ctx, args).await,
        Commands::Stage(args) => commands::stage::execute(ctx, args).await,
        Commands::Register(args) => commands::register::execute(ctx, args).await,
        Commands::Issue => commands::issue::execute(ctx).await,
        Commands::Link => commands::link::execute(ctx).await,
        Commands::Config(args) => commands::config::execute(ctx, args).await,
    }
}

/// Logs go to stderr so JSON output on stdout stays parseable.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
