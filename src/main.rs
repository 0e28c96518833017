use anyhow::Result;
use clap::Parser;
use vend::cli::Cli;
use vend::commands;

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing
    let default_filter = if cli.verbose {
        "vend=debug,info"
    } else {
        "vend=info,warn"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // Execute command
    commands::execute(cli)
}
