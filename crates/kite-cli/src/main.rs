//! Entry point: loads configuration, initializes logging based on
//! verbosity, parses arguments, and dispatches to a command handler —
//! the same three-step shape as `legalis-cli::main`.

use anyhow::Result;
use clap::Parser;
use kite_cli::{cli::Commands, commands, Cli, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(std::path::Path::new(path))?,
        None => Config::load(),
    };

    let log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::new(log_level))
        .init();

    match &cli.command {
        Commands::Demo => commands::handle_demo(&config).await?,
        Commands::Validate => commands::handle_validate().await?,
        Commands::Search { text, limit } => commands::handle_search(text, *limit).await?,
        Commands::Suggest { partial, limit } => commands::handle_suggest(partial, *limit).await?,
        Commands::Cite { text } => commands::handle_cite(text)?,
    }

    Ok(())
}
