//! dockhand CLI - run containers from declarative specs.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.global.debug {
        "dockhand=debug,dockhand_cli=debug"
    } else {
        "dockhand=info"
    };

    // Logs go to stderr so rendered commands and identifiers stay pipeable.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Render(args) => commands::render::execute(args, &cli.global).await,
        Commands::Run(args) => commands::run::execute(args, &cli.global).await,
        Commands::Create(args) => commands::create::execute(args, &cli.global).await,
        Commands::Pull(args) => commands::pull::execute(args, &cli.global).await,
        Commands::Login(args) => commands::login::execute(args, &cli.global).await,
    }
}
