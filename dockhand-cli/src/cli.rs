//! Top-level argument parsing and flags shared by every subcommand.

use crate::commands;
use clap::{Args, Parser, Subcommand};
use dockhand::{EngineOptions, RegistryClient};

/// dockhand - run containers from declarative specs through the engine CLI
#[derive(Parser, Debug)]
#[command(name = "dockhand")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalFlags,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the engine command line a spec renders to
    Render(commands::render::RenderArgs),

    /// Start a container and print its identifier
    Run(commands::run::RunCommandArgs),

    /// Create a container without starting it and print its identifier
    Create(commands::create::CreateArgs),

    /// Pull an image
    Pull(commands::pull::PullArgs),

    /// Log in to a registry
    Login(commands::login::LoginArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GlobalFlags {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Engine binary to drive
    #[arg(long, global = true, env = "DOCKHAND_ENGINE")]
    pub engine: Option<String>,

    /// Remote engine endpoint, passed as `-H <HOST>`
    #[arg(short = 'H', long = "host", global = true, env = "DOCKHAND_REMOTE_HOST")]
    pub host: Option<String>,
}

impl GlobalFlags {
    /// Apply the engine flags on top of `base`.
    pub fn engine_options(&self, base: EngineOptions) -> EngineOptions {
        let mut options = base;
        if let Some(binary) = self.engine.as_deref().filter(|b| !b.is_empty()) {
            options.binary = binary.to_string();
        }
        if let Some(host) = &self.host {
            options = options.with_remote_host(host.clone());
        }
        options
    }

    pub fn registry_client(&self) -> RegistryClient {
        RegistryClient::new(self.engine_options(EngineOptions::default()))
    }
}
