//! Command-line interface.
//!
//! ```text
//! scratchdir create --provider rooted --context '[class:Foo]' --count 2
//! scratchdir variants
//! scratchdir config
//! ```

mod config;
mod create;

use clap::{Parser, Subcommand};

pub use config::run_config_command;
pub use create::{CreateArgs, run_create_command};

use crate::config::ProviderConfig;
use crate::registry::ProviderRegistry;

#[derive(Parser, Debug)]
#[command(name = "scratchdir", version, about = "Create ephemeral test directories")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create one or more temporary directories and print their paths
    Create(CreateArgs),

    /// List the registered provider variants
    Variants,

    /// Show the resolved configuration
    Config {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run a parsed command against the resolved configuration.
pub fn run(cli: Cli, config: ProviderConfig) -> anyhow::Result<()> {
    match cli.command {
        Command::Create(args) => run_create_command(args, &config),
        Command::Variants => {
            for name in ProviderRegistry::with_builtins(&config).variants() {
                println!("{}", name);
            }
            Ok(())
        }
        Command::Config { json } => run_config_command(&config, json),
    }
}
