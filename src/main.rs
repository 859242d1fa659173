use clap::Parser;
use tracing_subscriber::EnvFilter;

use scratchdir::ProviderConfig;
use scratchdir::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ProviderConfig::from_env()?;
    cli::run(cli, config)
}
