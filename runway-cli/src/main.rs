//! Runway CLI
//!
//! Command-line interface for the Runway CI/CD dashboard API.

mod commands;
mod config;
mod id_resolver;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "runway")]
#[command(about = "Runway CI/CD Pipeline CLI", long_about = None)]
struct Cli {
    /// API base URL
    #[arg(long, env = "RUNWAY_API_URL")]
    api_url: Option<String>,

    /// Bearer token, as printed by `runway login`
    #[arg(long, env = "RUNWAY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "runway_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        api_url: cli.api_url,
        token: cli.token,
    };

    handle_command(cli.command, &config).await
}
