//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod api_key;
mod artifact;
mod auth;
mod execution;
mod pipeline;
mod runner;
mod secret;
mod workspace;

pub use api_key::ApiKeyCommands;
pub use artifact::ArtifactCommands;
pub use auth::AuthCommands;
pub use execution::ExecutionCommands;
pub use pipeline::PipelineCommands;
pub use runner::RunnerCommands;
pub use secret::SecretCommands;
pub use workspace::WorkspaceCommands;

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use runway_core::domain::execution::ExecutionStatus;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Pipeline management
    Pipeline {
        #[command(subcommand)]
        command: PipelineCommands,
    },
    /// Execution history, cancel and rerun
    Execution {
        #[command(subcommand)]
        command: ExecutionCommands,
    },
    /// Build artifacts
    Artifact {
        #[command(subcommand)]
        command: ArtifactCommands,
    },
    /// Runner management
    Runner {
        #[command(subcommand)]
        command: RunnerCommands,
    },
    /// Secret metadata
    Secret {
        #[command(subcommand)]
        command: SecretCommands,
    },
    /// Workspace settings
    Workspace {
        #[command(subcommand)]
        command: WorkspaceCommands,
    },
    /// Sign in and print a token for RUNWAY_TOKEN
    Login {
        /// Account name
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long, env = "RUNWAY_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Session management
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// API keys for automation
    ApiKey {
        #[command(subcommand)]
        command: ApiKeyCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Pipeline { command } => pipeline::handle_pipeline_command(command, config).await,
        Commands::Execution { command } => {
            execution::handle_execution_command(command, config).await
        }
        Commands::Artifact { command } => {
            artifact::handle_artifact_command(command, config).await
        }
        Commands::Runner { command } => runner::handle_runner_command(command, config).await,
        Commands::Secret { command } => secret::handle_secret_command(command, config).await,
        Commands::Workspace { command } => {
            workspace::handle_workspace_command(command, config).await
        }
        Commands::Login { username, password } => auth::login(config, &username, &password).await,
        Commands::Auth { command } => auth::handle_auth_command(command, config).await,
        Commands::ApiKey { command } => api_key::handle_api_key_command(command, config).await,
    }
}

/// Colorize execution or job status for display
pub(crate) fn colorize_status(status: ExecutionStatus) -> ColoredString {
    let text = status.as_str();
    match status {
        ExecutionStatus::Pending => text.yellow(),
        ExecutionStatus::Running => text.cyan(),
        ExecutionStatus::Success => text.green(),
        ExecutionStatus::Failed => text.red(),
        ExecutionStatus::Cancelled => text.dimmed(),
    }
}

/// Formats a timestamp the way every command prints them
pub(crate) fn format_time(time: &chrono::DateTime<chrono::Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Prints paging information when the backend sent any
pub(crate) fn print_page_footer(meta: Option<runway_core::dto::PaginationMeta>) {
    if let Some(meta) = meta {
        println!(
            "{}",
            format!(
                "Page {} of {} ({} total)",
                meta.page, meta.total_pages, meta.total
            )
            .dimmed()
        );
    }
}
