//! Workspace command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use runway_core::dto::workspace::UpdateWorkspace;

use crate::config::Config;

/// Workspace subcommands
#[derive(Subcommand)]
pub enum WorkspaceCommands {
    /// Show workspace settings
    Show,
    /// Change workspace settings
    Set {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        default_branch: Option<String>,

        /// IANA timezone name, e.g. Europe/Berlin
        #[arg(long)]
        timezone: Option<String>,
    },
}

/// Handle workspace commands
pub async fn handle_workspace_command(command: WorkspaceCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    let workspace = match command {
        WorkspaceCommands::Show => client.get_workspace().await?,
        WorkspaceCommands::Set {
            name,
            default_branch,
            timezone,
        } => {
            let update = UpdateWorkspace {
                name,
                default_branch,
                timezone,
            };
            client.update_workspace(&update).await?
        }
    };

    println!("{}", "Workspace:".bold());
    println!("  Name:           {}", workspace.name.cyan());
    println!("  Default branch: {}", workspace.default_branch);
    println!("  Timezone:       {}", workspace.timezone);
    Ok(())
}
