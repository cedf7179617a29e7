//! Secret command handlers
//!
//! Only metadata is shown; values never leave the server.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use runway_core::domain::secret::SecretScope;
use runway_core::dto::secret::SecretFilter;

use super::{format_time, print_page_footer};
use crate::config::Config;

/// Secret subcommands
#[derive(Subcommand)]
pub enum SecretCommands {
    /// List secrets
    List {
        /// Only secrets with this scope (organization, repository, pipeline)
        #[arg(long)]
        scope: Option<SecretScope>,

        /// Free-text search
        #[arg(long)]
        search: Option<String>,
    },
}

/// Handle secret commands
pub async fn handle_secret_command(command: SecretCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        SecretCommands::List { scope, search } => {
            let filter = SecretFilter {
                scope,
                search,
                ..Default::default()
            };
            let page = client.list_secrets(&filter).await?;

            if page.is_empty() {
                println!("{}", "No secrets found.".yellow());
                return Ok(());
            }

            for secret in &page.items {
                println!(
                    "  {} {} {}",
                    "▸".cyan(),
                    secret.name.bold(),
                    format!("[{}]", secret.scope).dimmed()
                );
                println!("    Used in:  {} pipeline(s)", secret.used_in.len());
                println!("    Updated:  {}", format_time(&secret.updated_at).dimmed());
            }
            print_page_footer(page.meta);
            Ok(())
        }
    }
}
