//! API key command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use runway_core::dto::api_key::CreateApiKey;
use uuid::Uuid;

use super::format_time;
use crate::config::Config;

/// API key subcommands
#[derive(Subcommand)]
pub enum ApiKeyCommands {
    /// List your API keys
    List,
    /// Create a key and print it once
    Create {
        /// Name to recognize the key by
        name: String,

        /// Permission to grant; repeat for several (all when omitted)
        #[arg(long = "scope")]
        scopes: Vec<String>,
    },
    /// Revoke a key
    Delete {
        /// API key ID
        id: Uuid,
    },
}

/// Handle API key commands
pub async fn handle_api_key_command(command: ApiKeyCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        ApiKeyCommands::List => {
            let keys = client.list_api_keys().await?;
            if keys.is_empty() {
                println!("{}", "No API keys.".yellow());
                return Ok(());
            }
            for key in &keys {
                let state = if key.is_active {
                    "active".green()
                } else {
                    "inactive".dimmed()
                };
                println!(
                    "  {} {} {}… {}",
                    "▸".cyan(),
                    key.name.bold(),
                    key.key_prefix,
                    state
                );
                println!("    Scopes:    {}", key.scopes.join(", "));
                if let Some(last_used) = &key.last_used_at {
                    println!("    Last used: {}", format_time(last_used).dimmed());
                }
            }
        }
        ApiKeyCommands::Create { name, scopes } => {
            let created = client
                .create_api_key(&CreateApiKey {
                    name,
                    scopes,
                    expires_at: None,
                })
                .await?;
            eprintln!(
                "{} Created key {} ({}). It will not be shown again.",
                "✓".green(),
                created.name.bold(),
                created.id
            );
            println!("{}", created.key);
        }
        ApiKeyCommands::Delete { id } => {
            client.delete_api_key(id).await?;
            println!("{} API key {} revoked", "✓".green(), id);
        }
    }
    Ok(())
}
