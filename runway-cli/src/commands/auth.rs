//! Authentication command handlers

use anyhow::{Result, bail};
use clap::Subcommand;
use colored::*;

use crate::config::Config;

/// Session subcommands
#[derive(Subcommand)]
pub enum AuthCommands {
    /// Show the account the current token belongs to
    Whoami,
    /// Exchange the current token for a fresh one
    Refresh,
    /// End the session on the server
    Logout,
}

/// Log in and print the token so it can be exported as RUNWAY_TOKEN
pub async fn login(config: &Config, username: &str, password: &str) -> Result<()> {
    let mut client = config.client()?;
    let user = client.login(username, password).await?;

    eprintln!("{} Logged in as {} ({})", "✓".green(), user.username.bold(), user.role);
    if let Some(token) = client.token() {
        println!("{}", token);
    }
    Ok(())
}

/// Handle session commands
pub async fn handle_auth_command(command: AuthCommands, config: &Config) -> Result<()> {
    let mut client = config.client()?;
    if !client.is_authenticated() {
        bail!("Not logged in: pass --token or set RUNWAY_TOKEN");
    }

    match command {
        AuthCommands::Whoami => {
            let user = client.current_user().await?;
            println!("{} <{}>", user.username.bold(), user.email);
            println!("  Role: {}", user.role);
        }
        AuthCommands::Refresh => {
            client.refresh_token().await?;
            if let Some(token) = client.token() {
                println!("{}", token);
            }
        }
        AuthCommands::Logout => {
            client.logout().await?;
            eprintln!("{} Logged out", "✓".green());
        }
    }
    Ok(())
}
