//! Runner command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use runway_core::domain::runner::{Runner, RunnerStatus};
use runway_core::dto::runner::RunnerFilter;

use super::{format_time, print_page_footer};
use crate::config::Config;
use crate::id_resolver::resolve_runner_id;
use runway_client::ApiClient;

/// Runner subcommands
#[derive(Subcommand)]
pub enum RunnerCommands {
    /// List registered runners
    List {
        /// Only runners with this status (online, offline, busy)
        #[arg(long)]
        status: Option<RunnerStatus>,
    },
    /// Create a registration token for a new runner
    Token,
    /// Let a runner claim jobs again
    Enable {
        /// Runner ID or unambiguous prefix
        id: String,
    },
    /// Stop a runner from claiming jobs
    Disable {
        /// Runner ID or unambiguous prefix
        id: String,
    },
    /// Remove a runner
    Delete {
        /// Runner ID or unambiguous prefix
        id: String,
    },
}

/// Handle runner commands
pub async fn handle_runner_command(command: RunnerCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        RunnerCommands::List { status } => list_runners(&client, status).await,
        RunnerCommands::Token => create_token(&client).await,
        RunnerCommands::Enable { id } => {
            let uuid = resolve_runner_id(&client, &id).await?;
            let runner = client.enable_runner(uuid).await?;
            println!("{} Runner {} enabled", "✓".green(), runner.name.bold());
            Ok(())
        }
        RunnerCommands::Disable { id } => {
            let uuid = resolve_runner_id(&client, &id).await?;
            let runner = client.disable_runner(uuid).await?;
            println!("{} Runner {} disabled", "✓".green(), runner.name.bold());
            Ok(())
        }
        RunnerCommands::Delete { id } => {
            let uuid = resolve_runner_id(&client, &id).await?;
            client.delete_runner(uuid).await?;
            println!("{} Runner {} deleted", "✓".green(), uuid);
            Ok(())
        }
    }
}

async fn list_runners(client: &ApiClient, status: Option<RunnerStatus>) -> Result<()> {
    let page = client
        .list_runners(&RunnerFilter {
            status,
            ..Default::default()
        })
        .await?;

    if page.is_empty() {
        println!("{}", "No runners registered.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} registered runner(s):", page.len()).bold()
    );
    println!();
    for runner in &page.items {
        print_runner_summary(runner);
    }
    print_page_footer(page.meta);

    Ok(())
}

async fn create_token(client: &ApiClient) -> Result<()> {
    let token = client.create_registration_token().await?;

    println!("{}", "Runner registration token:".bold());
    println!("  {}", token.token.cyan());
    if let Some(expires_at) = &token.expires_at {
        println!("  Expires: {}", format_time(expires_at).dimmed());
    }
    Ok(())
}

fn print_runner_summary(runner: &Runner) {
    println!(
        "  {} {} {}",
        "▸".cyan(),
        runner.name.bold(),
        runner.id.to_string().dimmed()
    );
    println!("    Status:    {}", colorize_status(runner.status));
    println!(
        "    Platform:  {}/{} (v{})",
        runner.platform, runner.arch, runner.version
    );
    if !runner.labels.is_empty() {
        let labels: Vec<&str> = runner.labels.iter().map(String::as_str).collect();
        println!("    Labels:    {}", labels.join(", "));
    }
    if let Some(job) = runner.current_job_id {
        println!("    Job:       {}", job.to_string().dimmed());
    }
    println!(
        "    Last Seen: {}",
        format_time(&runner.last_seen_at).dimmed()
    );
    println!();
}

fn colorize_status(status: RunnerStatus) -> ColoredString {
    match status {
        RunnerStatus::Online => status.as_str().green(),
        RunnerStatus::Offline => status.as_str().red(),
        RunnerStatus::Busy => status.as_str().yellow(),
    }
}
