//! Artifact command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use runway_core::dto::artifact::ArtifactFilter;
use uuid::Uuid;

use super::{format_time, print_page_footer};
use crate::config::Config;
use crate::id_resolver::resolve_execution_id;

/// Artifact subcommands
#[derive(Subcommand)]
pub enum ArtifactCommands {
    /// List the artifacts of an execution
    List {
        /// Execution ID or unambiguous prefix
        execution: String,

        /// Also show artifacts past their retention
        #[arg(long)]
        include_expired: bool,
    },
    /// Print where an artifact can be downloaded from
    Download {
        /// Artifact ID
        id: Uuid,
    },
}

/// Handle artifact commands
pub async fn handle_artifact_command(command: ArtifactCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        ArtifactCommands::List {
            execution,
            include_expired,
        } => {
            let execution_id = resolve_execution_id(&client, &execution).await?;
            let filter = ArtifactFilter {
                include_expired: include_expired.then_some(true),
                ..ArtifactFilter::for_execution(execution_id)
            };
            let page = client.list_artifacts(&filter).await?;

            if page.is_empty() {
                println!("{}", "No artifacts found.".yellow());
                return Ok(());
            }

            for artifact in &page.items {
                let expiry = if artifact.is_expired() {
                    "expired".red()
                } else {
                    format!("expires {}", format_time(&artifact.expires_at)).dimmed()
                };
                println!(
                    "  {} {} {}",
                    "▸".cyan(),
                    artifact.name.bold(),
                    artifact.id.to_string().dimmed()
                );
                println!(
                    "    Job:   {}",
                    artifact.job_name.as_deref().unwrap_or("-")
                );
                println!("    Size:  {:.2} MB ({})", artifact.size_mb(), expiry);
            }
            print_page_footer(page.meta);
            Ok(())
        }
        ArtifactCommands::Download { id } => {
            let download = client.download_artifact(id).await?;
            println!("{}", download.download_url);
            eprintln!(
                "  {} {} bytes, sha256 {}",
                download.name.bold(),
                download.size_bytes,
                download.checksum_sha256.dimmed()
            );
            Ok(())
        }
    }
}
