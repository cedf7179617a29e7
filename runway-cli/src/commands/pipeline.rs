//! Pipeline command handlers
//!
//! Handles listing, viewing, running and deleting pipelines.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use runway_core::domain::pipeline::{Pipeline, PipelineStatus};
use runway_core::dto::pipeline::{PipelineFilter, RunPipeline};

use super::{colorize_status, format_time, print_page_footer};
use crate::config::Config;
use crate::id_resolver::resolve_pipeline_id;
use runway_client::ApiClient;

/// Pipeline subcommands
#[derive(Subcommand)]
pub enum PipelineCommands {
    /// List pipelines
    List {
        /// Only pipelines with this status (active, inactive, archived)
        #[arg(long)]
        status: Option<PipelineStatus>,

        /// Free-text search
        #[arg(long)]
        search: Option<String>,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Get pipeline details
    Get {
        /// Pipeline ID or unambiguous prefix
        id: String,
    },
    /// Start a manual run
    Run {
        /// Pipeline ID or unambiguous prefix
        id: String,

        /// Branch to build instead of the pipeline's default
        #[arg(short, long)]
        branch: Option<String>,
    },
    /// Delete a pipeline
    Delete {
        /// Pipeline ID or unambiguous prefix
        id: String,
    },
    /// Show stored configuration versions
    Configs {
        /// Pipeline ID or unambiguous prefix
        id: String,
    },
}

/// Handle pipeline commands
pub async fn handle_pipeline_command(command: PipelineCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        PipelineCommands::List {
            status,
            search,
            page,
            page_size,
        } => {
            let filter = PipelineFilter {
                status,
                search,
                page,
                page_size,
            };
            list_pipelines(&client, &filter).await
        }
        PipelineCommands::Get { id } => get_pipeline(&client, &id).await,
        PipelineCommands::Run { id, branch } => run_pipeline(&client, &id, branch).await,
        PipelineCommands::Delete { id } => delete_pipeline(&client, &id).await,
        PipelineCommands::Configs { id } => list_configs(&client, &id).await,
    }
}

async fn list_pipelines(client: &ApiClient, filter: &PipelineFilter) -> Result<()> {
    let page = client.list_pipelines(filter).await?;

    if page.is_empty() {
        println!("{}", "No pipelines found.".yellow());
        return Ok(());
    }

    println!("{}", format!("Found {} pipeline(s):", page.len()).bold());
    println!();
    for pipeline in &page.items {
        print_pipeline_summary(pipeline);
    }
    print_page_footer(page.meta);

    Ok(())
}

async fn get_pipeline(client: &ApiClient, id: &str) -> Result<()> {
    let uuid = resolve_pipeline_id(client, id).await?;
    let pipeline = client.get_pipeline(uuid).await?;

    print_pipeline_details(&pipeline);
    Ok(())
}

async fn run_pipeline(client: &ApiClient, id: &str, branch: Option<String>) -> Result<()> {
    let uuid = resolve_pipeline_id(client, id).await?;
    let execution = client.run_pipeline(uuid, &RunPipeline { branch }).await?;

    println!(
        "{} Started {} #{} on {}",
        "✓".green(),
        execution.pipeline_name.bold(),
        execution.number,
        execution.branch.cyan()
    );
    println!("  Execution: {}", execution.id.to_string().dimmed());
    println!("  Status:    {}", colorize_status(execution.status));
    Ok(())
}

async fn delete_pipeline(client: &ApiClient, id: &str) -> Result<()> {
    let uuid = resolve_pipeline_id(client, id).await?;
    client.delete_pipeline(uuid).await?;

    println!("{} Pipeline {} deleted", "✓".green(), uuid);
    Ok(())
}

async fn list_configs(client: &ApiClient, id: &str) -> Result<()> {
    let uuid = resolve_pipeline_id(client, id).await?;
    let configs = client.pipeline_configs(uuid).await?;

    if configs.is_empty() {
        println!("{}", "No configuration versions.".yellow());
        return Ok(());
    }

    for config in &configs {
        let validity = if config.is_valid {
            "valid".green()
        } else {
            "invalid".red()
        };
        println!(
            "  {} v{} {} {}",
            "▸".cyan(),
            config.version,
            validity,
            format_time(&config.created_at).dimmed()
        );
        if !config.commit_sha.is_empty() {
            println!("    Commit: {} {}", config.commit_sha, config.commit_message);
        }
        for error in &config.validation_errors {
            println!("    {} {}", "✗".red(), error);
        }
    }
    Ok(())
}

fn colorize_pipeline_status(status: PipelineStatus) -> ColoredString {
    match status {
        PipelineStatus::Active => status.as_str().green(),
        PipelineStatus::Inactive => status.as_str().yellow(),
        PipelineStatus::Archived => status.as_str().dimmed(),
    }
}

fn print_pipeline_summary(pipeline: &Pipeline) {
    println!(
        "  {} {} {}",
        "▸".cyan(),
        pipeline.name.bold(),
        pipeline.id.to_string().dimmed()
    );
    println!("    Status:  {}", colorize_pipeline_status(pipeline.status));
    println!("    Branch:  {} ({})", pipeline.branch, pipeline.trigger);
    println!(
        "    Runs:    {} ({:.1}% success)",
        pipeline.total_runs(),
        pipeline.success_rate()
    );
    println!();
}

fn print_pipeline_details(pipeline: &Pipeline) {
    println!("{}", "Pipeline Details:".bold());
    println!("  ID:          {}", pipeline.id.to_string().cyan());
    println!("  Name:        {}", pipeline.name);
    if let Some(description) = &pipeline.description {
        println!("  Description: {}", description);
    }
    println!("  Status:      {}", colorize_pipeline_status(pipeline.status));
    println!("  Branch:      {}", pipeline.branch);
    println!("  Trigger:     {}", pipeline.trigger);
    println!("  Created:     {}", format_time(&pipeline.created_at));
    println!("  Updated:     {}", format_time(&pipeline.updated_at));
    println!(
        "  Runs:        {} ({:.1}% success)",
        pipeline.total_runs(),
        pipeline.success_rate()
    );

    if pipeline.stages.is_empty() {
        return;
    }

    println!("\n{}", "Stages:".bold());
    for (i, stage) in pipeline.stages.iter().enumerate() {
        println!("  {}. {}", i + 1, stage.name.cyan());
        if let Some(needs) = &stage.needs {
            println!("     needs: {}", needs.join(", ").dimmed());
        }
        if let Some(timeout) = stage.timeout {
            println!("     timeout: {}s", timeout);
        }
        for command in &stage.commands {
            println!("     $ {}", command);
        }
    }
}
