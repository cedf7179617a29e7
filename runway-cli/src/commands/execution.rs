//! Execution command handlers
//!
//! Handles listing and inspecting executions, cancelling, rerunning,
//! and printing logs.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use runway_core::domain::execution::{Execution, ExecutionStatus};
use runway_core::domain::log::{LogEntry, LogLevel};
use runway_core::dto::execution::ExecutionFilter;

use super::{colorize_status, format_time, print_page_footer};
use crate::config::Config;
use crate::id_resolver::{resolve_execution_id, resolve_job_id, resolve_pipeline_id};
use runway_client::ApiClient;

/// Execution subcommands
#[derive(Subcommand)]
pub enum ExecutionCommands {
    /// List executions, most recent first
    List {
        /// Only executions with this status
        #[arg(long)]
        status: Option<ExecutionStatus>,

        #[arg(long)]
        branch: Option<String>,

        /// Free-text search
        #[arg(long)]
        search: Option<String>,

        /// Pipeline ID or unambiguous prefix
        #[arg(long)]
        pipeline: Option<String>,

        #[arg(long)]
        page: Option<u32>,

        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Get execution details and its jobs
    Get {
        /// Execution ID or unambiguous prefix
        id: String,
    },
    /// Cancel a pending or running execution
    Cancel {
        /// Execution ID or unambiguous prefix
        id: String,
    },
    /// Start a new execution for the same commit
    Rerun {
        /// Execution ID or unambiguous prefix
        id: String,
    },
    /// Print execution logs
    Logs {
        /// Execution ID or unambiguous prefix
        id: String,

        /// Only this job (stage name, ID or prefix)
        #[arg(short, long)]
        job: Option<String>,
    },
}

/// Handle execution commands
pub async fn handle_execution_command(command: ExecutionCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        ExecutionCommands::List {
            status,
            branch,
            search,
            pipeline,
            page,
            page_size,
        } => {
            let pipeline_id = match pipeline {
                Some(pipeline) => Some(resolve_pipeline_id(&client, &pipeline).await?),
                None => None,
            };
            let filter = ExecutionFilter {
                status,
                branch,
                search,
                pipeline_id,
                page,
                page_size,
            };
            list_executions(&client, &filter).await
        }
        ExecutionCommands::Get { id } => get_execution(&client, &id).await,
        ExecutionCommands::Cancel { id } => cancel_execution(&client, &id).await,
        ExecutionCommands::Rerun { id } => rerun_execution(&client, &id).await,
        ExecutionCommands::Logs { id, job } => print_logs(&client, &id, job).await,
    }
}

async fn list_executions(client: &ApiClient, filter: &ExecutionFilter) -> Result<()> {
    let page = client.list_executions(filter).await?;

    if page.is_empty() {
        println!("{}", "No executions found.".yellow());
        return Ok(());
    }

    println!("{}", format!("Found {} execution(s):", page.len()).bold());
    println!();
    for execution in &page.items {
        print_execution_summary(execution);
    }
    print_page_footer(page.meta);

    Ok(())
}

async fn get_execution(client: &ApiClient, id: &str) -> Result<()> {
    let uuid = resolve_execution_id(client, id).await?;
    let mut execution = client.get_execution(uuid).await?;

    if execution.jobs.is_empty() {
        execution.jobs = client.list_execution_jobs(uuid).await?;
    }

    print_execution_details(&execution);
    Ok(())
}

async fn cancel_execution(client: &ApiClient, id: &str) -> Result<()> {
    let uuid = resolve_execution_id(client, id).await?;
    let mut execution = client.get_execution(uuid).await?;

    let report = client.cancel_tracked(&mut execution).await?;

    println!(
        "{} Execution {} #{} is {}",
        "✓".green(),
        execution.pipeline_name.bold(),
        execution.number,
        colorize_status(execution.status)
    );
    if !report.cancelled_jobs.is_empty() {
        println!("  {} job(s) cancelled", report.cancelled_jobs.len());
    }
    Ok(())
}

async fn rerun_execution(client: &ApiClient, id: &str) -> Result<()> {
    let uuid = resolve_execution_id(client, id).await?;
    let rerun = client.rerun_execution(uuid).await?;

    println!(
        "{} Rerun started: {} #{}",
        "✓".green(),
        rerun.pipeline_name.bold(),
        rerun.number
    );
    println!("  Execution: {}", rerun.id.to_string().dimmed());
    Ok(())
}

async fn print_logs(client: &ApiClient, id: &str, job: Option<String>) -> Result<()> {
    let uuid = resolve_execution_id(client, id).await?;

    let logs = match job {
        Some(job) => {
            let execution = client.get_execution(uuid).await?;
            let job_id = resolve_job_id(&execution, &job)?;
            client.job_logs(uuid, job_id).await?
        }
        None => client.execution_logs(uuid).await?,
    };

    if logs.is_empty() {
        println!("{}", "No logs found.".yellow());
        return Ok(());
    }

    println!("{}", "─".repeat(80).dimmed());
    for entry in &logs {
        print_log_entry(entry);
    }
    println!("{}", "─".repeat(80).dimmed());
    Ok(())
}

fn print_execution_summary(execution: &Execution) {
    println!(
        "  {} {} #{} {}",
        "▸".cyan(),
        execution.pipeline_name.bold(),
        execution.number,
        execution.id.to_string().dimmed()
    );
    println!("    Status:  {}", colorize_status(execution.status));
    println!(
        "    Commit:  {} on {} by {}",
        short_commit(&execution.commit),
        execution.branch,
        execution.author
    );
    println!("    Started: {}", format_time(&execution.started_at).dimmed());
    println!();
}

fn print_execution_details(execution: &Execution) {
    println!("{}", "Execution Details:".bold());
    println!("  ID:        {}", execution.id.to_string().cyan());
    println!("  Pipeline:  {} #{}", execution.pipeline_name, execution.number);
    println!("  Status:    {}", colorize_status(execution.status));
    println!("  Trigger:   {}", execution.trigger);
    println!("  Commit:    {}", execution.commit);
    println!("  Branch:    {}", execution.branch);
    println!("  Author:    {}", execution.author);
    println!("  Started:   {}", format_time(&execution.started_at));
    if let Some(finished) = &execution.finished_at {
        println!("  Finished:  {}", format_time(finished));
    }
    if let Some(duration) = execution.duration() {
        println!("  Duration:  {}s", duration.num_seconds());
    }
    if let Some(original) = execution.rerun_of {
        println!("  Rerun of:  {}", original.to_string().dimmed());
    }

    if execution.jobs.is_empty() {
        return;
    }

    println!("\n{}", "Jobs:".bold());
    for job in &execution.jobs {
        let duration = job
            .duration()
            .map(|d| format!(" ({}s)", d.num_seconds()))
            .unwrap_or_default();
        println!(
            "  {} {:<20} {}{}",
            "▸".cyan(),
            job.name,
            colorize_status(job.status),
            duration.dimmed()
        );
    }
}

fn print_log_entry(entry: &LogEntry) {
    let level = entry.level.to_string().to_uppercase();
    let level = match entry.level {
        LogLevel::Debug => level.dimmed(),
        LogLevel::Info => level.cyan(),
        LogLevel::Warn => level.yellow(),
        LogLevel::Error => level.red(),
    };

    println!(
        "{} [{}] {}",
        entry.time.format("%H:%M:%S").to_string().dimmed(),
        level,
        entry.message
    );
}

fn short_commit(commit: &str) -> &str {
    commit.get(..8).unwrap_or(commit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_commit() {
        assert_eq!(short_commit("0123456789abcdef"), "01234567");
        assert_eq!(short_commit("abc"), "abc");
    }
}
