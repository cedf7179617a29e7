//! ID resolver module
//!
//! Resolves full UUIDs or unambiguous UUID prefixes to the resource they
//! name. Jobs can also be named by their stage name.

use anyhow::{Context, Result, anyhow};
use runway_client::ApiClient;
use runway_core::domain::execution::Execution;
use runway_core::domain::pipeline::Pipeline;
use runway_core::domain::runner::Runner;
use runway_core::dto::execution::ExecutionFilter;
use runway_core::dto::pipeline::PipelineFilter;
use runway_core::dto::runner::RunnerFilter;
use uuid::Uuid;

/// Identifier that can be either a full UUID or an unambiguous prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdOrPrefix {
    Full(Uuid),
    Prefix(String),
}

impl IdOrPrefix {
    /// Parses as a full UUID first, otherwise keeps the input as a prefix
    pub fn parse(input: &str) -> Self {
        match Uuid::parse_str(input) {
            Ok(uuid) => IdOrPrefix::Full(uuid),
            Err(_) => IdOrPrefix::Prefix(input.trim().to_lowercase()),
        }
    }
}

impl std::fmt::Display for IdOrPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdOrPrefix::Full(uuid) => write!(f, "{}", uuid),
            IdOrPrefix::Prefix(prefix) => write!(f, "{}", prefix),
        }
    }
}

/// Anything listed by the API with a UUID
pub trait Identified {
    fn id(&self) -> Uuid;
}

impl Identified for Pipeline {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Identified for Execution {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Identified for Runner {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Picks the single item whose id starts with the prefix
pub fn resolve_in<T: Identified>(kind: &str, items: &[T], input: &IdOrPrefix) -> Result<Uuid> {
    let prefix = match input {
        IdOrPrefix::Full(uuid) => return Ok(*uuid),
        IdOrPrefix::Prefix(prefix) => prefix,
    };

    let matches: Vec<Uuid> = items
        .iter()
        .map(Identified::id)
        .filter(|id| id.to_string().starts_with(prefix.as_str()))
        .collect();

    match matches.as_slice() {
        [] => Err(anyhow!("No {} found with ID starting with '{}'", kind, prefix)),
        [id] => Ok(*id),
        ids => {
            let ids: Vec<String> = ids.iter().map(Uuid::to_string).collect();
            Err(anyhow!(
                "Ambiguous prefix '{}' matches multiple {}s: {}",
                prefix,
                kind,
                ids.join(", ")
            ))
        }
    }
}

/// Resolve a pipeline ID or prefix to a full UUID
pub async fn resolve_pipeline_id(client: &ApiClient, input: &str) -> Result<Uuid> {
    let input = IdOrPrefix::parse(input);
    if let IdOrPrefix::Full(uuid) = input {
        return Ok(uuid);
    }

    let pipelines = client
        .list_pipelines(&PipelineFilter::default())
        .await
        .context("Failed to fetch pipelines for ID resolution")?;
    resolve_in("pipeline", &pipelines.items, &input)
}

/// Resolve an execution ID or prefix to a full UUID
pub async fn resolve_execution_id(client: &ApiClient, input: &str) -> Result<Uuid> {
    let input = IdOrPrefix::parse(input);
    if let IdOrPrefix::Full(uuid) = input {
        return Ok(uuid);
    }

    let executions = client
        .list_executions(&ExecutionFilter::default())
        .await
        .context("Failed to fetch executions for ID resolution")?;
    resolve_in("execution", &executions.items, &input)
}

/// Resolve a runner ID or prefix to a full UUID
pub async fn resolve_runner_id(client: &ApiClient, input: &str) -> Result<Uuid> {
    let input = IdOrPrefix::parse(input);
    if let IdOrPrefix::Full(uuid) = input {
        return Ok(uuid);
    }

    let runners = client
        .list_runners(&RunnerFilter::default())
        .await
        .context("Failed to fetch runners for ID resolution")?;
    resolve_in("runner", &runners.items, &input)
}

/// Resolve a job within an execution by stage name, ID, or ID prefix
pub fn resolve_job_id(execution: &Execution, input: &str) -> Result<Uuid> {
    if let Some(job) = execution.job_by_name(input) {
        return Ok(job.id);
    }

    let input = IdOrPrefix::parse(input);
    let ids: Vec<JobId> = execution.jobs.iter().map(|j| JobId(j.id)).collect();
    resolve_in("job", &ids, &input)
        .with_context(|| format!("in execution #{} ({})", execution.number, execution.id))
}

struct JobId(Uuid);

impl Identified for JobId {
    fn id(&self) -> Uuid {
        self.0
    }
}
