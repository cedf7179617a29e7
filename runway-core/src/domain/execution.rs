//! Execution domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::job::Job;
use crate::domain::pipeline::{Pipeline, Trigger};

/// One concrete run of a pipeline against a commit
///
/// The pipeline name is denormalized so historical executions stay readable
/// after the pipeline itself is deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub id: Uuid,
    pub pipeline_id: Uuid,
    #[serde(default)]
    pub pipeline_name: String,
    /// Per-pipeline run counter, starting at 1
    #[serde(default)]
    pub number: u64,
    pub trigger: Trigger,
    pub status: ExecutionStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    pub commit: String,
    pub branch: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runner_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rerun_of: Option<Uuid>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

/// Source-control context an execution is started from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerContext {
    pub trigger: Trigger,
    pub commit: String,
    /// Defaults to the pipeline's branch when absent
    pub branch: Option<String>,
    pub author: String,
}

impl TriggerContext {
    pub fn new(trigger: Trigger, commit: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            trigger,
            commit: commit.into(),
            branch: None,
            author: author.into(),
        }
    }

    pub fn on_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }
}

impl Execution {
    /// Creates a pending execution with one pending job per pipeline stage
    pub fn from_pipeline(pipeline: &Pipeline, context: TriggerContext, number: u64) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            pipeline_id: pipeline.id,
            pipeline_name: pipeline.name.clone(),
            number,
            trigger: context.trigger,
            status: ExecutionStatus::Pending,
            started_at: Utc::now(),
            finished_at: None,
            commit: context.commit,
            branch: context.branch.unwrap_or_else(|| pipeline.branch.clone()),
            author: context.author,
            runner_id: None,
            rerun_of: None,
            jobs: pipeline
                .stages
                .iter()
                .map(|stage| Job::pending(id, stage))
                .collect(),
        }
    }

    /// Creates a fresh execution for the same commit context as `self`
    ///
    /// Jobs come from the pipeline's current stage list; nothing is carried
    /// over from this execution's jobs or logs.
    pub fn rerun(&self, pipeline: &Pipeline, number: u64) -> Self {
        let context = TriggerContext {
            trigger: Trigger::Manual,
            commit: self.commit.clone(),
            branch: Some(self.branch.clone()),
            author: self.author.clone(),
        };
        let mut execution = Self::from_pipeline(pipeline, context, number);
        execution.rerun_of = Some(self.id);
        execution
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Wall time between start and finish, once finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at
            .map(|finished| finished.signed_duration_since(self.started_at))
    }

    pub fn job(&self, job_id: Uuid) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == job_id)
    }

    pub fn job_mut(&mut self, job_id: Uuid) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|j| j.id == job_id)
    }

    pub fn job_by_name(&self, name: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.name == name)
    }
}

/// Status shared by executions and jobs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Pending,
    Running,
    Success,
    Failed,
    Cancelled,
}

impl ExecutionStatus {
    /// Success, failed and cancelled admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExecutionStatus::Success | ExecutionStatus::Failed | ExecutionStatus::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStatus::Pending => "pending",
            ExecutionStatus::Running => "running",
            ExecutionStatus::Success => "success",
            ExecutionStatus::Failed => "failed",
            ExecutionStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ExecutionStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ExecutionStatus::Pending),
            "running" => Ok(ExecutionStatus::Running),
            "success" => Ok(ExecutionStatus::Success),
            "failed" => Ok(ExecutionStatus::Failed),
            "cancelled" => Ok(ExecutionStatus::Cancelled),
            other => Err(format!("unknown execution status '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pipeline::Stage;

    fn pipeline() -> Pipeline {
        Pipeline::new(
            "api",
            "main",
            Trigger::Push,
            vec![Stage::new("checkout"), Stage::new("test"), Stage::new("build")],
        )
    }

    #[test]
    fn test_is_terminal() {
        assert!(!ExecutionStatus::Pending.is_terminal());
        assert!(!ExecutionStatus::Running.is_terminal());
        assert!(ExecutionStatus::Success.is_terminal());
        assert!(ExecutionStatus::Failed.is_terminal());
        assert!(ExecutionStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_from_pipeline_creates_pending_jobs_in_stage_order() {
        let p = pipeline();
        let e = Execution::from_pipeline(&p, TriggerContext::new(Trigger::Push, "abc123", "ana"), 1);

        assert_eq!(e.status, ExecutionStatus::Pending);
        assert_eq!(e.branch, "main");
        assert_eq!(e.pipeline_name, "api");
        assert!(e.finished_at.is_none());
        let names: Vec<_> = e.jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, ["checkout", "test", "build"]);
        assert!(e.jobs.iter().all(|j| j.status == ExecutionStatus::Pending));
        assert!(e.jobs.iter().all(|j| j.execution_id == e.id));
    }

    #[test]
    fn test_trigger_context_branch_override() {
        let p = pipeline();
        let ctx = TriggerContext::new(Trigger::PullRequest, "abc123", "ana").on_branch("feature/x");
        let e = Execution::from_pipeline(&p, ctx, 3);
        assert_eq!(e.branch, "feature/x");
        assert_eq!(e.number, 3);
    }

    #[test]
    fn test_rerun_keeps_context_with_fresh_jobs() {
        let p = pipeline();
        let original =
            Execution::from_pipeline(&p, TriggerContext::new(Trigger::Push, "abc123", "ana"), 1);
        let rerun = original.rerun(&p, 2);

        assert_ne!(rerun.id, original.id);
        assert_eq!(rerun.rerun_of, Some(original.id));
        assert_eq!(rerun.commit, original.commit);
        assert_eq!(rerun.author, original.author);
        assert!(rerun.jobs.iter().all(|j| j.execution_id == rerun.id));
        assert!(
            rerun
                .jobs
                .iter()
                .zip(&original.jobs)
                .all(|(a, b)| a.id != b.id && a.name == b.name)
        );
    }

    #[test]
    fn test_status_round_trip_spelling() {
        for status in [
            ExecutionStatus::Pending,
            ExecutionStatus::Running,
            ExecutionStatus::Success,
            ExecutionStatus::Failed,
            ExecutionStatus::Cancelled,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
            assert_eq!(status.as_str().parse::<ExecutionStatus>(), Ok(status));
        }
    }
}
