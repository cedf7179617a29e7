//! Execution-related API endpoints
//!
//! Besides the plain wrappers this module has helpers that keep a locally
//! held [`Execution`] in sync with the backend. They refuse any server answer
//! that would move the local copy backwards in its lifecycle.

use crate::ApiClient;
use crate::error::{ClientError, Result};
use crate::request::RequestOptions;
use chrono::Utc;
use reqwest::Method;
use runway_core::CoreError;
use runway_core::domain::execution::Execution;
use runway_core::domain::job::Job;
use runway_core::domain::log::LogEntry;
use runway_core::dto::execution::ExecutionFilter;
use runway_core::dto::{ListEnvelope, Paginated, QueryParams};
use runway_core::lifecycle::{self, TransitionReport};
use uuid::Uuid;

impl ApiClient {
    // =============================================================================
    // Executions
    // =============================================================================

    /// List executions matching a filter
    pub async fn list_executions(&self, filter: &ExecutionFilter) -> Result<Paginated<Execution>> {
        self.get_list("/executions", filter).await
    }

    /// Get an execution by ID
    pub async fn get_execution(&self, execution_id: Uuid) -> Result<Execution> {
        self.get_json(&format!("/executions/{}", execution_id)).await
    }

    /// List the jobs of an execution
    pub async fn list_execution_jobs(&self, execution_id: Uuid) -> Result<Vec<Job>> {
        let page: Paginated<Job> = self
            .get_list(&format!("/executions/{}/jobs", execution_id), &QueryParams::new())
            .await?;
        Ok(page.into_items())
    }

    /// Request cancellation of an execution
    ///
    /// # Returns
    /// The updated execution, or `None` when the backend answers 204
    pub async fn cancel_execution(&self, execution_id: Uuid) -> Result<Option<Execution>> {
        let path = format!("/executions/{}/cancel", execution_id);
        tracing::info!("Cancelling execution: {}", execution_id);
        self.request(Method::POST, &path, RequestOptions::new()).await
    }

    /// Start a new execution for the same commit
    ///
    /// The original execution is not modified. A response carrying the
    /// original id is rejected.
    pub async fn rerun_execution(&self, execution_id: Uuid) -> Result<Execution> {
        let path = format!("/executions/{}/rerun", execution_id);
        let rerun: Execution = self.send_json(Method::POST, &path, &serde_json::json!({})).await?;

        if rerun.id == execution_id {
            return Err(ClientError::StateMachine(CoreError::Conflict(format!(
                "rerun of {} returned the original execution",
                execution_id
            ))));
        }
        Ok(rerun)
    }

    // =============================================================================
    // Logs
    // =============================================================================

    /// Get all logs of an execution
    pub async fn execution_logs(&self, execution_id: Uuid) -> Result<Vec<LogEntry>> {
        self.get_logs(&format!("/executions/{}/logs", execution_id))
            .await
    }

    /// Get the logs of one job
    pub async fn job_logs(&self, execution_id: Uuid, job_id: Uuid) -> Result<Vec<LogEntry>> {
        self.get_logs(&format!("/executions/{}/jobs/{}/logs", execution_id, job_id))
            .await
    }

    async fn get_logs(&self, path: &str) -> Result<Vec<LogEntry>> {
        let envelope: Option<ListEnvelope<LogEntry>> =
            self.request(Method::GET, path, RequestOptions::new()).await?;
        Ok(envelope
            .map(|e| Paginated::from(e).into_items())
            .unwrap_or_default())
    }

    // =============================================================================
    // Local State Helpers
    // =============================================================================

    /// Fetches a job's logs and merges them into the local copy
    ///
    /// # Returns
    /// The number of log lines that were new
    pub async fn sync_job_logs(&self, execution: &mut Execution, job_id: Uuid) -> Result<usize> {
        if execution.job(job_id).is_none() {
            return Err(CoreError::not_found("job", job_id).into());
        }

        let logs = self.job_logs(execution.id, job_id).await?;
        let job = execution
            .job_mut(job_id)
            .ok_or(CoreError::not_found("job", job_id))?;
        Ok(job.append_logs(logs))
    }

    /// Cancels an execution and applies the outcome to the local copy
    ///
    /// Already finished executions fail with a conflict before any request
    /// is sent. When the backend answers 204 the cancel is applied locally.
    pub async fn cancel_tracked(&self, execution: &mut Execution) -> Result<TransitionReport> {
        lifecycle::ensure_cancellable(execution)?;

        let mut report = match self.cancel_execution(execution.id).await? {
            Some(remote) => lifecycle::reconcile(execution, remote, Utc::now())?,
            None => TransitionReport::default(),
        };

        if !execution.is_terminal() {
            let local = lifecycle::cancel(execution, Utc::now())?;
            report.execution = local.execution;
            report.cancelled_jobs.extend(local.cancelled_jobs);
        }

        Ok(report)
    }

    /// Re-fetches an execution and reconciles it into the local copy
    ///
    /// A response that would rewind the local status is rejected and the
    /// local copy is left untouched.
    pub async fn refresh_execution(&self, execution: &mut Execution) -> Result<TransitionReport> {
        let remote = self.get_execution(execution.id).await?;
        Ok(lifecycle::reconcile(execution, remote, Utc::now())?)
    }
}
