//! In-memory execution tracker
//!
//! Owns pipelines and their executions and routes every status report
//! through [`crate::lifecycle`]. Pipeline run statistics are recomputed here
//! whenever an execution is created or finishes.

use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::execution::{Execution, ExecutionStatus, TriggerContext};
use crate::domain::log::LogEntry;
use crate::domain::pipeline::{Pipeline, PipelineStatus};
use crate::dto::execution::ExecutionFilter;
use crate::dto::page::{Paginated, PaginationMeta};
use crate::error::{CoreError, Result};
use crate::lifecycle::{self, TransitionReport};

const PIPELINE: &str = "pipeline";
const EXECUTION: &str = "execution";

#[derive(Debug, Default)]
pub struct ExecutionTracker {
    pipelines: HashMap<Uuid, Pipeline>,
    executions: HashMap<Uuid, Execution>,
    /// Execution ids in trigger order
    order: Vec<Uuid>,
    /// Last run number handed out per pipeline
    run_numbers: HashMap<Uuid, u64>,
}

impl ExecutionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a pipeline definition
    ///
    /// Run statistics are owned by the tracker and are recomputed, so any
    /// values carried by `pipeline` are discarded.
    pub fn upsert_pipeline(&mut self, pipeline: Pipeline) -> Result<&Pipeline> {
        pipeline.validate_stages()?;

        let id = pipeline.id;
        tracing::info!("Pipeline registered: {} ({})", pipeline.name, id);
        self.pipelines.insert(id, pipeline);
        self.refresh_statistics(id);

        self.pipeline(id)
    }

    /// Removes a pipeline; its executions are kept as history
    pub fn remove_pipeline(&mut self, id: Uuid) -> Result<Pipeline> {
        let pipeline = self
            .pipelines
            .remove(&id)
            .ok_or(CoreError::not_found(PIPELINE, id))?;
        tracing::info!("Pipeline removed: {}", id);
        Ok(pipeline)
    }

    pub fn pipeline(&self, id: Uuid) -> Result<&Pipeline> {
        self.pipelines
            .get(&id)
            .ok_or(CoreError::not_found(PIPELINE, id))
    }

    pub fn pipelines(&self) -> impl Iterator<Item = &Pipeline> {
        self.pipelines.values()
    }

    /// Starts a new pending execution of a pipeline
    pub fn trigger(&mut self, pipeline_id: Uuid, context: TriggerContext) -> Result<&Execution> {
        let pipeline = self.pipeline(pipeline_id)?;

        if pipeline.status == PipelineStatus::Archived {
            return Err(CoreError::Conflict(format!(
                "pipeline '{}' is archived",
                pipeline.name
            )));
        }
        if pipeline.stages.is_empty() {
            return Err(CoreError::Validation(format!(
                "pipeline '{}' has no stages",
                pipeline.name
            )));
        }

        let number = self.next_run_number(pipeline_id);
        let execution = Execution::from_pipeline(self.pipeline(pipeline_id)?, context, number);
        tracing::info!(
            "Execution created: {} (#{}) for pipeline: {}",
            execution.id,
            number,
            pipeline_id
        );

        Ok(self.insert_execution(execution))
    }

    pub fn execution(&self, id: Uuid) -> Result<&Execution> {
        self.executions
            .get(&id)
            .ok_or(CoreError::not_found(EXECUTION, id))
    }

    /// Lists executions matching `filter`, most recent first
    ///
    /// Without a page size every match is returned and no paging metadata is
    /// attached.
    pub fn executions(&self, filter: &ExecutionFilter) -> Paginated<Execution> {
        let matches: Vec<&Execution> = self
            .order
            .iter()
            .rev()
            .filter_map(|id| self.executions.get(id))
            .filter(|e| matches_filter(e, filter))
            .collect();

        let page_size = match filter.page_size {
            Some(size) if size > 0 => size,
            _ => return Paginated::new(matches.into_iter().cloned().collect(), None),
        };

        let page = filter.page.unwrap_or(1).max(1);
        let skip = (page as usize - 1).saturating_mul(page_size as usize);
        let items = matches
            .iter()
            .skip(skip)
            .take(page_size as usize)
            .map(|e| (*e).clone())
            .collect();

        Paginated::new(
            items,
            Some(PaginationMeta::new(matches.len() as u64, page, page_size)),
        )
    }

    /// Applies an engine-reported execution status
    pub fn report_execution_status(
        &mut self,
        id: Uuid,
        status: ExecutionStatus,
    ) -> Result<TransitionReport> {
        let execution = self.execution_mut(id)?;
        let pipeline_id = execution.pipeline_id;
        let report = lifecycle::apply_execution_status(execution, status, Utc::now())?;

        self.after_transition(id, pipeline_id, &report);
        Ok(report)
    }

    /// Applies an engine-reported job status
    pub fn report_job_status(
        &mut self,
        execution_id: Uuid,
        job_id: Uuid,
        status: ExecutionStatus,
    ) -> Result<TransitionReport> {
        let execution = self.execution_mut(execution_id)?;
        let pipeline_id = execution.pipeline_id;
        let report = lifecycle::apply_job_status(execution, job_id, status, Utc::now())?;

        if let Some(change) = report.job {
            tracing::info!(
                "Job {} of execution {}: {} -> {}",
                job_id,
                execution_id,
                change.from,
                change.to
            );
        }
        self.after_transition(execution_id, pipeline_id, &report);
        Ok(report)
    }

    /// Appends log lines to a job, returning how many were new
    pub fn append_logs(
        &mut self,
        execution_id: Uuid,
        job_id: Uuid,
        entries: Vec<LogEntry>,
    ) -> Result<usize> {
        let job = self
            .execution_mut(execution_id)?
            .job_mut(job_id)
            .ok_or(CoreError::not_found("job", job_id))?;

        let added = job.append_logs(entries);
        tracing::debug!("Added {} log entries for job: {}", added, job_id);
        Ok(added)
    }

    /// Cancels a pending or running execution
    pub fn cancel(&mut self, id: Uuid) -> Result<&Execution> {
        let execution = self.execution_mut(id)?;
        let pipeline_id = execution.pipeline_id;
        let report = lifecycle::cancel(execution, Utc::now())?;

        tracing::info!(
            "Execution cancelled: {} ({} jobs cancelled)",
            id,
            report.cancelled_jobs.len()
        );
        self.refresh_statistics(pipeline_id);
        self.execution(id)
    }

    /// Starts a fresh execution for the same commit as `id`
    ///
    /// The original execution is left untouched. Jobs come from the
    /// pipeline's current stages, so a deleted pipeline cannot be rerun.
    pub fn rerun(&mut self, id: Uuid) -> Result<&Execution> {
        let original = self.execution(id)?;
        let pipeline_id = original.pipeline_id;
        let pipeline = self.pipeline(pipeline_id)?;

        let number = self.run_numbers.get(&pipeline_id).copied().unwrap_or(0) + 1;
        let execution = original.rerun(pipeline, number);
        self.run_numbers.insert(pipeline_id, number);
        tracing::info!("Execution {} rerun as {}", id, execution.id);

        Ok(self.insert_execution(execution))
    }

    fn execution_mut(&mut self, id: Uuid) -> Result<&mut Execution> {
        self.executions
            .get_mut(&id)
            .ok_or(CoreError::not_found(EXECUTION, id))
    }

    fn next_run_number(&mut self, pipeline_id: Uuid) -> u64 {
        let counter = self.run_numbers.entry(pipeline_id).or_insert(0);
        *counter += 1;
        *counter
    }

    fn insert_execution(&mut self, execution: Execution) -> &Execution {
        let id = execution.id;
        let pipeline_id = execution.pipeline_id;
        self.order.push(id);
        self.executions.insert(id, execution);
        self.refresh_statistics(pipeline_id);
        &self.executions[&id]
    }

    fn after_transition(&mut self, id: Uuid, pipeline_id: Uuid, report: &TransitionReport) {
        match report.execution {
            Some(change) => {
                tracing::info!("Execution {}: {} -> {}", id, change.from, change.to);
                if change.to.is_terminal() {
                    self.refresh_statistics(pipeline_id);
                }
            }
            None if report.is_noop() => {
                tracing::debug!("Ignoring repeated status report for execution: {}", id);
            }
            None => {}
        }
    }

    fn refresh_statistics(&mut self, pipeline_id: Uuid) {
        let Some(pipeline) = self.pipelines.get_mut(&pipeline_id) else {
            return;
        };

        let (mut total, mut finished, mut succeeded) = (0, 0, 0);
        for execution in self.executions.values() {
            if execution.pipeline_id != pipeline_id {
                continue;
            }
            total += 1;
            if execution.is_terminal() {
                finished += 1;
            }
            if execution.status == ExecutionStatus::Success {
                succeeded += 1;
            }
        }
        pipeline.record_statistics(total, finished, succeeded);
    }
}

fn matches_filter(execution: &Execution, filter: &ExecutionFilter) -> bool {
    if filter.status.is_some_and(|s| s != execution.status) {
        return false;
    }
    if filter.pipeline_id.is_some_and(|p| p != execution.pipeline_id) {
        return false;
    }
    if let Some(branch) = &filter.branch {
        if &execution.branch != branch {
            return false;
        }
    }
    if let Some(search) = &filter.search {
        let needle = search.to_lowercase();
        let haystacks = [
            &execution.pipeline_name,
            &execution.commit,
            &execution.author,
            &execution.branch,
        ];
        if !haystacks.iter().any(|h| h.to_lowercase().contains(&needle)) {
            return false;
        }
    }
    true
}
