//! Execution and job state machine
//!
//! Every status change reported by the execution engine, every cancel, and
//! every freshly fetched execution goes through this module before it touches
//! local state. Nothing here performs I/O.
//!
//! ```text
//! pending ──► running ──► success
//!    │           ├──────► failed
//!    └───────────┴──────► cancelled
//! ```

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::execution::{Execution, ExecutionStatus};
use crate::domain::log::merge_logs;
use crate::error::{CoreError, Result};

const EXECUTION: &str = "execution";
const JOB: &str = "job";

/// A status change that was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub from: ExecutionStatus,
    pub to: ExecutionStatus,
}

/// Everything a single transition changed
///
/// An empty report means the report was accepted as an idempotent no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionReport {
    /// Change of the execution's own status
    pub execution: Option<StatusChange>,
    /// Change of the job the report was about
    pub job: Option<StatusChange>,
    /// Jobs cancelled by the core as a consequence
    pub cancelled_jobs: Vec<Uuid>,
}

impl TransitionReport {
    pub fn is_noop(&self) -> bool {
        self.execution.is_none() && self.job.is_none() && self.cancelled_jobs.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Apply,
    Ignore,
}

fn check_step(
    entity: &'static str,
    id: Uuid,
    from: ExecutionStatus,
    to: ExecutionStatus,
) -> Result<Step> {
    use ExecutionStatus::*;

    match (from, to) {
        (a, b) if a == b => Ok(Step::Ignore),
        (Pending, Running | Cancelled) => Ok(Step::Apply),
        (Running, Success | Failed | Cancelled) => Ok(Step::Apply),
        // engine teardown after a cancel
        (Cancelled, Failed) => Ok(Step::Ignore),
        _ => Err(CoreError::InvalidTransition {
            entity,
            id,
            from,
            to,
        }),
    }
}

/// Like [`check_step`], but for snapshots that may skip intermediate states
///
/// A polled copy can go from `pending` straight to a terminal state when the
/// `running` phase happened between two fetches.
fn check_snapshot(
    entity: &'static str,
    id: Uuid,
    from: ExecutionStatus,
    to: ExecutionStatus,
) -> Result<Step> {
    match (from, to) {
        (ExecutionStatus::Pending, ExecutionStatus::Success | ExecutionStatus::Failed) => {
            Ok(Step::Apply)
        }
        _ => check_step(entity, id, from, to),
    }
}

/// Applies an engine-reported status to an execution
///
/// - `running → success` requires every job to be terminal and none failed.
/// - `running → failed` cancels the jobs that never started.
/// - `→ cancelled` cancels every unfinished job.
/// - Repeating the current status, or reporting `failed` on a cancelled
///   execution, is a no-op. Anything else leaving a terminal state is rejected.
pub fn apply_execution_status(
    execution: &mut Execution,
    to: ExecutionStatus,
    at: DateTime<Utc>,
) -> Result<TransitionReport> {
    let from = execution.status;
    if check_step(EXECUTION, execution.id, from, to)? == Step::Ignore {
        return Ok(TransitionReport::default());
    }

    if to == ExecutionStatus::Success {
        ensure_jobs_succeeded(execution)?;
    }

    execution.status = to;
    if to.is_terminal() {
        execution.finished_at = Some(at);
    }

    let cancelled_jobs = match to {
        ExecutionStatus::Failed => cancel_jobs(execution, at, |s| s == ExecutionStatus::Pending),
        ExecutionStatus::Cancelled => cancel_jobs(execution, at, |s| !s.is_terminal()),
        _ => Vec::new(),
    };

    Ok(TransitionReport {
        execution: Some(StatusChange { from, to }),
        job: None,
        cancelled_jobs,
    })
}

/// Applies an engine-reported status to one job of an execution
///
/// On top of the execution rules, a job may only start while its execution
/// is running, and may only finish once its dependencies are terminal. A
/// failed job fails a running execution, which cancels every pending job.
pub fn apply_job_status(
    execution: &mut Execution,
    job_id: Uuid,
    to: ExecutionStatus,
    at: DateTime<Utc>,
) -> Result<TransitionReport> {
    let index = execution
        .jobs
        .iter()
        .position(|j| j.id == job_id)
        .ok_or(CoreError::not_found(JOB, job_id))?;

    let from = execution.jobs[index].status;
    if check_step(JOB, job_id, from, to)? == Step::Ignore {
        return Ok(TransitionReport::default());
    }

    if to == ExecutionStatus::Running && execution.status != ExecutionStatus::Running {
        return Err(CoreError::ExecutionNotRunning {
            execution: execution.id,
            status: execution.status,
        });
    }

    if matches!(to, ExecutionStatus::Success | ExecutionStatus::Failed) {
        let waiting_on = unmet_dependencies(execution, index);
        if !waiting_on.is_empty() {
            return Err(CoreError::DependencyNotSatisfied {
                job: execution.jobs[index].name.clone(),
                waiting_on,
            });
        }
    }

    let job = &mut execution.jobs[index];
    job.status = to;
    if to == ExecutionStatus::Running && job.started_at.is_none() {
        job.started_at = Some(at);
    }
    if to.is_terminal() {
        job.finished_at = Some(at);
    }

    let mut report = TransitionReport {
        job: Some(StatusChange { from, to }),
        ..TransitionReport::default()
    };

    if to == ExecutionStatus::Failed && execution.status == ExecutionStatus::Running {
        let cascade = apply_execution_status(execution, ExecutionStatus::Failed, at)?;
        report.execution = cascade.execution;
        report.cancelled_jobs = cascade.cancelled_jobs;
    }

    Ok(report)
}

/// Cancels a pending or running execution
///
/// Cancelling something already finished (including a second cancel) is a
/// conflict, so callers can tell "already done" from "cancellation accepted".
pub fn cancel(execution: &mut Execution, at: DateTime<Utc>) -> Result<TransitionReport> {
    ensure_cancellable(execution)?;
    apply_execution_status(execution, ExecutionStatus::Cancelled, at)
}

/// Fails with `Conflict` when the execution is already terminal
pub fn ensure_cancellable(execution: &Execution) -> Result<()> {
    if execution.status.is_terminal() {
        return Err(CoreError::Conflict(format!(
            "execution {} is already {}",
            execution.id, execution.status
        )));
    }
    Ok(())
}

/// Replaces `local` with a freshly fetched copy, if that copy is a legal successor
///
/// Statuses may move forward by more than one step (`pending` to `failed`
/// when `running` was never observed) but never backwards. Rejected copies
/// leave `local` untouched. A teardown `failed` on a cancelled execution
/// keeps the local `cancelled`.
///
/// Jobs are merged one by one into the local list. Local jobs missing from
/// the snapshot are kept, job logs are merged rather than replaced, and the
/// cancellation rules of [`apply_execution_status`] are applied to whatever
/// the snapshot left unfinished under a `failed` or `cancelled` execution.
pub fn reconcile(
    local: &mut Execution,
    mut remote: Execution,
    at: DateTime<Utc>,
) -> Result<TransitionReport> {
    if local.id != remote.id {
        return Err(CoreError::Validation(format!(
            "cannot reconcile execution {} with {}",
            local.id, remote.id
        )));
    }

    let from = local.status;
    if check_snapshot(EXECUTION, local.id, from, remote.status)? == Step::Ignore {
        remote.status = from;
        remote.finished_at = local.finished_at;
    }
    let to = remote.status;

    let mut jobs = local.jobs.clone();
    let mut report = TransitionReport::default();
    for mut job in std::mem::take(&mut remote.jobs) {
        let Some(index) = jobs.iter().position(|j| j.id == job.id) else {
            jobs.push(job);
            continue;
        };
        let previous = &mut jobs[index];

        // cancelled locally by an earlier cascade that the backend never applied
        let stale = to.is_terminal()
            && previous.status == ExecutionStatus::Cancelled
            && !job.status.is_terminal();
        if stale || check_snapshot(JOB, job.id, previous.status, job.status)? == Step::Ignore {
            job.status = previous.status;
            job.finished_at = previous.finished_at;
        }
        if job.status == ExecutionStatus::Cancelled && previous.status != job.status {
            report.cancelled_jobs.push(job.id);
        }

        let mut logs = std::mem::take(&mut previous.logs);
        merge_logs(&mut logs, std::mem::take(&mut job.logs));
        job.logs = logs;
        *previous = job;
    }
    remote.jobs = jobs;

    if to == ExecutionStatus::Success && from != ExecutionStatus::Success {
        ensure_jobs_succeeded(&remote)?;
    }

    let cascade = match to {
        ExecutionStatus::Failed => cancel_jobs(&mut remote, at, |s| s == ExecutionStatus::Pending),
        ExecutionStatus::Cancelled => cancel_jobs(&mut remote, at, |s| !s.is_terminal()),
        _ => Vec::new(),
    };
    report.cancelled_jobs.extend(cascade);

    if to.is_terminal() && remote.finished_at.is_none() {
        remote.finished_at = Some(at);
    }
    if to != from {
        report.execution = Some(StatusChange { from, to });
    }

    *local = remote;
    Ok(report)
}

fn ensure_jobs_succeeded(execution: &Execution) -> Result<()> {
    let pending: Vec<String> = execution
        .jobs
        .iter()
        .filter(|j| !j.status.is_terminal())
        .map(|j| j.name.clone())
        .collect();
    if !pending.is_empty() {
        return Err(CoreError::JobsIncomplete {
            execution: execution.id,
            pending,
        });
    }

    let failed: Vec<String> = execution
        .jobs
        .iter()
        .filter(|j| j.status == ExecutionStatus::Failed)
        .map(|j| j.name.clone())
        .collect();
    if !failed.is_empty() {
        return Err(CoreError::FailedJobs {
            execution: execution.id,
            failed,
        });
    }

    Ok(())
}

fn unmet_dependencies(execution: &Execution, index: usize) -> Vec<String> {
    let job = &execution.jobs[index];
    let unfinished = |j: &&crate::domain::job::Job| !j.status.is_terminal();

    match &job.needs {
        Some(needs) => execution
            .jobs
            .iter()
            .filter(|j| needs.contains(&j.name))
            .filter(unfinished)
            .map(|j| j.name.clone())
            .collect(),
        None => execution.jobs[..index]
            .iter()
            .filter(unfinished)
            .map(|j| j.name.clone())
            .collect(),
    }
}

fn cancel_jobs(
    execution: &mut Execution,
    at: DateTime<Utc>,
    should_cancel: impl Fn(ExecutionStatus) -> bool,
) -> Vec<Uuid> {
    execution
        .jobs
        .iter_mut()
        .filter(|j| should_cancel(j.status))
        .map(|job| {
            job.status = ExecutionStatus::Cancelled;
            job.finished_at = Some(at);
            job.id
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::execution::TriggerContext;
    use crate::domain::log::{LogEntry, LogLevel};
    use crate::domain::pipeline::{Pipeline, Stage, Trigger};
    use ExecutionStatus::*;

    fn execution_with(stages: Vec<Stage>) -> Execution {
        let pipeline = Pipeline::new("P1", "main", Trigger::Push, stages);
        Execution::from_pipeline(&pipeline, TriggerContext::new(Trigger::Push, "deadbeef", "ana"), 1)
    }

    fn sequential() -> Execution {
        execution_with(vec![
            Stage::new("checkout"),
            Stage::new("test"),
            Stage::new("build"),
        ])
    }

    fn job_id(execution: &Execution, name: &str) -> Uuid {
        execution.job_by_name(name).unwrap().id
    }

    fn report_job(execution: &mut Execution, name: &str, to: ExecutionStatus) -> Result<TransitionReport> {
        let id = job_id(execution, name);
        apply_job_status(execution, id, to, Utc::now())
    }

    fn can_transition(from: ExecutionStatus, to: ExecutionStatus) -> bool {
        check_step(EXECUTION, Uuid::nil(), from, to).is_ok()
    }

    #[test]
    fn test_transition_table() {
        assert!(can_transition(Pending, Running));
        assert!(can_transition(Pending, Cancelled));
        assert!(can_transition(Running, Success));
        assert!(can_transition(Running, Failed));
        assert!(can_transition(Running, Cancelled));
        assert!(can_transition(Success, Success));
        assert!(can_transition(Cancelled, Failed));

        assert!(!can_transition(Pending, Success));
        assert!(!can_transition(Pending, Failed));
        assert!(!can_transition(Running, Pending));
        assert!(!can_transition(Success, Failed));
        assert!(!can_transition(Failed, Success));
        assert!(!can_transition(Cancelled, Running));
        assert!(!can_transition(Cancelled, Success));
    }

    #[test]
    fn test_pending_to_running_is_unconditional() {
        let mut e = sequential();
        let report = apply_execution_status(&mut e, Running, Utc::now()).unwrap();
        assert_eq!(report.execution, Some(StatusChange { from: Pending, to: Running }));
        assert!(e.finished_at.is_none());
    }

    #[test]
    fn test_success_rejected_while_job_pending() {
        let mut e = sequential();
        apply_execution_status(&mut e, Running, Utc::now()).unwrap();
        report_job(&mut e, "checkout", Running).unwrap();
        report_job(&mut e, "checkout", Success).unwrap();
        report_job(&mut e, "test", Running).unwrap();
        report_job(&mut e, "test", Success).unwrap();

        let err = apply_execution_status(&mut e, Success, Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::JobsIncomplete { ref pending, .. } if pending == &["build"]));
        assert_eq!(e.status, Running);
        assert!(e.finished_at.is_none());
    }

    #[test]
    fn test_success_after_all_jobs_succeed() {
        let mut e = sequential();
        apply_execution_status(&mut e, Running, Utc::now()).unwrap();
        for name in ["checkout", "test", "build"] {
            report_job(&mut e, name, Running).unwrap();
            report_job(&mut e, name, Success).unwrap();
        }

        apply_execution_status(&mut e, Success, Utc::now()).unwrap();
        assert_eq!(e.status, Success);
        assert!(e.finished_at.is_some());
    }

    #[test]
    fn test_failed_job_fails_execution_and_cancels_pending() {
        let mut e = sequential();
        apply_execution_status(&mut e, Running, Utc::now()).unwrap();
        report_job(&mut e, "checkout", Running).unwrap();
        report_job(&mut e, "checkout", Success).unwrap();
        report_job(&mut e, "test", Running).unwrap();
        let report = report_job(&mut e, "test", Failed).unwrap();

        let build = job_id(&e, "build");
        assert_eq!(report.job, Some(StatusChange { from: Running, to: Failed }));
        assert_eq!(report.execution, Some(StatusChange { from: Running, to: Failed }));
        assert_eq!(report.cancelled_jobs, vec![build]);
        assert_eq!(e.status, Failed);
        assert!(e.finished_at.is_some());
        let build_job = e.job(build).unwrap();
        assert_eq!(build_job.status, Cancelled);
        assert!(build_job.finished_at.is_some());
    }

    #[test]
    fn test_terminal_to_other_terminal_is_rejected() {
        let mut e = execution_with(vec![Stage::new("only")]);
        apply_execution_status(&mut e, Running, Utc::now()).unwrap();
        report_job(&mut e, "only", Running).unwrap();
        report_job(&mut e, "only", Success).unwrap();
        apply_execution_status(&mut e, Success, Utc::now()).unwrap();
        let finished = e.finished_at;

        let err = apply_execution_status(&mut e, Failed, Utc::now()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { from: Success, to: Failed, .. }));
        assert_eq!(e.status, Success);
        assert_eq!(e.finished_at, finished);
    }

    #[test]
    fn test_repeated_report_is_noop() {
        let mut e = sequential();
        apply_execution_status(&mut e, Running, Utc::now()).unwrap();
        let report = apply_execution_status(&mut e, Running, Utc::now()).unwrap();
        assert!(report.is_noop());
    }

    #[test]
    fn test_cancel_twice_conflicts() {
        let mut e = sequential();
        apply_execution_status(&mut e, Running, Utc::now()).unwrap();

        let report = cancel(&mut e, Utc::now()).unwrap();
        assert_eq!(report.cancelled_jobs.len(), 3);
        assert_eq!(e.status, Cancelled);
        assert!(e.finished_at.is_some());

        let err = cancel(&mut e, Utc::now()).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_cancel_pending_execution() {
        let mut e = sequential();
        cancel(&mut e, Utc::now()).unwrap();
        assert_eq!(e.status, Cancelled);
        assert!(e.jobs.iter().all(|j| j.status == Cancelled));
    }

    #[test]
    fn test_reports_after_cancel() {
        let mut e = sequential();
        apply_execution_status(&mut e, Running, Utc::now()).unwrap();
        report_job(&mut e, "checkout", Running).unwrap();
        cancel(&mut e, Utc::now()).unwrap();

        // teardown outcomes are accepted silently
        assert!(apply_execution_status(&mut e, Failed, Utc::now()).unwrap().is_noop());
        assert!(apply_execution_status(&mut e, Cancelled, Utc::now()).unwrap().is_noop());
        assert!(report_job(&mut e, "checkout", Failed).unwrap().is_noop());

        assert!(matches!(
            apply_execution_status(&mut e, Success, Utc::now()),
            Err(CoreError::InvalidTransition { from: Cancelled, to: Success, .. })
        ));
        assert!(apply_execution_status(&mut e, Running, Utc::now()).is_err());
        assert!(report_job(&mut e, "checkout", Running).is_err());
        assert_eq!(e.status, Cancelled);
    }

    #[test]
    fn test_job_cannot_start_before_execution() {
        let mut e = sequential();
        let err = report_job(&mut e, "checkout", Running).unwrap_err();
        assert!(matches!(err, CoreError::ExecutionNotRunning { status: Pending, .. }));
    }

    #[test]
    fn test_sequential_dependency_enforced() {
        let mut e = sequential();
        apply_execution_status(&mut e, Running, Utc::now()).unwrap();
        report_job(&mut e, "test", Running).unwrap();

        let err = report_job(&mut e, "test", Success).unwrap_err();
        assert!(matches!(err, CoreError::DependencyNotSatisfied { ref waiting_on, .. } if waiting_on == &["checkout"]));
    }

    #[test]
    fn test_explicit_needs_allow_parallel_stages() {
        let mut e = execution_with(vec![
            Stage::new("checkout"),
            Stage::new("lint").with_needs(["checkout"]),
            Stage::new("test").with_needs(["checkout"]),
        ]);
        apply_execution_status(&mut e, Running, Utc::now()).unwrap();
        report_job(&mut e, "checkout", Running).unwrap();
        report_job(&mut e, "checkout", Success).unwrap();
        report_job(&mut e, "lint", Running).unwrap();
        report_job(&mut e, "test", Running).unwrap();

        // test does not wait for lint
        report_job(&mut e, "test", Success).unwrap();
        report_job(&mut e, "lint", Success).unwrap();
        apply_execution_status(&mut e, Success, Utc::now()).unwrap();
    }

    #[test]
    fn test_unknown_job_is_not_found() {
        let mut e = sequential();
        let err = apply_job_status(&mut e, Uuid::new_v4(), Running, Utc::now()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_reconcile_accepts_forward_progress_and_merges_logs() {
        let mut local = sequential();
        let mut remote = local.clone();
        let checkout = job_id(&local, "checkout");
        let t = Utc::now();

        local.job_mut(checkout).unwrap().logs = vec![LogEntry::new(t, LogLevel::Info, "cloning")];
        remote.status = Running;
        let job = remote.job_mut(checkout).unwrap();
        job.status = Running;
        job.logs = vec![
            LogEntry::new(t, LogLevel::Info, "cloning"),
            LogEntry::new(t + chrono::Duration::seconds(1), LogLevel::Info, "done"),
        ];

        let report = reconcile(&mut local, remote, Utc::now()).unwrap();
        assert_eq!(report.execution, Some(StatusChange { from: Pending, to: Running }));
        assert_eq!(local.status, Running);
        assert_eq!(local.job(checkout).unwrap().logs.len(), 2);
    }

    #[test]
    fn test_reconcile_accepts_skipped_running_phase() {
        let mut local = sequential();
        let mut remote = local.clone();
        apply_execution_status(&mut remote, Running, Utc::now()).unwrap();
        report_job(&mut remote, "checkout", Running).unwrap();
        report_job(&mut remote, "checkout", Failed).unwrap();

        let report = reconcile(&mut local, remote, Utc::now()).unwrap();
        assert_eq!(report.execution, Some(StatusChange { from: Pending, to: Failed }));
        assert_eq!(report.cancelled_jobs.len(), 2);
        assert_eq!(local.job_by_name("checkout").unwrap().status, Failed);
    }

    #[test]
    fn test_reconcile_cancels_jobs_left_pending_by_failed_snapshot() {
        let mut local = sequential();
        apply_execution_status(&mut local, Running, Utc::now()).unwrap();

        // a backend that fails the execution without touching later jobs
        let mut remote = local.clone();
        remote.status = Failed;
        remote.jobs[0].status = Success;
        remote.jobs[1].status = Failed;
        let build = job_id(&local, "build");

        let report = reconcile(&mut local, remote, Utc::now()).unwrap();
        assert_eq!(report.execution, Some(StatusChange { from: Running, to: Failed }));
        assert_eq!(report.cancelled_jobs, vec![build]);
        let build_job = local.job(build).unwrap();
        assert_eq!(build_job.status, Cancelled);
        assert!(build_job.finished_at.is_some());
        assert!(local.finished_at.is_some());
    }

    #[test]
    fn test_reconcile_cancels_unfinished_jobs_of_cancelled_snapshot() {
        let mut local = sequential();
        apply_execution_status(&mut local, Running, Utc::now()).unwrap();
        report_job(&mut local, "checkout", Running).unwrap();

        let mut remote = local.clone();
        remote.status = Cancelled;

        let report = reconcile(&mut local, remote, Utc::now()).unwrap();
        assert_eq!(report.cancelled_jobs.len(), 3);
        assert!(local.jobs.iter().all(|j| j.status == Cancelled && j.finished_at.is_some()));
    }

    #[test]
    fn test_reconcile_is_stable_when_backend_keeps_stale_jobs() {
        let mut local = sequential();
        apply_execution_status(&mut local, Running, Utc::now()).unwrap();
        let mut remote = local.clone();
        remote.status = Failed;
        remote.jobs[0].status = Failed;

        reconcile(&mut local, remote.clone(), Utc::now()).unwrap();
        let settled = local.clone();

        let report = reconcile(&mut local, remote, Utc::now()).unwrap();
        assert!(report.is_noop());
        assert_eq!(local, settled);
    }

    #[test]
    fn test_reconcile_keeps_jobs_missing_from_snapshot() {
        let mut local = sequential();
        let checkout = job_id(&local, "checkout");
        local.job_mut(checkout).unwrap().logs = vec![LogEntry::new(Utc::now(), LogLevel::Info, "cloning")];

        let mut remote = local.clone();
        remote.status = Running;
        remote.jobs.clear();

        let report = reconcile(&mut local, remote, Utc::now()).unwrap();
        assert_eq!(report.execution, Some(StatusChange { from: Pending, to: Running }));
        assert_eq!(local.status, Running);
        assert_eq!(local.jobs.len(), 3);
        assert_eq!(local.job(checkout).unwrap().logs.len(), 1);
    }

    #[test]
    fn test_reconcile_keeps_local_job_order_and_appends_new_jobs() {
        let mut local = sequential();
        let mut remote = local.clone();
        remote.jobs.reverse();
        let mut extra = remote.jobs[0].clone();
        extra.id = Uuid::new_v4();
        extra.name = "deploy".to_string();
        remote.jobs.push(extra);

        reconcile(&mut local, remote, Utc::now()).unwrap();
        let names: Vec<_> = local.jobs.iter().map(|j| j.name.as_str()).collect();
        assert_eq!(names, ["checkout", "test", "build", "deploy"]);
    }

    #[test]
    fn test_reconcile_rejects_rewind() {
        let mut local = sequential();
        apply_execution_status(&mut local, Running, Utc::now()).unwrap();
        let mut remote = local.clone();
        remote.status = Pending;

        assert!(reconcile(&mut local, remote, Utc::now()).is_err());
        assert_eq!(local.status, Running);
    }

    #[test]
    fn test_reconcile_keeps_cancelled_over_teardown_failure() {
        let mut local = sequential();
        cancel(&mut local, Utc::now()).unwrap();
        let mut remote = local.clone();
        remote.status = Failed;

        let report = reconcile(&mut local, remote, Utc::now()).unwrap();
        assert!(report.execution.is_none());
        assert_eq!(local.status, Cancelled);
    }

    #[test]
    fn test_reconcile_rejects_success_with_pending_jobs() {
        let mut local = sequential();
        apply_execution_status(&mut local, Running, Utc::now()).unwrap();
        let mut remote = local.clone();
        remote.status = Success;

        assert!(matches!(
            reconcile(&mut local, remote, Utc::now()),
            Err(CoreError::JobsIncomplete { .. })
        ));
    }
}
