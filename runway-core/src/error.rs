//! Error types for Runway core operations

use thiserror::Error;
use uuid::Uuid;

use crate::domain::execution::ExecutionStatus;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors raised by the state machine and the execution tracker
///
/// These are logic errors: they are raised even when every network call
/// involved succeeded, so that local state is never corrupted.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Referenced entity does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// The operation is valid in general but not for the current state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Proposed status change is not allowed
    #[error("Invalid {entity} status transition for {id}: {from} -> {to}")]
    InvalidTransition {
        entity: &'static str,
        id: Uuid,
        from: ExecutionStatus,
        to: ExecutionStatus,
    },

    /// Execution cannot succeed while jobs are still in flight
    #[error("Execution {execution} still has unfinished jobs: {}", .pending.join(", "))]
    JobsIncomplete { execution: Uuid, pending: Vec<String> },

    /// Execution cannot succeed because some jobs failed
    #[error("Execution {execution} has failed jobs: {}", .failed.join(", "))]
    FailedJobs { execution: Uuid, failed: Vec<String> },

    /// Job finished before the jobs it depends on
    #[error("Job '{job}' is waiting on unfinished jobs: {}", .waiting_on.join(", "))]
    DependencyNotSatisfied { job: String, waiting_on: Vec<String> },

    /// Job tried to start while its execution is not running
    #[error("Execution {execution} is {status}, jobs cannot start")]
    ExecutionNotRunning {
        execution: Uuid,
        status: ExecutionStatus,
    },

    /// Entity failed structural validation
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    /// Create a not-found error for the given entity kind
    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        Self::NotFound { entity, id }
    }

    /// Machine-readable code, in the same style as backend error codes
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::JobsIncomplete { .. } => "JOBS_INCOMPLETE",
            Self::FailedJobs { .. } => "FAILED_JOBS",
            Self::DependencyNotSatisfied { .. } => "DEPENDENCY_NOT_SATISFIED",
            Self::ExecutionNotRunning { .. } => "EXECUTION_NOT_RUNNING",
            Self::Validation(_) => "VALIDATION_ERROR",
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is a conflict (e.g. cancelling a finished execution)
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
