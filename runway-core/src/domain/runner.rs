//! Runner domain model
//!
//! Represents a worker that claims and executes jobs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::error::{CoreError, Result};

/// A runner that can execute jobs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Runner {
    /// Unique identifier for the runner
    pub id: Uuid,

    /// Human-readable name
    pub name: String,

    /// Current status of the runner
    pub status: RunnerStatus,

    /// Operating system (e.g. "linux")
    pub platform: String,

    /// CPU architecture (e.g. "x86_64")
    pub arch: String,

    /// Runner software version
    pub version: String,

    /// Labels used to match jobs to runners
    #[serde(default)]
    pub labels: BTreeSet<String>,

    /// Last time this runner was heard from
    pub last_seen_at: DateTime<Utc>,

    /// Job being executed, only while busy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_job_id: Option<Uuid>,
}

impl Runner {
    /// Checks that `current_job_id` is set exactly when the runner is busy
    pub fn validate(&self) -> Result<()> {
        match (self.status, self.current_job_id) {
            (RunnerStatus::Busy, None) => Err(CoreError::Validation(format!(
                "runner {} is busy without a current job",
                self.id
            ))),
            (RunnerStatus::Online | RunnerStatus::Offline, Some(job)) => {
                Err(CoreError::Validation(format!(
                    "runner {} is {} but reports job {}",
                    self.id, self.status, job
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Status of a runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunnerStatus {
    /// Runner is online and ready to accept jobs
    Online,

    /// Runner hasn't been seen recently
    Offline,

    /// Runner is currently executing a job
    Busy,
}

impl RunnerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunnerStatus::Online => "online",
            RunnerStatus::Offline => "offline",
            RunnerStatus::Busy => "busy",
        }
    }
}

impl std::fmt::Display for RunnerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RunnerStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "online" => Ok(RunnerStatus::Online),
            "offline" => Ok(RunnerStatus::Offline),
            "busy" => Ok(RunnerStatus::Busy),
            other => Err(format!("unknown runner status '{}'", other)),
        }
    }
}
