//! Job domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::log::{LogEntry, merge_logs};
use crate::domain::pipeline::Stage;

pub use crate::domain::execution::ExecutionStatus as JobStatus;

/// One stage's execution within an execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Uuid,
    pub execution_id: Uuid,
    pub name: String,
    pub status: JobStatus,
    /// Copied from the stage; `None` means "every job before this one"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
}

impl Job {
    /// Creates a pending job for a stage
    pub fn pending(execution_id: Uuid, stage: &Stage) -> Self {
        Self {
            id: Uuid::new_v4(),
            execution_id,
            name: stage.name.clone(),
            status: JobStatus::Pending,
            needs: stage.needs.clone(),
            started_at: None,
            finished_at: None,
            logs: Vec::new(),
        }
    }

    pub fn duration(&self) -> Option<chrono::Duration> {
        match (self.started_at, self.finished_at) {
            (Some(started), Some(finished)) => Some(finished.signed_duration_since(started)),
            _ => None,
        }
    }

    /// Appends log entries, keeping the log ordered by time
    ///
    /// Returns the number of entries that were actually new.
    pub fn append_logs(&mut self, entries: impl IntoIterator<Item = LogEntry>) -> usize {
        merge_logs(&mut self.logs, entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::log::LogLevel;
    use chrono::TimeZone;

    #[test]
    fn test_pending_job_from_stage() {
        let stage = Stage::new("test").with_needs(["checkout"]);
        let job = Job::pending(Uuid::nil(), &stage);
        assert_eq!(job.name, "test");
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.needs, Some(vec!["checkout".to_string()]));
        assert!(job.duration().is_none());
    }

    #[test]
    fn test_duration() {
        let mut job = Job::pending(Uuid::nil(), &Stage::new("build"));
        job.started_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        job.finished_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 12, 1, 30).unwrap());
        assert_eq!(job.duration().map(|d| d.num_seconds()), Some(90));
    }

    #[test]
    fn test_append_logs_orders_by_time() {
        let t = |s| Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, s).unwrap();
        let mut job = Job::pending(Uuid::nil(), &Stage::new("build"));
        job.append_logs([LogEntry::new(t(5), LogLevel::Info, "late")]);
        let added = job.append_logs([LogEntry::new(t(1), LogLevel::Debug, "early")]);

        assert_eq!(added, 1);
        assert_eq!(job.logs[0].message, "early");
        assert_eq!(job.logs[1].message, "late");
    }
}
