//! Pipeline domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use uuid::Uuid;

use crate::error::{CoreError, Result};

/// Pipeline definition
///
/// `total_runs` and `success_rate` are statistics derived from executions and
/// have no public setter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: PipelineStatus,
    pub branch: String,
    pub trigger: Trigger,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    total_runs: u64,
    #[serde(default)]
    success_rate: f64,
    #[serde(default)]
    pub stages: Vec<Stage>,
}

impl Pipeline {
    /// Creates a new active pipeline with no run history
    pub fn new(
        name: impl Into<String>,
        branch: impl Into<String>,
        trigger: Trigger,
        stages: Vec<Stage>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            status: PipelineStatus::Active,
            branch: branch.into(),
            trigger,
            created_at: now,
            updated_at: now,
            total_runs: 0,
            success_rate: 0.0,
            stages,
        }
    }

    /// Number of executions ever started for this pipeline
    pub fn total_runs(&self) -> u64 {
        self.total_runs
    }

    /// Percentage (0-100) of finished executions that succeeded
    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }

    /// Recomputes the derived run statistics
    pub(crate) fn record_statistics(&mut self, total_runs: u64, finished: u64, succeeded: u64) {
        self.total_runs = total_runs;
        self.success_rate = if finished == 0 {
            0.0
        } else {
            (succeeded as f64 / finished as f64) * 100.0
        };
    }

    /// Validates the stage list
    ///
    /// Stage names must be unique, timeouts must be positive, and explicit
    /// `needs` may only reference stages declared earlier.
    pub fn validate_stages(&self) -> Result<()> {
        let mut seen: HashSet<&str> = HashSet::new();

        for stage in &self.stages {
            if stage.name.trim().is_empty() {
                return Err(CoreError::Validation(format!(
                    "pipeline '{}' has a stage with an empty name",
                    self.name
                )));
            }

            if stage.timeout == Some(0) {
                return Err(CoreError::Validation(format!(
                    "stage '{}' has a zero timeout",
                    stage.name
                )));
            }

            if let Some(needs) = &stage.needs {
                if let Some(missing) = needs.iter().find(|n| !seen.contains(n.as_str())) {
                    return Err(CoreError::Validation(format!(
                        "stage '{}' needs '{}', which is not an earlier stage",
                        stage.name, missing
                    )));
                }
            }

            if !seen.insert(stage.name.as_str()) {
                return Err(CoreError::Validation(format!(
                    "duplicate stage name '{}' in pipeline '{}'",
                    stage.name, self.name
                )));
            }
        }

        Ok(())
    }
}

/// One named step of a pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub name: String,
    #[serde(default)]
    pub commands: Vec<String>,
    /// Timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
    #[serde(default)]
    pub environment: BTreeMap<String, String>,
    /// Explicit upstream stages. When absent the stage depends on every
    /// stage before it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub needs: Option<Vec<String>>,
}

impl Stage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
            timeout: None,
            environment: BTreeMap::new(),
            needs: None,
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.commands.push(command.into());
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Some(seconds);
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.environment.insert(key.into(), value.into());
        self
    }

    pub fn with_needs<I, S>(mut self, needs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.needs = Some(needs.into_iter().map(Into::into).collect());
        self
    }
}

/// Pipeline availability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Active,
    Inactive,
    Archived,
}

impl PipelineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStatus::Active => "active",
            PipelineStatus::Inactive => "inactive",
            PipelineStatus::Archived => "archived",
        }
    }
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PipelineStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "active" => Ok(PipelineStatus::Active),
            "inactive" => Ok(PipelineStatus::Inactive),
            "archived" => Ok(PipelineStatus::Archived),
            other => Err(format!("unknown pipeline status '{}'", other)),
        }
    }
}

/// What starts an execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    Push,
    PullRequest,
    Manual,
    Schedule,
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trigger::Push => write!(f, "push"),
            Trigger::PullRequest => write!(f, "pull_request"),
            Trigger::Manual => write!(f, "manual"),
            Trigger::Schedule => write!(f, "schedule"),
        }
    }
}

/// One stored version of a pipeline's YAML configuration
///
/// Versions are numbered from 1 and never rewritten; an update adds a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineConfig {
    pub id: Uuid,
    pub version: u32,
    pub config_yaml: String,
    #[serde(default)]
    pub commit_sha: String,
    #[serde(default)]
    pub commit_message: String,
    pub is_valid: bool,
    #[serde(default)]
    pub validation_errors: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline(stages: Vec<Stage>) -> Pipeline {
        Pipeline::new("web", "main", Trigger::Push, stages)
    }

    #[test]
    fn test_new_pipeline_has_no_history() {
        let p = pipeline(vec![Stage::new("build")]);
        assert_eq!(p.total_runs(), 0);
        assert_eq!(p.success_rate(), 0.0);
        assert_eq!(p.status, PipelineStatus::Active);
    }

    #[test]
    fn test_validate_stages_ok() {
        let p = pipeline(vec![
            Stage::new("checkout"),
            Stage::new("lint").with_needs(["checkout"]),
            Stage::new("test").with_needs(["checkout"]).with_timeout(600),
        ]);
        assert!(p.validate_stages().is_ok());
    }

    #[test]
    fn test_validate_stages_rejects_duplicates() {
        let p = pipeline(vec![Stage::new("test"), Stage::new("test")]);
        assert!(matches!(p.validate_stages(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_validate_stages_rejects_zero_timeout() {
        let p = pipeline(vec![Stage::new("test").with_timeout(0)]);
        assert!(p.validate_stages().is_err());
    }

    #[test]
    fn test_validate_stages_rejects_forward_needs() {
        let p = pipeline(vec![
            Stage::new("test").with_needs(["build"]),
            Stage::new("build"),
        ]);
        assert!(p.validate_stages().is_err());
    }

    #[test]
    fn test_record_statistics() {
        let mut p = pipeline(vec![Stage::new("build")]);
        p.record_statistics(5, 4, 3);
        assert_eq!(p.total_runs(), 5);
        assert_eq!(p.success_rate(), 75.0);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let p = pipeline(vec![Stage::new("build").with_timeout(30)]);
        let json = serde_json::to_value(&p).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("totalRuns").is_some());
        assert!(json.get("successRate").is_some());
        assert_eq!(json["trigger"], "push");
        assert_eq!(json["stages"][0]["timeout"], 30);
        assert!(json["stages"][0].get("needs").is_none());
    }

    #[test]
    fn test_trigger_wire_spelling() {
        let t: Trigger = serde_json::from_str("\"pull_request\"").unwrap();
        assert_eq!(t, Trigger::PullRequest);
        assert_eq!(t.to_string(), "pull_request");
    }

    #[test]
    fn test_config_version_defaults() {
        let json = serde_json::json!({
            "id": Uuid::nil(),
            "version": 3,
            "configYaml": "stages: []",
            "isValid": false,
            "validationErrors": ["no stages"],
            "createdAt": "2024-01-01T00:00:00Z"
        });
        let config: PipelineConfig = serde_json::from_value(json).unwrap();
        assert_eq!(config.version, 3);
        assert!(config.commit_sha.is_empty());
        assert_eq!(config.validation_errors, ["no stages"]);
    }
}
