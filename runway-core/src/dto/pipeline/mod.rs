//! Pipeline DTOs

use serde::{Deserialize, Serialize};

use crate::domain::pipeline::{PipelineStatus, Stage, Trigger};
use crate::dto::query::{QueryParams, ToQuery};

/// Request to create a new pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePipeline {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub branch: String,
    pub trigger: Trigger,
    pub stages: Vec<Stage>,
}

/// Partial pipeline update; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePipeline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PipelineStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<Trigger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stages: Option<Vec<Stage>>,
}

/// Request body for a manual run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunPipeline {
    /// Branch to build; the pipeline's own branch when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

/// New configuration version for a pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePipelineConfig {
    pub config_yaml: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,
}

/// Filter for listing pipelines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineFilter {
    pub status: Option<PipelineStatus>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ToQuery for PipelineFilter {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("status", self.status)
            .with_opt("search", self.search.as_deref())
            .with_opt("page", self.page)
            .with_opt("pageSize", self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_params() {
        assert!(PipelineFilter::default().to_query().is_empty());
    }

    #[test]
    fn test_filter_params() {
        let filter = PipelineFilter {
            status: Some(PipelineStatus::Archived),
            search: Some(String::new()),
            page: None,
            page_size: Some(0),
        };
        let query = filter.to_query();

        assert_eq!(query.get("status"), Some("archived"));
        assert_eq!(query.get("search"), Some(""));
        assert_eq!(query.get("pageSize"), Some("0"));
        assert!(!query.contains_key("page"));
    }

    #[test]
    fn test_update_skips_absent_fields() {
        let update = UpdatePipeline {
            status: Some(PipelineStatus::Inactive),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "inactive" }));
    }
}
