//! Execution DTOs

use uuid::Uuid;

use crate::domain::execution::ExecutionStatus;
use crate::dto::query::{QueryParams, ToQuery};

/// Filter for listing executions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionFilter {
    pub status: Option<ExecutionStatus>,
    pub branch: Option<String>,
    pub search: Option<String>,
    pub pipeline_id: Option<Uuid>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ExecutionFilter {
    pub fn for_pipeline(pipeline_id: Uuid) -> Self {
        Self {
            pipeline_id: Some(pipeline_id),
            ..Self::default()
        }
    }
}

impl ToQuery for ExecutionFilter {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("status", self.status)
            .with_opt("branch", self.branch.as_deref())
            .with_opt("search", self.search.as_deref())
            .with_opt("pipelineId", self.pipeline_id)
            .with_opt("page", self.page)
            .with_opt("pageSize", self.page_size)
    }
}
