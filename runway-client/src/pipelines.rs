//! Pipeline-related API endpoints

use crate::ApiClient;
use crate::error::Result;
use reqwest::Method;
use runway_core::domain::execution::Execution;
use runway_core::domain::pipeline::{Pipeline, PipelineConfig};
use runway_core::dto::{Paginated, QueryParams};
use runway_core::dto::pipeline::{
    CreatePipeline, PipelineFilter, RunPipeline, UpdatePipeline, UpdatePipelineConfig,
};
use uuid::Uuid;

impl ApiClient {
    // =============================================================================
    // Pipeline Management
    // =============================================================================

    /// List pipelines matching a filter
    pub async fn list_pipelines(&self, filter: &PipelineFilter) -> Result<Paginated<Pipeline>> {
        self.get_list("/pipelines", filter).await
    }

    /// Get a pipeline by ID
    pub async fn get_pipeline(&self, pipeline_id: Uuid) -> Result<Pipeline> {
        self.get_json(&format!("/pipelines/{}", pipeline_id)).await
    }

    /// Create a new pipeline
    ///
    /// # Example
    /// ```no_run
    /// # use runway_client::ApiClient;
    /// # use runway_core::domain::pipeline::{Stage, Trigger};
    /// # use runway_core::dto::pipeline::CreatePipeline;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = ApiClient::new("http://localhost:8000/api");
    /// let pipeline = client
    ///     .create_pipeline(&CreatePipeline {
    ///         name: "api".to_string(),
    ///         description: None,
    ///         branch: "main".to_string(),
    ///         trigger: Trigger::Push,
    ///         stages: vec![Stage::new("test").with_command("cargo test")],
    ///     })
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_pipeline(&self, req: &CreatePipeline) -> Result<Pipeline> {
        self.send_json(Method::POST, "/pipelines", req).await
    }

    /// Partially update a pipeline
    pub async fn update_pipeline(&self, pipeline_id: Uuid, req: &UpdatePipeline) -> Result<Pipeline> {
        self.send_json(Method::PATCH, &format!("/pipelines/{}", pipeline_id), req)
            .await
    }

    /// Delete a pipeline
    pub async fn delete_pipeline(&self, pipeline_id: Uuid) -> Result<()> {
        self.send_empty(Method::DELETE, &format!("/pipelines/{}", pipeline_id))
            .await
    }

    /// Trigger a manual run of a pipeline
    ///
    /// # Returns
    /// The new execution
    pub async fn run_pipeline(&self, pipeline_id: Uuid, req: &RunPipeline) -> Result<Execution> {
        self.send_json(Method::POST, &format!("/pipelines/{}/run", pipeline_id), req)
            .await
    }

    // =============================================================================
    // Configuration Versions
    // =============================================================================

    /// Recent configuration versions of a pipeline, newest first
    pub async fn pipeline_configs(&self, pipeline_id: Uuid) -> Result<Vec<PipelineConfig>> {
        let page: Paginated<PipelineConfig> = self
            .get_list(&format!("/pipelines/{}/configs", pipeline_id), &QueryParams::new())
            .await?;
        Ok(page.into_items())
    }

    /// Store a new configuration version
    ///
    /// The backend validates the YAML; an invalid document is still stored,
    /// with `is_valid` unset and the problems in `validation_errors`.
    pub async fn update_pipeline_config(
        &self,
        pipeline_id: Uuid,
        req: &UpdatePipelineConfig,
    ) -> Result<PipelineConfig> {
        self.send_json(
            Method::POST,
            &format!("/pipelines/{}/update_config", pipeline_id),
            req,
        )
        .await
    }
}
