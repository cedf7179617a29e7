//! Artifact-related API endpoints

use crate::ApiClient;
use crate::error::Result;
use reqwest::Method;
use runway_core::domain::artifact::{Artifact, ArtifactDownload};
use runway_core::dto::Paginated;
use runway_core::dto::artifact::ArtifactFilter;
use uuid::Uuid;

impl ApiClient {
    // =============================================================================
    // Artifacts
    // =============================================================================

    /// List artifacts matching a filter
    pub async fn list_artifacts(&self, filter: &ArtifactFilter) -> Result<Paginated<Artifact>> {
        self.get_list("/artifacts", filter).await
    }

    /// Get artifact metadata by ID
    pub async fn get_artifact(&self, artifact_id: Uuid) -> Result<Artifact> {
        self.get_json(&format!("/artifacts/{}", artifact_id)).await
    }

    /// Resolve where an artifact can be downloaded from
    ///
    /// # Errors
    /// An expired artifact answers 410, see [`crate::ClientError::is_gone`].
    pub async fn download_artifact(&self, artifact_id: Uuid) -> Result<ArtifactDownload> {
        self.get_json(&format!("/artifacts/{}/download", artifact_id))
            .await
    }

    /// Delete an artifact
    pub async fn delete_artifact(&self, artifact_id: Uuid) -> Result<()> {
        self.send_empty(Method::DELETE, &format!("/artifacts/{}", artifact_id))
            .await
    }
}
