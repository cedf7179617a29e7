//! API key endpoints

use crate::ApiClient;
use crate::error::Result;
use reqwest::Method;
use runway_core::domain::api_key::{ApiKey, CreatedApiKey};
use runway_core::dto::api_key::CreateApiKey;
use runway_core::dto::{Paginated, QueryParams};
use uuid::Uuid;

impl ApiClient {
    // =============================================================================
    // API Keys
    // =============================================================================

    /// List the current user's API keys
    pub async fn list_api_keys(&self) -> Result<Vec<ApiKey>> {
        let page: Paginated<ApiKey> = self.get_list("/api-keys", &QueryParams::new()).await?;
        Ok(page.into_items())
    }

    /// Create an API key
    ///
    /// The returned [`CreatedApiKey::key`] is the only time the raw key is
    /// available.
    pub async fn create_api_key(&self, req: &CreateApiKey) -> Result<CreatedApiKey> {
        tracing::info!("Creating API key: {}", req.name);
        self.send_json(Method::POST, "/api-keys", req).await
    }

    /// Revoke an API key
    pub async fn delete_api_key(&self, key_id: Uuid) -> Result<()> {
        self.send_empty(Method::DELETE, &format!("/api-keys/{}", key_id))
            .await
    }
}
