//! Secret-related API endpoints
//!
//! Secret values are only ever sent, never returned.

use crate::ApiClient;
use crate::error::Result;
use reqwest::Method;
use runway_core::domain::secret::Secret;
use runway_core::dto::Paginated;
use runway_core::dto::secret::{CreateSecret, SecretFilter, UpdateSecret};
use uuid::Uuid;

impl ApiClient {
    pub async fn list_secrets(&self, filter: &SecretFilter) -> Result<Paginated<Secret>> {
        self.get_list("/secrets", filter).await
    }

    pub async fn get_secret(&self, secret_id: Uuid) -> Result<Secret> {
        self.get_json(&format!("/secrets/{}", secret_id)).await
    }

    pub async fn create_secret(&self, req: &CreateSecret) -> Result<Secret> {
        tracing::info!("Creating secret: {}", req.name);
        self.send_json(Method::POST, "/secrets", req).await
    }

    pub async fn update_secret(&self, secret_id: Uuid, req: &UpdateSecret) -> Result<Secret> {
        self.send_json(Method::PATCH, &format!("/secrets/{}", secret_id), req)
            .await
    }

    pub async fn delete_secret(&self, secret_id: Uuid) -> Result<()> {
        self.send_empty(Method::DELETE, &format!("/secrets/{}", secret_id))
            .await
    }
}
