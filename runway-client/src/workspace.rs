//! Workspace settings endpoints

use crate::ApiClient;
use crate::error::Result;
use reqwest::Method;
use runway_core::domain::workspace::Workspace;
use runway_core::dto::workspace::UpdateWorkspace;

impl ApiClient {
    pub async fn get_workspace(&self) -> Result<Workspace> {
        self.get_json("/workspace").await
    }

    pub async fn update_workspace(&self, req: &UpdateWorkspace) -> Result<Workspace> {
        self.send_json(Method::PATCH, "/workspace", req).await
    }
}
