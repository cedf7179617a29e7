//! Authentication endpoints
//!
//! These take `&mut self` because they change the token the client sends.

use crate::ApiClient;
use crate::error::Result;
use reqwest::Method;
use runway_core::domain::user::User;
use runway_core::dto::auth::{LoginRequest, LoginResponse, TokenResponse};

impl ApiClient {
    /// Log in and keep the returned token for later requests
    pub async fn login(&mut self, username: &str, password: &str) -> Result<User> {
        let req = LoginRequest::new(username, password);
        let response: LoginResponse = self.send_json(Method::POST, "/auth/login", &req).await?;

        tracing::info!("Logged in as {}", response.user.username);
        self.token = Some(response.token);
        Ok(response.user)
    }

    /// Log out
    ///
    /// The local token is cleared even when the request fails.
    pub async fn logout(&mut self) -> Result<()> {
        let result = self.send_empty(Method::POST, "/auth/logout").await;
        self.token = None;
        result
    }

    /// Exchange the current token for a fresh one
    pub async fn refresh_token(&mut self) -> Result<()> {
        let response: TokenResponse = self
            .send_json(Method::POST, "/auth/refresh", &serde_json::json!({}))
            .await?;
        self.token = Some(response.token);
        Ok(())
    }

    /// The user the current token belongs to
    pub async fn current_user(&self) -> Result<User> {
        self.get_json("/auth/me").await
    }
}
