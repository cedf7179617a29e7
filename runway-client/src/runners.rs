//! Runner-related API endpoints

use crate::ApiClient;
use crate::error::Result;
use reqwest::Method;
use runway_core::domain::runner::Runner;
use runway_core::dto::Paginated;
use runway_core::dto::runner::{RegistrationToken, RunnerFilter};
use uuid::Uuid;

impl ApiClient {
    // =============================================================================
    // Runner Management
    // =============================================================================

    /// List runners matching a filter
    ///
    /// Fails with a state machine error when any returned runner reports a
    /// current job without being busy, or the other way round.
    pub async fn list_runners(&self, filter: &RunnerFilter) -> Result<Paginated<Runner>> {
        let page: Paginated<Runner> = self.get_list("/runners", filter).await?;
        page.items.iter().try_for_each(Runner::validate)?;
        Ok(page)
    }

    /// Get a runner by ID
    pub async fn get_runner(&self, runner_id: Uuid) -> Result<Runner> {
        checked(self.get_json(&format!("/runners/{}", runner_id)).await?)
    }

    /// Remove a runner
    pub async fn delete_runner(&self, runner_id: Uuid) -> Result<()> {
        self.send_empty(Method::DELETE, &format!("/runners/{}", runner_id))
            .await
    }

    /// Create a one-time token for registering a new runner
    pub async fn create_registration_token(&self) -> Result<RegistrationToken> {
        self.send_json(
            Method::POST,
            "/runners/registration-token",
            &serde_json::json!({}),
        )
        .await
    }

    /// Allow a runner to claim jobs again
    pub async fn enable_runner(&self, runner_id: Uuid) -> Result<Runner> {
        checked(
            self.send_json(
                Method::POST,
                &format!("/runners/{}/enable", runner_id),
                &serde_json::json!({}),
            )
            .await?,
        )
    }

    /// Stop a runner from claiming new jobs
    pub async fn disable_runner(&self, runner_id: Uuid) -> Result<Runner> {
        checked(
            self.send_json(
                Method::POST,
                &format!("/runners/{}/disable", runner_id),
                &serde_json::json!({}),
            )
            .await?,
        )
    }
}

fn checked(runner: Runner) -> Result<Runner> {
    runner.validate()?;
    Ok(runner)
}
