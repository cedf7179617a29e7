//! Configuration module
//!
//! Turns command-line settings into a ready-to-use API client.

use anyhow::{Context, Result};
use runway_client::{ApiClient, ClientConfig};

/// CLI configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// API base URL; the client default when absent
    pub api_url: Option<String>,
    /// Bearer token sent with every request
    pub token: Option<String>,
}

impl Config {
    /// Builds an API client from this configuration
    pub fn client(&self) -> Result<ApiClient> {
        self.client_with_env(|key| std::env::var(key).ok())
    }

    /// An explicit `api_url` wins; only the timeout is then read from `env`
    fn client_with_env(&self, env: impl Fn(&str) -> Option<String>) -> Result<ApiClient> {
        let client_config = match &self.api_url {
            Some(url) => {
                let timeout = ClientConfig::timeout_from_lookup(&env)
                    .context("Invalid client configuration in environment")?;
                ClientConfig::new(url).with_timeout(timeout)
            }
            None => ClientConfig::from_lookup(&env)
                .context("Invalid client configuration in environment")?,
        };

        let mut client = ApiClient::from_config(&client_config)
            .with_context(|| format!("Cannot build API client for {}", client_config.base_url))?;
        client.set_token(self.token.clone());

        tracing::debug!("Using API at {}", client.base_url());
        Ok(client)
    }
}
