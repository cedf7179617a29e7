//! Runway HTTP Client
//!
//! A typed client for the Runway CI/CD dashboard API.
//!
//! Every call goes through one request primitive ([`ApiClient::request`])
//! that attaches the bearer token, encodes query parameters, and turns
//! non-2xx responses into [`ClientError`]. Results that change execution
//! state are checked against [`runway_core::lifecycle`] before they are
//! applied locally.
//!
//! # Example
//!
//! ```no_run
//! use runway_client::ApiClient;
//! use runway_core::dto::execution::ExecutionFilter;
//! use runway_core::domain::execution::ExecutionStatus;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut client = ApiClient::from_env()?;
//!     client.login("ana", "hunter2").await?;
//!
//!     let failed = client
//!         .list_executions(&ExecutionFilter {
//!             status: Some(ExecutionStatus::Failed),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     for execution in failed {
//!         println!("{} #{}", execution.pipeline_name, execution.number);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
mod api_keys;
mod artifacts;
mod auth;
mod executions;
mod pipelines;
mod request;
mod runners;
mod secrets;
mod workspace;

// Re-export commonly used types
pub use config::{ClientConfig, DEFAULT_API_URL};
pub use error::{ClientError, Result, UNKNOWN_ERROR};
pub use request::RequestOptions;
pub use reqwest::Method;

use reqwest::Client;

/// HTTP client for the Runway API
///
/// Endpoint methods are grouped by resource:
/// - Pipelines (list, get, create, update, delete, run, config versions)
/// - Executions (list, get, jobs, cancel, rerun, logs)
/// - Artifacts
/// - Runners and registration tokens
/// - Secrets
/// - Authentication, API keys and workspace settings
///
/// The bearer token lives on the value itself. Independent clients hold
/// independent tokens.
#[derive(Clone)]
pub struct ApiClient {
    /// API base address, without trailing slash
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Bearer token sent with every request while set
    token: Option<String>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.token.is_some())
            .finish()
    }
}

impl ApiClient {
    /// Create a new client
    ///
    /// # Example
    /// ```
    /// use runway_client::ApiClient;
    ///
    /// let client = ApiClient::new("http://localhost:8000/api");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: None,
        }
    }

    /// Create a client from validated configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(&config.base_url, client))
    }

    /// Create a client configured from `RUNWAY_API_URL` / `RUNWAY_API_TIMEOUT`
    pub fn from_env() -> Result<Self> {
        Self::from_config(&ClientConfig::from_env()?)
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sets or clears the bearer token
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
