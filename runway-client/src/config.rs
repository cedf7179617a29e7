//! Client configuration
//!
//! The base address is resolved once, when a client is built from a
//! [`ClientConfig`]; every request after that uses the stored value.

use std::time::Duration;

use crate::error::{ClientError, Result};

/// Base address used when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding the base address
pub const API_URL_ENV: &str = "RUNWAY_API_URL";

/// Environment variable holding the request timeout, in seconds
pub const API_TIMEOUT_ENV: &str = "RUNWAY_API_TIMEOUT";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for [`crate::ApiClient`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base address, e.g. "https://ci.example.com/api"
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// - RUNWAY_API_URL (optional, default: http://localhost:8000/api)
    /// - RUNWAY_API_TIMEOUT (optional, seconds, default: 30)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup(API_URL_ENV)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = Self::timeout_from_lookup(&lookup)?;

        let config = Self::new(base_url.trim()).with_timeout(timeout);
        config.validate()?;
        Ok(config)
    }

    /// Reads only RUNWAY_API_TIMEOUT, for callers that pick the base address themselves
    pub fn timeout_from_env() -> Result<Duration> {
        Self::timeout_from_lookup(|key| std::env::var(key).ok())
    }

    pub fn timeout_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Duration> {
        let Some(raw) = lookup(API_TIMEOUT_ENV) else {
            return Ok(DEFAULT_TIMEOUT);
        };
        raw.trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| {
                ClientError::InvalidRequest(format!(
                    "{} must be a number of seconds, got '{}'",
                    API_TIMEOUT_ENV, raw
                ))
            })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::InvalidRequest(
                "API base URL must not be empty".to_string(),
            ));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::InvalidRequest(format!(
                "API base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }

        if self.timeout.is_zero() {
            return Err(ClientError::InvalidRequest(
                "request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_env_override() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_URL_ENV, "https://ci.example.com/api/"),
            (API_TIMEOUT_ENV, "5"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://ci.example.com/api");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_blank_override_falls_back_to_default() {
        let config = ClientConfig::from_lookup(lookup(&[(API_URL_ENV, "  ")])).unwrap();
        assert_eq!(config.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_bad_timeout_is_rejected() {
        let err = ClientConfig::from_lookup(lookup(&[(API_TIMEOUT_ENV, "soon")])).unwrap_err();
        assert!(matches!(err, ClientError::InvalidRequest(_)));
    }

    #[test]
    fn test_timeout_ignores_url_variable() {
        let timeout =
            ClientConfig::timeout_from_lookup(lookup(&[(API_URL_ENV, "not a url"), (API_TIMEOUT_ENV, "7")]))
                .unwrap();
        assert_eq!(timeout, Duration::from_secs(7));
        assert_eq!(ClientConfig::timeout_from_lookup(lookup(&[])).unwrap(), DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_validate() {
        assert!(ClientConfig::new("http://localhost:8000/api").validate().is_ok());
        assert!(ClientConfig::new("").validate().is_err());
        assert!(ClientConfig::new("/api").validate().is_err());
        assert!(
            ClientConfig::new("http://localhost")
                .with_timeout(Duration::ZERO)
                .validate()
                .is_err()
        );
    }
}
