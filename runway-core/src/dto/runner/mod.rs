//! Runner DTOs
//!
//! Data transfer objects for runner-related operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::runner::RunnerStatus;
use crate::dto::query::{QueryParams, ToQuery};

/// One-time token a new runner uses to register itself
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationToken {
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for RegistrationToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Filter for listing runners
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunnerFilter {
    pub status: Option<RunnerStatus>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ToQuery for RunnerFilter {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("status", self.status)
            .with_opt("search", self.search.as_deref())
            .with_opt("page", self.page)
            .with_opt("pageSize", self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_not_debug_printed() {
        let token = RegistrationToken {
            token: "rt_secret".to_string(),
            expires_at: None,
        };
        assert!(!format!("{:?}", token).contains("rt_secret"));
    }

    #[test]
    fn test_filter_status() {
        let filter = RunnerFilter {
            status: Some(RunnerStatus::Busy),
            ..Default::default()
        };
        assert_eq!(filter.to_query().get("status"), Some("busy"));
    }
}
