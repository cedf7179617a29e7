//! Secret domain types
//!
//! The secret value is write-only: it is accepted by create/update requests
//! (see `dto::secret`) but no read model carries it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Secret metadata as returned by read operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Secret {
    pub id: Uuid,
    pub name: String,
    pub scope: SecretScope,
    /// Pipelines referencing this secret
    #[serde(default)]
    pub used_in: BTreeSet<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretScope {
    Organization,
    Repository,
    Pipeline,
}

impl SecretScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretScope::Organization => "organization",
            SecretScope::Repository => "repository",
            SecretScope::Pipeline => "pipeline",
        }
    }
}

impl std::fmt::Display for SecretScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SecretScope {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "organization" => Ok(SecretScope::Organization),
            "repository" => Ok(SecretScope::Repository),
            "pipeline" => Ok(SecretScope::Pipeline),
            other => Err(format!("unknown secret scope '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_is_ignored_on_read() {
        let json = serde_json::json!({
            "id": Uuid::nil(),
            "name": "DEPLOY_TOKEN",
            "scope": "repository",
            "value": "hunter2",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        });
        let secret: Secret = serde_json::from_value(json).unwrap();
        let round = serde_json::to_string(&secret).unwrap();

        assert_eq!(secret.scope, SecretScope::Repository);
        assert!(secret.used_in.is_empty());
        assert!(!round.contains("hunter2"));
    }
}
