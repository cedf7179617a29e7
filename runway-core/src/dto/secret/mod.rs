//! Secret DTOs
//!
//! Only these write-side types ever carry a secret value. Their `Debug`
//! output redacts it.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::secret::SecretScope;
use crate::dto::query::{QueryParams, ToQuery};

/// Request to create a secret
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSecret {
    pub name: String,
    pub value: String,
    pub scope: SecretScope,
    /// Pipelines allowed to use the secret
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pipelines: Vec<Uuid>,
}

impl std::fmt::Debug for CreateSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateSecret")
            .field("name", &self.name)
            .field("value", &"<redacted>")
            .field("scope", &self.scope)
            .field("pipelines", &self.pipelines)
            .finish()
    }
}

/// Partial secret update
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSecret {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<SecretScope>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipelines: Option<Vec<Uuid>>,
}

impl std::fmt::Debug for UpdateSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateSecret")
            .field("value", &self.value.as_ref().map(|_| "<redacted>"))
            .field("scope", &self.scope)
            .field("pipelines", &self.pipelines)
            .finish()
    }
}

/// Filter for listing secrets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretFilter {
    pub scope: Option<SecretScope>,
    pub search: Option<String>,
    pub pipeline_id: Option<Uuid>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ToQuery for SecretFilter {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("scope", self.scope)
            .with_opt("search", self.search.as_deref())
            .with_opt("pipelineId", self.pipeline_id)
            .with_opt("page", self.page)
            .with_opt("pageSize", self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_value() {
        let create = CreateSecret {
            name: "AWS_KEY".to_string(),
            value: "AKIA-very-secret".to_string(),
            scope: SecretScope::Organization,
            pipelines: Vec::new(),
        };
        let update = UpdateSecret {
            value: Some("AKIA-very-secret".to_string()),
            ..Default::default()
        };

        assert!(!format!("{:?}", create).contains("AKIA"));
        assert!(!format!("{:?}", update).contains("AKIA"));
    }

    #[test]
    fn test_create_serializes_value() {
        let create = CreateSecret {
            name: "AWS_KEY".to_string(),
            value: "v".to_string(),
            scope: SecretScope::Pipeline,
            pipelines: vec![Uuid::nil()],
        };
        let json = serde_json::to_value(&create).unwrap();
        assert_eq!(json["value"], "v");
        assert_eq!(json["scope"], "pipeline");
    }
}
