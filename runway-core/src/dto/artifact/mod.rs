//! Artifact DTOs

use uuid::Uuid;

use crate::dto::query::{QueryParams, ToQuery};

/// Filter for listing artifacts
///
/// Expired artifacts are left out by the backend unless `include_expired`
/// is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactFilter {
    pub execution_id: Option<Uuid>,
    pub job_id: Option<Uuid>,
    pub include_expired: Option<bool>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl ArtifactFilter {
    /// Artifacts produced by one execution
    pub fn for_execution(execution_id: Uuid) -> Self {
        Self {
            execution_id: Some(execution_id),
            ..Self::default()
        }
    }
}

impl ToQuery for ArtifactFilter {
    fn to_query(&self) -> QueryParams {
        QueryParams::new()
            .with_opt("execution", self.execution_id)
            .with_opt("job", self.job_id)
            .with_opt("includeExpired", self.include_expired)
            .with_opt("page", self.page)
            .with_opt("pageSize", self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_keys() {
        let filter = ArtifactFilter {
            include_expired: Some(false),
            ..ArtifactFilter::for_execution(Uuid::nil())
        };
        let query = filter.to_query();

        assert_eq!(query.get("execution"), Some(Uuid::nil().to_string().as_str()));
        assert_eq!(query.get("includeExpired"), Some("false"));
        assert!(!query.contains_key("job"));
        assert_eq!(query.len(), 2);
    }
}
