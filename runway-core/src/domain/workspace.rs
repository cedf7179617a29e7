//! Workspace domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tenant-level settings, one per tenant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: Uuid,
    pub name: String,
    pub default_branch: String,
    /// IANA timezone name, e.g. "Europe/Berlin"
    pub timezone: String,
}
