//! User domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Role within the workspace (owner, admin, member, viewer)
    pub role: String,
}
