//! Artifact domain types
//!
//! Artifacts are files a job produced. They expire after their retention
//! period; an expired artifact can still be listed on request but no longer
//! downloaded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata of a stored build artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub id: Uuid,
    pub name: String,
    pub execution_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_number: Option<u64>,
    pub job_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_name: Option<String>,
    pub size_bytes: u64,
    pub checksum_sha256: String,
    #[serde(default = "one")]
    pub file_count: u32,
    #[serde(default)]
    pub is_compressed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compression_type: Option<String>,
    pub retention_days: u32,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

fn one() -> u32 {
    1
}

impl Artifact {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Size in mebibytes, for display
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / (1024.0 * 1024.0)
    }
}

/// Where to fetch an artifact's content from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDownload {
    pub download_url: String,
    pub name: String,
    pub size_bytes: u64,
    pub checksum_sha256: String,
}
