//! Captured media models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::GeoPoint;

/// A captured audio clip or photo, stored inline as base64
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredFile {
    pub id: String,
    pub kind: MediaKind,
    /// Base64-encoded payload
    pub data: String,
    pub file_name: String,
    pub mime_type: String,
    pub created_at: DateTime<Utc>,
    /// Id of the user who captured the file
    pub created_by: String,
    pub worker_id: Option<String>,
    pub farm_id: Option<String>,
    pub incident_id: Option<String>,
    pub animal_id: Option<String>,
    pub location: Option<GeoPoint>,
    /// Free-form capture metadata (duration, device, ...)
    pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Audio,
    Photo,
}
