//! Incident models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::GeoPoint;

/// A reported farm problem (fence damage, sick animal, missing supply, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    /// Free-text category, e.g. "Cerca Danificada"
    pub kind: String,
    pub description: String,
    pub reported_at: DateTime<Utc>,
    pub status: IncidentStatus,
    pub location: Option<GeoPoint>,
    /// Linked audio evidence file id
    pub audio: Option<String>,
    /// Linked photo evidence file id
    pub photo: Option<String>,
    pub worker_id: Option<String>,
    /// Denormalized for dashboard listings
    pub worker_name: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Pending,
    InProgress,
    Resolved,
}

impl IncidentStatus {
    pub fn color(&self) -> crate::types::StatusColor {
        match self {
            IncidentStatus::Pending => crate::types::StatusColor::Yellow,
            IncidentStatus::InProgress => crate::types::StatusColor::Blue,
            IncidentStatus::Resolved => crate::types::StatusColor::Green,
        }
    }
}
