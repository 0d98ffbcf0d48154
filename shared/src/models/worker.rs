//! Field worker models

use serde::{Deserialize, Serialize};

use crate::types::{RoutePoint, StatusColor};

/// On-site farm staff whose client app captures location and media
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldWorker {
    pub id: String,
    pub name: String,
    /// Farm sector the worker covers, e.g. "Setor Norte"
    pub sector: String,
    pub status: WorkerStatus,
    pub last_position: Option<RoutePoint>,
    /// Live route, ordered by arrival
    pub route: Vec<RoutePoint>,
    pub incidents_today: u32,
    /// Accumulated over recorded positions, in km
    pub distance_km: f64,
    /// Accumulated active time, in seconds
    pub active_time_secs: i64,
    pub photos_captured: u32,
    pub audios_captured: u32,
    pub tasks_completed: u32,
    pub tasks_pending: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkerStatus {
    Active,
    Paused,
    Inactive,
}

impl WorkerStatus {
    pub fn color(&self) -> StatusColor {
        match self {
            WorkerStatus::Active => StatusColor::Green,
            WorkerStatus::Paused => StatusColor::Yellow,
            WorkerStatus::Inactive => StatusColor::Red,
        }
    }
}

/// Read-side aggregation over a worker's activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerStatistics {
    pub worker_id: String,
    pub total_distance_km: f64,
    pub active_time_secs: i64,
    pub incidents_reported: usize,
    pub tasks_completed: usize,
}
