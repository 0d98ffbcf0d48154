//! Work task models

use serde::{Deserialize, Serialize};

/// A unit of field work, optionally assigned to a worker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkTask {
    pub id: String,
    pub description: String,
    pub status: TaskStatus,
    pub worker_id: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Done,
}
