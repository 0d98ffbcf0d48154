//! Herd models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::StatusFlag;

/// An animal in the farm's herd
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Animal {
    pub id: String,
    pub kind: AnimalKind,
    pub name: String,
    /// Free text, e.g. "5 anos" / "3 meses"
    pub age: String,
    /// Free-text condition, e.g. "Prenha", "Doente"
    pub status: String,
    /// Severity of `status`, drives the badge color
    pub status_flag: StatusFlag,
    /// Last recorded event for this animal
    pub last_event: String,
    pub registered_at: DateTime<Utc>,
    /// Linked photo file id
    pub photo: Option<String>,
    pub notes: Option<String>,
}

/// Herd categories, each with its own id sequence
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AnimalKind {
    Cow,
    Bull,
    Calf,
}

impl AnimalKind {
    /// Id prefix for the per-kind sequence (V001, T001, B001)
    pub fn id_prefix(&self) -> &'static str {
        match self {
            AnimalKind::Cow => "V",
            AnimalKind::Bull => "T",
            AnimalKind::Calf => "B",
        }
    }
}

impl std::fmt::Display for AnimalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnimalKind::Cow => write!(f, "vaca"),
            AnimalKind::Bull => write!(f, "touro"),
            AnimalKind::Calf => write!(f, "bezerro"),
        }
    }
}
