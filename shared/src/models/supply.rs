//! Supply inventory models

use serde::{Deserialize, Serialize};

use crate::types::StatusColor;

/// A consumable the farm keeps in stock
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supply {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    /// Free text, e.g. "sacos", "litros"
    pub unit: String,
    pub urgency: Urgency,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Normal,
    Important,
    Urgent,
}

impl Urgency {
    pub fn color(&self) -> StatusColor {
        match self {
            Urgency::Normal => StatusColor::Green,
            Urgency::Important => StatusColor::Yellow,
            Urgency::Urgent => StatusColor::Red,
        }
    }
}
