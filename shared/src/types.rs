//! Common types used across the platform

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// GPS coordinates in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A point on a field worker's route
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
    pub timestamp: DateTime<Utc>,
}

impl RoutePoint {
    pub fn new(lat: f64, lng: f64, timestamp: DateTime<Utc>) -> Self {
        Self { lat, lng, timestamp }
    }

    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// A closed-out route archived to the history log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteArchive {
    pub worker_id: String,
    pub date: DateTime<Utc>,
    pub route: Vec<RoutePoint>,
}

/// Presentation color for a status badge
///
/// Display hints are never stored on records; every status enum maps into
/// this table at presentation time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusColor {
    Green,
    Yellow,
    Red,
    Blue,
}

impl StatusColor {
    /// CSS utility class used by the dashboard badges
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusColor::Green => "bg-green-500",
            StatusColor::Yellow => "bg-yellow-500",
            StatusColor::Red => "bg-red-500",
            StatusColor::Blue => "bg-blue-500",
        }
    }
}

/// Semantic severity attached to free-text statuses (animal records)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusFlag {
    #[default]
    Ok,
    Warning,
    Alert,
}

impl StatusFlag {
    pub fn color(&self) -> StatusColor {
        match self {
            StatusFlag::Ok => StatusColor::Green,
            StatusFlag::Warning => StatusColor::Yellow,
            StatusFlag::Alert => StatusColor::Red,
        }
    }
}
