//! User account models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account on the platform
///
/// Passwords are stored in plain text: this system has no real
/// authentication layer and the storage is client-local by design.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
    /// License-driven expiry; only `role == Client` carries one
    pub expires_at: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub farm_id: Option<String>,
    pub farm_name: Option<String>,
    /// Linked field worker record, for `role == FieldWorker`
    pub worker_id: Option<String>,
}

/// Roles gating the dashboard each user lands on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Dev,
    Client,
    FieldWorker,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Dev => write!(f, "dev"),
            UserRole::Client => write!(f, "client"),
            UserRole::FieldWorker => write!(f, "field worker"),
        }
    }
}

/// Account lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserStatus {
    Active,
    Trial,
    Expired,
    Suspended,
}

impl UserStatus {
    pub fn color(&self) -> crate::types::StatusColor {
        match self {
            UserStatus::Active => crate::types::StatusColor::Green,
            UserStatus::Trial => crate::types::StatusColor::Blue,
            UserStatus::Expired => crate::types::StatusColor::Yellow,
            UserStatus::Suspended => crate::types::StatusColor::Red,
        }
    }
}

impl User {
    /// Whether the license window backing this account has passed
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self.role, UserRole::Client)
            && self.expires_at.map(|exp| exp < now).unwrap_or(false)
    }
}
