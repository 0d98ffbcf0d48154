//! License and plan models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The entitlement record governing a client user's access window and
/// support-hour budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct License {
    pub id: String,
    pub user_id: String,
    pub plan: PlanType,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Total price in BRL
    pub price: Decimal,
    pub status: LicenseStatus,
    pub payment_status: PaymentStatus,
    pub payment_date: Option<DateTime<Utc>>,
    pub support_hours: Decimal,
    pub support_hours_used: Decimal,
}

/// Subscription plans
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    Trial,
    Basic,
    Premium,
}

impl PlanType {
    /// Monthly price in BRL
    pub fn monthly_rate(&self) -> Decimal {
        match self {
            PlanType::Trial => Decimal::ZERO,
            PlanType::Basic => Decimal::from(500),
            PlanType::Premium => Decimal::from(900),
        }
    }

    /// Support hours bundled per subscribed month
    pub fn support_hours_per_month(&self) -> Decimal {
        match self {
            PlanType::Trial => Decimal::ZERO,
            PlanType::Basic => Decimal::from(3),
            PlanType::Premium => Decimal::from(6),
        }
    }
}

impl std::fmt::Display for PlanType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanType::Trial => write!(f, "Trial"),
            PlanType::Basic => write!(f, "Basic"),
            PlanType::Premium => write!(f, "Premium"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LicenseStatus {
    Active,
    Expired,
    Canceled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Refunded,
}

impl License {
    pub fn is_active(&self) -> bool {
        self.status == LicenseStatus::Active
    }

    /// Remaining support-hour budget
    pub fn support_hours_left(&self) -> Decimal {
        self.support_hours - self.support_hours_used
    }
}
