//! Business logic services for the Fazenda platform

pub mod accounts;
pub mod auth;
pub mod herd;
pub mod incidents;
pub mod lifecycle;
pub mod media;
pub mod supplies;
pub mod support;
pub mod tasks;
pub mod tracking;

pub use accounts::AccountService;
pub use auth::{AuthService, Session};
pub use herd::HerdService;
pub use incidents::IncidentService;
pub use lifecycle::LifecycleService;
pub use media::MediaService;
pub use supplies::SupplyService;
pub use support::SupportService;
pub use tasks::TaskService;
pub use tracking::TrackingService;
