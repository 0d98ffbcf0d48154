//! Fazenda farm management engine
//!
//! Role-based farm operations over a client-local record store: accounts
//! and licenses, support tickets, herd and incident records, field worker
//! telemetry, work tasks, supplies and captured media. Persistence is a
//! pluggable key-value port holding one JSON collection per entity type;
//! there is no server and no concurrent multi-user coordination.

pub mod config;
pub mod error;
pub mod geo;
pub mod seed;
pub mod services;
pub mod store;

pub use config::Config;
pub use error::{AppError, AppResult};
