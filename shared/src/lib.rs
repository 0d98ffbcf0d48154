//! Shared types and models for the Fazenda farm management platform
//!
//! This crate contains types shared between the engine, the UI shells,
//! and other components of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
