//! Domain models for the Fazenda farm management platform

mod animal;
mod incident;
mod license;
mod media;
mod supply;
mod task;
mod ticket;
mod user;
mod worker;

pub use animal::*;
pub use incident::*;
pub use license::*;
pub use media::*;
pub use supply::*;
pub use task::*;
pub use ticket::*;
pub use user::*;
pub use worker::*;
