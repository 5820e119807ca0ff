//! Application layer - Use cases and orchestration
//!
//! Holds the weather state container consumed by presentation layers and the
//! port it fetches through. Orchestrates domain objects and infrastructure
//! adapters.

pub mod error;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
