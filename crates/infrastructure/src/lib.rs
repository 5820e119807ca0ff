//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and provides the
//! configuration and logging setup used by the binaries.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, LoggingConfig};
pub use telemetry::{TelemetryError, init_logging};
