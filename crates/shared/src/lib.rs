//! Shared types, errors, and configuration for Coinage.
//!
//! This crate provides what every other crate needs:
//! - The `MoneyError` type and `MoneyResult` alias
//! - Rounding modes and backend identifiers
//! - Configuration management
//! - Tracing bootstrap

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::{CoinageConfig, EngineConfig, LoggingConfig, MoneyConfig};
pub use error::{MoneyError, MoneyResult};
pub use types::{BackendKind, RoundingMode};
