//! Common types used across the workspace.

pub mod backend;
pub mod rounding;

pub use backend::BackendKind;
pub use rounding::RoundingMode;
