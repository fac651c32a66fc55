//! Exact money values.

pub mod allocation;
pub mod operand;
pub mod parse;
pub mod value;

#[cfg(test)]
mod props;

pub use operand::{IntoOperand, Operand};
pub use parse::parse_to_minor_units;
pub use value::{DEFAULT_PRECISION, Money};
