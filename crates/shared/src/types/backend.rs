//! Names of the interchangeable arithmetic backends.

use serde::{Deserialize, Serialize};

/// Identifies one arithmetic backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Scaled arbitrary-precision integers.
    BigInteger,
    /// Arbitrary-precision decimals.
    Decimal,
    /// Overflow-checked `i128` scaled integers.
    Native,
}

impl BackendKind {
    /// Backends in selection preference order.
    pub const PREFERENCE: [Self; 3] = [Self::BigInteger, Self::Decimal, Self::Native];
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BigInteger => write!(f, "big_integer"),
            Self::Decimal => write!(f, "decimal"),
            Self::Native => write!(f, "native"),
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "big_integer" | "bigint" => Ok(Self::BigInteger),
            "decimal" => Ok(Self::Decimal),
            "native" => Ok(Self::Native),
            _ => Err(format!("Unknown arithmetic backend: {s}")),
        }
    }
}
