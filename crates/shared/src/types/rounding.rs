//! Tie-breaking rules used when a result must become a whole minor unit.

use serde::{Deserialize, Serialize};

/// How a value exactly halfway between two integers is rounded.
///
/// Values that are not ties always go to the nearest integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Ties away from zero: 2.5 → 3, -2.5 → -3.
    #[default]
    HalfUp,
    /// Ties toward zero: 2.5 → 2, -2.5 → -2.
    HalfDown,
    /// Ties to the even neighbour: 2.5 → 2, 3.5 → 4.
    HalfEven,
    /// Ties to the odd neighbour: 2.5 → 3, 3.5 → 3.
    HalfOdd,
}

impl RoundingMode {
    /// All modes, in declaration order.
    pub const ALL: [Self; 4] = [Self::HalfUp, Self::HalfDown, Self::HalfEven, Self::HalfOdd];

    /// Decides whether a tie moves away from zero, given the parity of the
    /// truncated integer part.
    #[must_use]
    pub const fn tie_goes_away_from_zero(self, truncated_is_even: bool) -> bool {
        match self {
            Self::HalfUp => true,
            Self::HalfDown => false,
            Self::HalfEven => !truncated_is_even,
            Self::HalfOdd => truncated_is_even,
        }
    }
}

impl std::fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HalfUp => write!(f, "half_up"),
            Self::HalfDown => write!(f, "half_down"),
            Self::HalfEven => write!(f, "half_even"),
            Self::HalfOdd => write!(f, "half_odd"),
        }
    }
}

impl std::str::FromStr for RoundingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "half_up" => Ok(Self::HalfUp),
            "half_down" => Ok(Self::HalfDown),
            "half_even" => Ok(Self::HalfEven),
            "half_odd" => Ok(Self::HalfOdd),
            _ => Err(format!("Unknown rounding mode: {s}")),
        }
    }
}
