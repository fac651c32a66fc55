//! Library-wide error types.

use thiserror::Error;

/// Result type alias using `MoneyError`.
pub type MoneyResult<T> = Result<T, MoneyError>;

/// Errors raised by money arithmetic, currency lookup and exchange resolution.
///
/// Every failure is a deterministic outcome of pure computation, so none of
/// them is retryable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Malformed input: bad decimal string, non-finite operand, bad ratios.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Two amounts in different currencies were combined.
    #[error("Currency mismatch: {left} and {right}")]
    CurrencyMismatch {
        /// Currency code of the left-hand operand.
        left: String,
        /// Currency code of the right-hand operand.
        right: String,
    },

    /// Division by a zero scalar.
    #[error("Division by zero")]
    DivisionByZero,

    /// The currency is absent from the reference data.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// No direct or composed exchange rate exists for the pair.
    #[error("Cannot resolve a currency pair for {base}/{counter}")]
    UnresolvablePair {
        /// Base currency code.
        base: String,
        /// Counter currency code.
        counter: String,
    },

    /// No arithmetic backend passed its capability check.
    #[error("No supported arithmetic backend is available")]
    NoSupportedBackend,

    /// A value left the representable range of the active backend.
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),
}

impl MoneyError {
    /// Builds a `CurrencyMismatch` from anything printable as a code.
    pub fn currency_mismatch(left: impl ToString, right: impl ToString) -> Self {
        Self::CurrencyMismatch {
            left: left.to_string(),
            right: right.to_string(),
        }
    }

    /// Builds an `UnresolvablePair` from anything printable as a code.
    pub fn unresolvable(base: impl ToString, counter: impl ToString) -> Self {
        Self::UnresolvablePair {
            base: base.to_string(),
            counter: counter.to_string(),
        }
    }

    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::CurrencyMismatch { .. } => "CURRENCY_MISMATCH",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
            Self::UnknownCurrency(_) => "UNKNOWN_CURRENCY",
            Self::UnresolvablePair { .. } => "UNRESOLVABLE_PAIR",
            Self::NoSupportedBackend => "NO_SUPPORTED_BACKEND",
            Self::Overflow(_) => "OVERFLOW",
        }
    }
}
