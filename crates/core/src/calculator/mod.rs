//! Pluggable arbitrary-precision arithmetic.
//!
//! `Money` never does numeric work itself: it hands `Number`s to an
//! [`Engine`], a closed set of interchangeable backends that all produce the
//! same observable results:
//!
//! - `BigInteger` - scaled `num_bigint::BigInt`, unbounded
//! - `Decimal` - `bigdecimal::BigDecimal`, behind the `bigdecimal` feature
//! - `Native` - scaled `i128`, bounded and overflow-checked
//!
//! The process-wide engine is picked once, by trying backends in
//! [`BackendKind::PREFERENCE`] order and keeping the first supported one.

pub mod decimal;
pub mod number;
pub mod scaled;

#[cfg(test)]
mod props;

use std::cmp::Ordering;

use coinage_shared::{BackendKind, EngineConfig, MoneyError, MoneyResult, RoundingMode};
use once_cell::sync::OnceCell;
use tracing::{debug, warn};

pub use decimal::DecimalCalculator;
pub use number::Number;
pub use scaled::{BigIntCalculator, NativeCalculator, ScaledCalculator};

/// Big-number operations every backend provides.
pub trait Calculator {
    /// Which backend this is.
    fn kind(&self) -> BackendKind;

    /// Whether the backend can run in this build.
    fn is_supported(&self) -> bool;

    /// Compares two numbers.
    fn compare(&self, a: &Number, b: &Number) -> MoneyResult<Ordering>;

    /// `a + b`.
    fn add(&self, a: &Number, b: &Number) -> MoneyResult<Number>;

    /// `a - b`.
    fn subtract(&self, a: &Number, b: &Number) -> MoneyResult<Number>;

    /// `amount * multiplier`, exact.
    fn multiply(&self, amount: &Number, multiplier: &Number) -> MoneyResult<Number>;

    /// `amount / divisor`.
    ///
    /// Exact when the quotient terminates within the backend's division
    /// digits; otherwise truncated with one trailing non-zero digit, which
    /// keeps `round`, `floor` and `ceil` of the quotient exact.
    ///
    /// # Errors
    ///
    /// `DivisionByZero` when `divisor` is zero.
    fn divide(&self, amount: &Number, divisor: &Number) -> MoneyResult<Number>;

    /// Smallest integer not below the value.
    fn ceil(&self, number: &Number) -> MoneyResult<Number>;

    /// Largest integer not above the value.
    fn floor(&self, number: &Number) -> MoneyResult<Number>;

    /// Absolute value.
    fn absolute(&self, number: &Number) -> MoneyResult<Number>;

    /// Rounds to an integer, breaking ties with `mode`.
    fn round(&self, number: &Number, mode: RoundingMode) -> MoneyResult<Number>;

    /// `floor(amount * ratio / total)`, one allocation share.
    fn share(&self, amount: &Number, ratio: &Number, total: &Number) -> MoneyResult<Number> {
        let product = self.multiply(amount, ratio)?;
        let quotient = self.divide(&product, total)?;
        self.floor(&quotient)
    }
}

/// The closed set of arithmetic backends.
#[derive(Debug)]
pub enum Engine {
    /// Scaled `BigInt`.
    BigInteger(BigIntCalculator),
    /// `BigDecimal`.
    Decimal(DecimalCalculator),
    /// Scaled `i128`.
    Native(NativeCalculator),
}

/// The big-integer engine.
pub static BIG_INTEGER: Engine = Engine::BigInteger(BigIntCalculator::big_integer());

/// The big-decimal engine.
pub static DECIMAL: Engine = Engine::Decimal(DecimalCalculator);

/// The native `i128` engine.
pub static NATIVE: Engine = Engine::Native(NativeCalculator::native());

static GLOBAL: OnceCell<&'static Engine> = OnceCell::new();

impl Engine {
    /// Returns the static engine for a backend.
    #[must_use]
    pub fn for_kind(kind: BackendKind) -> &'static Self {
        match kind {
            BackendKind::BigInteger => &BIG_INTEGER,
            BackendKind::Decimal => &DECIMAL,
            BackendKind::Native => &NATIVE,
        }
    }

    /// Picks the first supported backend in `preference` order.
    ///
    /// # Errors
    ///
    /// `NoSupportedBackend` when none of them is supported.
    pub fn select(preference: &[BackendKind]) -> MoneyResult<&'static Self> {
        for &kind in preference {
            let engine = Self::for_kind(kind);
            if engine.is_supported() {
                debug!(backend = %kind, "Selected arithmetic backend");
                return Ok(engine);
            }
            debug!(backend = %kind, "Arithmetic backend not supported, trying next");
        }
        Err(MoneyError::NoSupportedBackend)
    }

    /// The process-wide engine, selected on first use.
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| {
            Self::select(&BackendKind::PREFERENCE).unwrap_or_else(|err| {
                warn!(error = %err, "Falling back to the native backend");
                &NATIVE
            })
        })
    }

    /// Pins the process-wide engine from configuration.
    ///
    /// A configured backend that is unsupported is skipped with a warning and
    /// the normal preference order applies.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if a different engine was already selected, or
    /// `NoSupportedBackend` if nothing can run.
    pub fn install(config: &EngineConfig) -> MoneyResult<&'static Self> {
        let mut preference = Vec::with_capacity(BackendKind::PREFERENCE.len() + 1);
        if let Some(kind) = config.backend {
            if !Self::for_kind(kind).is_supported() {
                warn!(backend = %kind, "Configured arithmetic backend is not supported");
            }
            preference.push(kind);
        }
        preference.extend(
            BackendKind::PREFERENCE
                .into_iter()
                .filter(|kind| Some(*kind) != config.backend),
        );

        let wanted = Self::select(&preference)?;
        let installed = *GLOBAL.get_or_init(|| wanted);
        if installed.kind() == wanted.kind() {
            Ok(installed)
        } else {
            Err(MoneyError::InvalidArgument(format!(
                "arithmetic engine already initialized as {}",
                installed.kind()
            )))
        }
    }

    fn calculator(&self) -> &dyn Calculator {
        match self {
            Self::BigInteger(calculator) => calculator,
            Self::Decimal(calculator) => calculator,
            Self::Native(calculator) => calculator,
        }
    }
}

impl Calculator for Engine {
    fn kind(&self) -> BackendKind {
        self.calculator().kind()
    }

    fn is_supported(&self) -> bool {
        self.calculator().is_supported()
    }

    fn compare(&self, a: &Number, b: &Number) -> MoneyResult<Ordering> {
        self.calculator().compare(a, b)
    }

    fn add(&self, a: &Number, b: &Number) -> MoneyResult<Number> {
        self.calculator().add(a, b)
    }

    fn subtract(&self, a: &Number, b: &Number) -> MoneyResult<Number> {
        self.calculator().subtract(a, b)
    }

    fn multiply(&self, amount: &Number, multiplier: &Number) -> MoneyResult<Number> {
        self.calculator().multiply(amount, multiplier)
    }

    fn divide(&self, amount: &Number, divisor: &Number) -> MoneyResult<Number> {
        self.calculator().divide(amount, divisor)
    }

    fn ceil(&self, number: &Number) -> MoneyResult<Number> {
        self.calculator().ceil(number)
    }

    fn floor(&self, number: &Number) -> MoneyResult<Number> {
        self.calculator().floor(number)
    }

    fn absolute(&self, number: &Number) -> MoneyResult<Number> {
        self.calculator().absolute(number)
    }

    fn round(&self, number: &Number, mode: RoundingMode) -> MoneyResult<Number> {
        self.calculator().round(number, mode)
    }

    fn share(&self, amount: &Number, ratio: &Number, total: &Number) -> MoneyResult<Number> {
        self.calculator().share(amount, ratio, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_prefers_first_supported() {
        let engine = Engine::select(&BackendKind::PREFERENCE).unwrap();
        assert_eq!(engine.kind(), BackendKind::BigInteger);

        let engine = Engine::select(&[BackendKind::Native, BackendKind::BigInteger]).unwrap();
        assert_eq!(engine.kind(), BackendKind::Native);
    }

    #[test]
    fn test_select_with_nothing_fails() {
        assert_eq!(
            Engine::select(&[]).unwrap_err(),
            MoneyError::NoSupportedBackend
        );
    }

    #[cfg(not(feature = "bigdecimal"))]
    #[test]
    fn test_decimal_skipped_without_feature() {
        assert!(!DECIMAL.is_supported());
        assert_eq!(
            Engine::select(&[BackendKind::Decimal]).unwrap_err(),
            MoneyError::NoSupportedBackend
        );
    }

    #[test]
    fn test_global_is_stable() {
        let first = Engine::global();
        let second = Engine::global();
        assert!(std::ptr::eq(first, second));
        assert!(first.is_supported());
    }

    #[test]
    fn test_install_agrees_with_global() {
        let current = Engine::global().kind();
        let config = EngineConfig {
            backend: Some(current),
        };
        assert_eq!(Engine::install(&config).unwrap().kind(), current);

        let other = if current == BackendKind::Native {
            BackendKind::BigInteger
        } else {
            BackendKind::Native
        };
        let config = EngineConfig {
            backend: Some(other),
        };
        assert!(matches!(
            Engine::install(&config),
            Err(MoneyError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in BackendKind::PREFERENCE {
            assert_eq!(Engine::for_kind(kind).kind(), kind);
        }
    }
}
