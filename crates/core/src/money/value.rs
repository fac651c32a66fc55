//! The `Money` value type.
//!
//! CRITICAL: amounts are integers of minor units. Every numeric step goes
//! through the [`Engine`]; nothing here touches floating point.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use coinage_shared::{MoneyError, MoneyResult, RoundingMode};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};

use super::operand::IntoOperand;
use crate::calculator::{Calculator, Engine, Number};
use crate::currency::Currency;

/// Precision used by [`Money::new`].
pub const DEFAULT_PRECISION: u32 = 2;

/// An exact amount of one currency.
///
/// `amount` counts units of `10^-precision`, so 12.50 USD at precision 2 is
/// `1250`. Values are immutable; every operation returns a new `Money`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "MoneyRepr", try_from = "MoneyRepr")]
pub struct Money {
    amount: BigInt,
    currency: Currency,
    precision: u32,
    engine: &'static Engine,
}

impl Money {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates money from minor units at the default precision of 2.
    #[must_use]
    pub fn new(amount: impl Into<BigInt>, currency: Currency) -> Self {
        Self::with_precision(amount, currency, DEFAULT_PRECISION)
    }

    /// Creates money from units of `10^-precision`.
    #[must_use]
    pub fn with_precision(amount: impl Into<BigInt>, currency: Currency, precision: u32) -> Self {
        Self {
            amount: amount.into(),
            currency,
            precision,
            engine: Engine::global(),
        }
    }

    /// Returns the same value computed by another engine.
    #[must_use]
    pub fn with_engine(mut self, engine: &'static Engine) -> Self {
        self.engine = engine;
        self
    }

    /// Zero of a currency.
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Creates money from minor units and a currency code, e.g.
    /// `Money::of(500, "USD")`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `code` is not a currency code.
    pub fn of(amount: impl Into<BigInt>, code: &str) -> MoneyResult<Self> {
        Ok(Self::new(amount, Currency::from_str(code)?))
    }

    /// Creates money from a decimal string such as `"12.345"`.
    ///
    /// Digits beyond `precision` are truncated toward zero.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `value` is not a plain decimal number.
    pub fn from_decimal(value: &str, currency: Currency, precision: u32) -> MoneyResult<Self> {
        let engine = Engine::global();
        let number = Number::from_str(value.trim())?;
        let scaled = engine.multiply(&number, &Number::pow10(precision))?;
        let amount = truncate(engine, &scaled)?.to_bigint()?;
        Ok(Self {
            amount,
            currency,
            precision,
            engine,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Amount in units of `10^-precision`.
    #[must_use]
    pub const fn amount(&self) -> &BigInt {
        &self.amount
    }

    /// The currency.
    #[must_use]
    pub const fn currency(&self) -> &Currency {
        &self.currency
    }

    /// Number of fractional digits the amount carries.
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// The engine doing this value's arithmetic.
    #[must_use]
    pub const fn engine(&self) -> &'static Engine {
        self.engine
    }

    /// The value as a decimal number, e.g. `12.5` for `1250` at precision 2.
    #[must_use]
    pub fn to_number(&self) -> Number {
        Number::from_minor_units(&self.amount, self.precision)
    }

    /// Renders the value with exactly `precision` fractional digits.
    #[must_use]
    pub fn to_decimal(&self) -> String {
        self.to_number().to_fixed(self.precision)
    }

    fn derive(&self, amount: BigInt) -> Self {
        Self {
            amount,
            currency: self.currency.clone(),
            precision: self.precision,
            engine: self.engine,
        }
    }

    fn units(&self) -> Number {
        Number::from(&self.amount)
    }

    // =========================================================================
    // Currency checks
    // =========================================================================

    /// Returns true if both values share a currency.
    #[must_use]
    pub fn is_same_currency(&self, other: &Self) -> bool {
        self.currency == other.currency
    }

    fn ensure_same_currency(&self, other: &Self) -> MoneyResult<()> {
        if self.is_same_currency(other) {
            Ok(())
        } else {
            Err(MoneyError::currency_mismatch(
                self.currency.code(),
                other.currency.code(),
            ))
        }
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    /// `self + other`, at `self`'s precision.
    ///
    /// # Errors
    ///
    /// `CurrencyMismatch` for different currencies, `Overflow` if the engine
    /// cannot hold the result.
    pub fn add(&self, other: &Self) -> MoneyResult<Self> {
        self.ensure_same_currency(other)?;
        let other = other.to_precision(self.precision)?;
        let sum = self.engine.add(&self.units(), &other.units())?;
        Ok(self.derive(sum.to_bigint()?))
    }

    /// `self - other`, at `self`'s precision.
    ///
    /// # Errors
    ///
    /// `CurrencyMismatch` for different currencies, `Overflow` if the engine
    /// cannot hold the result.
    pub fn subtract(&self, other: &Self) -> MoneyResult<Self> {
        self.ensure_same_currency(other)?;
        let other = other.to_precision(self.precision)?;
        let difference = self.engine.subtract(&self.units(), &other.units())?;
        Ok(self.derive(difference.to_bigint()?))
    }

    /// `round(amount * multiplier, mode)`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a non-finite or malformed multiplier.
    pub fn multiply(&self, multiplier: impl IntoOperand, mode: RoundingMode) -> MoneyResult<Self> {
        let multiplier = multiplier.into_operand()?;
        let product = self.engine.multiply(&self.units(), multiplier.number())?;
        let rounded = self.engine.round(&product, mode)?;
        Ok(self.derive(rounded.to_bigint()?))
    }

    /// `round(amount / divisor, mode)`.
    ///
    /// # Errors
    ///
    /// `DivisionByZero` for a zero divisor (`-0.0` included), `InvalidArgument`
    /// for a non-finite or malformed one.
    pub fn divide(&self, divisor: impl IntoOperand, mode: RoundingMode) -> MoneyResult<Self> {
        let divisor = divisor.into_operand()?;
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        let quotient = self.engine.divide(&self.units(), divisor.number())?;
        let rounded = self.engine.round(&quotient, mode)?;
        Ok(self.derive(rounded.to_bigint()?))
    }

    /// Rescales to another precision.
    ///
    /// Raising the precision is lossless; lowering it truncates toward zero.
    ///
    /// # Errors
    ///
    /// `Overflow` if the engine cannot hold the rescaled amount.
    pub fn to_precision(&self, precision: u32) -> MoneyResult<Self> {
        if precision == self.precision {
            return Ok(self.clone());
        }
        let scaled = self
            .engine
            .multiply(&self.to_number(), &Number::pow10(precision))?;
        let amount = truncate(self.engine, &scaled)?.to_bigint()?;
        Ok(Self {
            amount,
            currency: self.currency.clone(),
            precision,
            engine: self.engine,
        })
    }

    /// The additive inverse.
    #[must_use]
    pub fn negative(&self) -> Self {
        self.derive(-&self.amount)
    }

    /// The absolute value.
    #[must_use]
    pub fn absolute(&self) -> Self {
        self.derive(self.amount.abs())
    }

    /// Adds up values of one currency, at the first value's precision.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty input, `CurrencyMismatch` if currencies
    /// differ.
    pub fn sum<'a>(values: impl IntoIterator<Item = &'a Self>) -> MoneyResult<Self> {
        let mut values = values.into_iter();
        let first = values
            .next()
            .ok_or_else(|| MoneyError::InvalidArgument("cannot sum zero values".to_string()))?;
        values.try_fold(first.clone(), |total, value| total.add(value))
    }

    /// The smallest of several values of one currency.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty input, `CurrencyMismatch` if currencies
    /// differ.
    pub fn min<'a>(values: impl IntoIterator<Item = &'a Self>) -> MoneyResult<Self> {
        Self::extreme(values, Ordering::Less)
    }

    /// The largest of several values of one currency.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty input, `CurrencyMismatch` if currencies
    /// differ.
    pub fn max<'a>(values: impl IntoIterator<Item = &'a Self>) -> MoneyResult<Self> {
        Self::extreme(values, Ordering::Greater)
    }

    fn extreme<'a>(
        values: impl IntoIterator<Item = &'a Self>,
        wanted: Ordering,
    ) -> MoneyResult<Self> {
        let mut values = values.into_iter();
        let first = values
            .next()
            .ok_or_else(|| MoneyError::InvalidArgument("no values to compare".to_string()))?;
        let best = values.try_fold(first, |best, value| {
            Ok::<_, MoneyError>(if value.compare(best)? == wanted {
                value
            } else {
                best
            })
        })?;
        Ok(best.clone())
    }

    // =========================================================================
    // Comparison
    // =========================================================================

    /// Orders two values of one currency.
    ///
    /// Both sides are compared at the larger of their precisions, so the
    /// result does not depend on operand order.
    ///
    /// # Errors
    ///
    /// `CurrencyMismatch` for different currencies.
    pub fn compare(&self, other: &Self) -> MoneyResult<Ordering> {
        self.ensure_same_currency(other)?;
        let precision = self.precision.max(other.precision);
        let left = self.to_precision(precision)?;
        let right = other.to_precision(precision)?;
        self.engine.compare(&left.units(), &right.units())
    }

    /// Returns true for the same currency and value. Never fails.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        matches!(self.compare(other), Ok(Ordering::Equal))
    }

    /// `self > other`.
    ///
    /// # Errors
    ///
    /// `CurrencyMismatch` for different currencies.
    pub fn greater_than(&self, other: &Self) -> MoneyResult<bool> {
        Ok(self.compare(other)?.is_gt())
    }

    /// `self >= other`.
    ///
    /// # Errors
    ///
    /// `CurrencyMismatch` for different currencies.
    pub fn greater_than_or_equal(&self, other: &Self) -> MoneyResult<bool> {
        Ok(self.compare(other)?.is_ge())
    }

    /// `self < other`.
    ///
    /// # Errors
    ///
    /// `CurrencyMismatch` for different currencies.
    pub fn less_than(&self, other: &Self) -> MoneyResult<bool> {
        Ok(self.compare(other)?.is_lt())
    }

    /// `self <= other`.
    ///
    /// # Errors
    ///
    /// `CurrencyMismatch` for different currencies.
    pub fn less_than_or_equal(&self, other: &Self) -> MoneyResult<bool> {
        Ok(self.compare(other)?.is_le())
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount.is_positive()
    }

    /// Returns true if the amount is strictly negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_negative()
    }
}

/// Drops the fractional part, rounding toward zero.
fn truncate(engine: &Engine, number: &Number) -> MoneyResult<Number> {
    if number.is_negative() {
        engine.ceil(number)
    } else {
        engine.floor(number)
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl PartialOrd for Money {
    /// `None` across currencies.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_decimal(), self.currency)
    }
}

/// Wire form: `{"amount": "1250", "currency": "USD", "precision": 2}`.
#[derive(Serialize, Deserialize)]
struct MoneyRepr {
    amount: String,
    currency: Currency,
    #[serde(default = "default_precision")]
    precision: u32,
}

const fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

impl From<Money> for MoneyRepr {
    fn from(money: Money) -> Self {
        Self {
            amount: money.amount.to_string(),
            currency: money.currency,
            precision: money.precision,
        }
    }
}

impl TryFrom<MoneyRepr> for Money {
    type Error = MoneyError;

    fn try_from(repr: MoneyRepr) -> Result<Self, Self::Error> {
        let amount = BigInt::from_str(&repr.amount).map_err(|_| {
            MoneyError::InvalidArgument(format!("'{}' is not an integer amount", repr.amount))
        })?;
        Ok(Self::with_precision(amount, repr.currency, repr.precision))
    }
}
