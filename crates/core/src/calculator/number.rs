//! Backend-neutral decimal numbers.
//!
//! Every calculator backend reads and writes `Number`s, so swapping the
//! backend never changes an observable value.

use std::fmt;
use std::str::FromStr;

use coinage_shared::{MoneyError, MoneyResult};
use num_bigint::BigInt;
use rust_decimal::Decimal;

/// An exact decimal in canonical form.
///
/// Canonical means: no leading zeros in the integer part, no trailing zeros
/// in the fraction, and zero is never negative. Two `Number`s are equal iff
/// they denote the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Number {
    negative: bool,
    integer: String,
    fraction: String,
}

impl Number {
    /// Builds a number from pre-validated ASCII digit runs.
    fn from_parts(negative: bool, integer: &str, fraction: &str) -> Self {
        let integer = integer.trim_start_matches('0');
        let fraction = fraction.trim_end_matches('0');
        let integer = if integer.is_empty() { "0" } else { integer };
        let is_zero = integer == "0" && fraction.is_empty();

        Self {
            negative: negative && !is_zero,
            integer: integer.to_string(),
            fraction: fraction.to_string(),
        }
    }

    /// Builds a number from a signed integer digit string and a scale, so
    /// that the value is `digits / 10^scale`.
    ///
    /// `digits` must be what `Display` produces for an integer type.
    pub(crate) fn from_scaled(digits: &str, scale: u32) -> Self {
        let (negative, digits) = match digits.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, digits),
        };
        let scale = scale as usize;

        if digits.len() > scale {
            let (integer, fraction) = digits.split_at(digits.len() - scale);
            Self::from_parts(negative, integer, fraction)
        } else {
            let padded = format!("{digits:0>scale$}");
            Self::from_parts(negative, "0", &padded)
        }
    }

    /// Interprets an integer amount of minor units at the given precision.
    #[must_use]
    pub fn from_minor_units(amount: &BigInt, precision: u32) -> Self {
        Self::from_scaled(&amount.to_string(), precision)
    }

    /// `10^exponent`.
    #[must_use]
    pub fn pow10(exponent: u32) -> Self {
        Self::from_parts(false, &format!("1{}", "0".repeat(exponent as usize)), "")
    }

    /// Zero.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_parts(false, "0", "")
    }

    /// One.
    #[must_use]
    pub fn one() -> Self {
        Self::from_parts(false, "1", "")
    }

    /// Returns true if the value is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.integer == "0" && self.fraction.is_empty()
    }

    /// Returns true if the value is strictly negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    /// Returns true if the value has no fractional part.
    #[must_use]
    pub fn is_integer(&self) -> bool {
        self.fraction.is_empty()
    }

    /// Integer digits, without sign.
    #[must_use]
    pub fn integer_part(&self) -> &str {
        &self.integer
    }

    /// Fractional digits, without trailing zeros.
    #[must_use]
    pub fn fractional_part(&self) -> &str {
        &self.fraction
    }

    /// Number of fractional digits.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn scale(&self) -> u32 {
        self.fraction.len() as u32
    }

    /// Returns the value with its sign flipped.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self::from_parts(!self.negative, &self.integer, &self.fraction)
    }

    /// Moves the decimal point: `value * 10^exponent`, always exact.
    #[must_use]
    pub fn scale_by_power_of_ten(&self, exponent: i64) -> Self {
        let (mantissa, scale) = self.to_scaled_parts();
        let scale = i64::from(scale) - exponent;
        match u32::try_from(scale) {
            Ok(scale) => Self::from_scaled(&mantissa, scale),
            Err(_) if scale < 0 => {
                let zeros = usize::try_from(scale.unsigned_abs()).unwrap_or(usize::MAX);
                Self::from_scaled(&format!("{mantissa}{}", "0".repeat(zeros)), 0)
            }
            // more than u32::MAX fractional digits
            Err(_) => Self::zero(),
        }
    }

    /// Splits the value into a signed mantissa digit string and its scale.
    pub(crate) fn to_scaled_parts(&self) -> (String, u32) {
        let sign = if self.negative { "-" } else { "" };
        let mantissa = format!("{sign}{}{}", self.integer, self.fraction);
        (mantissa, self.scale())
    }

    /// Converts an integer-valued number to a `BigInt`.
    pub fn to_bigint(&self) -> MoneyResult<BigInt> {
        if !self.is_integer() {
            return Err(MoneyError::InvalidArgument(format!(
                "{self} is not an integer value"
            )));
        }
        BigInt::from_str(&self.to_string())
            .map_err(|err| MoneyError::InvalidArgument(format!("{self}: {err}")))
    }

    /// Renders the value with exactly `digits` fractional digits.
    ///
    /// Extra fractional digits are cut off, missing ones are zero-padded.
    #[must_use]
    pub fn to_fixed(&self, digits: u32) -> String {
        let sign = if self.negative { "-" } else { "" };
        let digits = digits as usize;
        if digits == 0 {
            return format!("{sign}{}", self.integer);
        }
        let fraction: String = self
            .fraction
            .chars()
            .chain(std::iter::repeat('0'))
            .take(digits)
            .collect();
        format!("{sign}{}.{fraction}", self.integer)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "{}", self.integer)?;
        if !self.fraction.is_empty() {
            write!(f, ".{}", self.fraction)?;
        }
        Ok(())
    }
}

impl FromStr for Number {
    type Err = MoneyError;

    /// Accepts `[+-]?\d+(\.\d+)?`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MoneyError::InvalidArgument(format!("'{s}' is not a decimal number"));

        let (negative, unsigned) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };
        let (integer, fraction) = match unsigned.split_once('.') {
            Some((integer, fraction)) if !fraction.is_empty() => (integer, fraction),
            Some(_) => return Err(invalid()),
            None => (unsigned, ""),
        };
        if integer.is_empty()
            || !integer.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        Ok(Self::from_parts(negative, integer, fraction))
    }
}

impl From<&BigInt> for Number {
    fn from(value: &BigInt) -> Self {
        Self::from_scaled(&value.to_string(), 0)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Self::from_scaled(&value.to_string(), 0)
    }
}

impl From<Decimal> for Number {
    fn from(value: Decimal) -> Self {
        Self::from_scaled(&value.mantissa().to_string(), value.scale())
    }
}
