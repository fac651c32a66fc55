//! Arbitrary-precision decimal backend built on `bigdecimal`.
//!
//! Only available with the `bigdecimal` feature; without it the backend
//! reports itself unsupported and every operation fails.

use std::cmp::Ordering;

use coinage_shared::{BackendKind, MoneyResult, RoundingMode};

use super::Calculator;
use super::number::Number;

/// Fractional digits kept by `divide` before the sticky digit.
#[cfg_attr(not(feature = "bigdecimal"), allow(dead_code))]
const DIVISION_DIGITS: i64 = 32;

/// Backend over `bigdecimal::BigDecimal`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecimalCalculator;

#[cfg(feature = "bigdecimal")]
mod imp {
    use std::str::FromStr;

    use bigdecimal::{BigDecimal, RoundingMode as Mode};
    use num_bigint::{BigInt, Sign};
    use coinage_shared::{MoneyError, MoneyResult, RoundingMode};

    use super::{DIVISION_DIGITS, Number};

    pub(super) fn parse(number: &Number) -> MoneyResult<BigDecimal> {
        BigDecimal::from_str(&number.to_string())
            .map_err(|err| MoneyError::InvalidArgument(format!("{number}: {err}")))
    }

    pub(super) fn to_number(value: &BigDecimal) -> MoneyResult<Number> {
        value.to_plain_string().parse()
    }

    fn unit(sign: Sign, scale: i64) -> BigDecimal {
        let digit = if sign == Sign::Minus { -1 } else { 1 };
        BigDecimal::new(BigInt::from(digit), scale)
    }

    pub(super) fn divide(a: &BigDecimal, b: &BigDecimal) -> MoneyResult<BigDecimal> {
        if b.sign() == Sign::NoSign {
            return Err(MoneyError::DivisionByZero);
        }
        let sign = if (a.sign() == Sign::Minus) == (b.sign() == Sign::Minus) {
            Sign::Plus
        } else {
            Sign::Minus
        };

        let mut quotient = (a / b).with_scale_round(DIVISION_DIGITS, Mode::Down);
        // `/` rounds at its own precision and may land one unit too far out
        if (&quotient * b).abs() > a.abs() {
            quotient -= unit(sign, DIVISION_DIGITS);
        }
        if &quotient * b != *a {
            quotient += unit(sign, DIVISION_DIGITS + 1);
        }
        Ok(quotient)
    }

    pub(super) fn round(value: &BigDecimal, mode: RoundingMode) -> BigDecimal {
        match mode {
            RoundingMode::HalfUp => value.with_scale_round(0, Mode::HalfUp),
            RoundingMode::HalfDown => value.with_scale_round(0, Mode::HalfDown),
            RoundingMode::HalfEven => value.with_scale_round(0, Mode::HalfEven),
            RoundingMode::HalfOdd => {
                let truncated = value.with_scale_round(0, Mode::Down);
                let fraction = (value - &truncated).abs();
                let half = BigDecimal::new(BigInt::from(5), 1);
                let away = match fraction.cmp(&half) {
                    std::cmp::Ordering::Less => false,
                    std::cmp::Ordering::Greater => true,
                    std::cmp::Ordering::Equal => {
                        let (digits, _) = truncated.as_bigint_and_exponent();
                        let is_even = (digits % BigInt::from(2)) == BigInt::from(0);
                        mode.tie_goes_away_from_zero(is_even)
                    }
                };
                if away {
                    truncated + unit(value.sign(), 0)
                } else {
                    truncated
                }
            }
        }
    }

    pub(super) fn floor(value: &BigDecimal) -> BigDecimal {
        value.with_scale_round(0, Mode::Floor)
    }

    pub(super) fn ceil(value: &BigDecimal) -> BigDecimal {
        value.with_scale_round(0, Mode::Ceiling)
    }
}

#[cfg(feature = "bigdecimal")]
impl Calculator for DecimalCalculator {
    fn kind(&self) -> BackendKind {
        BackendKind::Decimal
    }

    fn is_supported(&self) -> bool {
        true
    }

    fn compare(&self, a: &Number, b: &Number) -> MoneyResult<Ordering> {
        Ok(imp::parse(a)?.cmp(&imp::parse(b)?))
    }

    fn add(&self, a: &Number, b: &Number) -> MoneyResult<Number> {
        imp::to_number(&(imp::parse(a)? + imp::parse(b)?))
    }

    fn subtract(&self, a: &Number, b: &Number) -> MoneyResult<Number> {
        imp::to_number(&(imp::parse(a)? - imp::parse(b)?))
    }

    fn multiply(&self, amount: &Number, multiplier: &Number) -> MoneyResult<Number> {
        imp::to_number(&(imp::parse(amount)? * imp::parse(multiplier)?))
    }

    fn divide(&self, amount: &Number, divisor: &Number) -> MoneyResult<Number> {
        imp::to_number(&imp::divide(&imp::parse(amount)?, &imp::parse(divisor)?)?)
    }

    fn ceil(&self, number: &Number) -> MoneyResult<Number> {
        imp::to_number(&imp::ceil(&imp::parse(number)?))
    }

    fn floor(&self, number: &Number) -> MoneyResult<Number> {
        imp::to_number(&imp::floor(&imp::parse(number)?))
    }

    fn absolute(&self, number: &Number) -> MoneyResult<Number> {
        imp::to_number(&imp::parse(number)?.abs())
    }

    fn round(&self, number: &Number, mode: RoundingMode) -> MoneyResult<Number> {
        imp::to_number(&imp::round(&imp::parse(number)?, mode))
    }
}

#[cfg(not(feature = "bigdecimal"))]
impl Calculator for DecimalCalculator {
    fn kind(&self) -> BackendKind {
        BackendKind::Decimal
    }

    fn is_supported(&self) -> bool {
        false
    }

    fn compare(&self, _: &Number, _: &Number) -> MoneyResult<Ordering> {
        Err(coinage_shared::MoneyError::NoSupportedBackend)
    }

    fn add(&self, _: &Number, _: &Number) -> MoneyResult<Number> {
        Err(coinage_shared::MoneyError::NoSupportedBackend)
    }

    fn subtract(&self, _: &Number, _: &Number) -> MoneyResult<Number> {
        Err(coinage_shared::MoneyError::NoSupportedBackend)
    }

    fn multiply(&self, _: &Number, _: &Number) -> MoneyResult<Number> {
        Err(coinage_shared::MoneyError::NoSupportedBackend)
    }

    fn divide(&self, _: &Number, _: &Number) -> MoneyResult<Number> {
        Err(coinage_shared::MoneyError::NoSupportedBackend)
    }

    fn ceil(&self, _: &Number) -> MoneyResult<Number> {
        Err(coinage_shared::MoneyError::NoSupportedBackend)
    }

    fn floor(&self, _: &Number) -> MoneyResult<Number> {
        Err(coinage_shared::MoneyError::NoSupportedBackend)
    }

    fn absolute(&self, _: &Number) -> MoneyResult<Number> {
        Err(coinage_shared::MoneyError::NoSupportedBackend)
    }

    fn round(&self, _: &Number, _: RoundingMode) -> MoneyResult<Number> {
        Err(coinage_shared::MoneyError::NoSupportedBackend)
    }
}

#[cfg(all(test, feature = "bigdecimal"))]
mod tests {
    use super::*;
    use coinage_shared::MoneyError;
    use rstest::rstest;

    fn n(s: &str) -> Number {
        s.parse().unwrap()
    }

    #[rstest]
    #[case("12.5", RoundingMode::HalfUp, "13")]
    #[case("12.5", RoundingMode::HalfDown, "12")]
    #[case("12.5", RoundingMode::HalfEven, "12")]
    #[case("12.5", RoundingMode::HalfOdd, "13")]
    #[case("13.5", RoundingMode::HalfOdd, "13")]
    #[case("-13.5", RoundingMode::HalfOdd, "-13")]
    #[case("-12.5", RoundingMode::HalfOdd, "-13")]
    #[case("-12.6", RoundingMode::HalfOdd, "-13")]
    fn test_round(#[case] value: &str, #[case] mode: RoundingMode, #[case] expected: &str) {
        assert_eq!(DecimalCalculator.round(&n(value), mode).unwrap(), n(expected));
    }

    #[test]
    fn test_divide_exact_and_sticky() {
        assert_eq!(DecimalCalculator.divide(&n("10"), &n("4")).unwrap(), n("2.5"));
        let third = DecimalCalculator.divide(&n("1"), &n("3")).unwrap();
        assert_eq!(third.fractional_part().len(), 33);
        assert!(third.fractional_part().ends_with("31"));
        let negative = DecimalCalculator.divide(&n("-2"), &n("3")).unwrap();
        assert!(negative.is_negative());
        assert!(negative.fractional_part().ends_with("61"));
    }

    #[test]
    fn test_divide_by_zero() {
        assert_eq!(
            DecimalCalculator.divide(&n("5"), &n("0")).unwrap_err(),
            MoneyError::DivisionByZero
        );
    }

    #[test]
    fn test_floor_ceil_absolute() {
        assert_eq!(DecimalCalculator.floor(&n("-0.1")).unwrap(), n("-1"));
        assert_eq!(DecimalCalculator.ceil(&n("0.1")).unwrap(), n("1"));
        assert_eq!(DecimalCalculator.absolute(&n("-7.25")).unwrap(), n("7.25"));
        assert_eq!(DecimalCalculator.floor(&n("0")).unwrap(), n("0"));
    }
}
