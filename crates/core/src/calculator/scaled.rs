//! Scaled-integer backends.
//!
//! A value is held as `mantissa / 10^scale`. The same algorithm runs over
//! `BigInt` (unbounded) and `i128` (bounded, overflow-checked).

use std::cmp::Ordering;
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

use coinage_shared::{BackendKind, MoneyError, MoneyResult, RoundingMode};
use num_bigint::BigInt;
use num_traits::{CheckedAdd, CheckedMul, CheckedSub, FromPrimitive, Num, Signed};

use super::Calculator;
use super::number::Number;

/// Integer types a scaled decimal can be built on.
pub trait ScaledInt:
    Clone + Ord + Num + Signed + CheckedAdd + CheckedSub + CheckedMul + FromPrimitive + FromStr + Display
{
}

impl<T> ScaledInt for T where
    T: Clone
        + Ord
        + Num
        + Signed
        + CheckedAdd
        + CheckedSub
        + CheckedMul
        + FromPrimitive
        + FromStr
        + Display
{
}

fn overflow(operation: &str) -> MoneyError {
    MoneyError::Overflow(format!("{operation} exceeds the backend range"))
}

fn constant<I: ScaledInt>(value: u8) -> MoneyResult<I> {
    I::from_u8(value).ok_or_else(|| overflow("constant"))
}

fn pow10<I: ScaledInt>(exponent: u32) -> MoneyResult<I> {
    num_traits::checked_pow(constant::<I>(10)?, exponent as usize).ok_or_else(|| overflow("10^n"))
}

#[derive(Debug, Clone)]
struct Scaled<I> {
    mantissa: I,
    scale: u32,
}

impl<I: ScaledInt> Scaled<I> {
    fn parse(number: &Number) -> MoneyResult<Self> {
        let (digits, scale) = number.to_scaled_parts();
        let mantissa = digits
            .parse::<I>()
            .map_err(|_| overflow(&format!("parsing {number}")))?;
        Ok(Self { mantissa, scale })
    }

    const fn integer(mantissa: I) -> Self {
        Self { mantissa, scale: 0 }
    }

    fn to_number(&self) -> Number {
        Number::from_scaled(&self.mantissa.to_string(), self.scale)
    }

    fn mantissa_at(&self, scale: u32) -> MoneyResult<I> {
        debug_assert!(scale >= self.scale);
        self.mantissa
            .checked_mul(&pow10(scale - self.scale)?)
            .ok_or_else(|| overflow("rescale"))
    }

    fn align(&self, other: &Self) -> MoneyResult<(I, I, u32)> {
        let scale = self.scale.max(other.scale);
        Ok((self.mantissa_at(scale)?, other.mantissa_at(scale)?, scale))
    }

    fn add(&self, other: &Self) -> MoneyResult<Self> {
        let (a, b, scale) = self.align(other)?;
        let mantissa = a.checked_add(&b).ok_or_else(|| overflow("add"))?;
        Ok(Self { mantissa, scale })
    }

    fn sub(&self, other: &Self) -> MoneyResult<Self> {
        let (a, b, scale) = self.align(other)?;
        let mantissa = a.checked_sub(&b).ok_or_else(|| overflow("subtract"))?;
        Ok(Self { mantissa, scale })
    }

    fn mul(&self, other: &Self) -> MoneyResult<Self> {
        let mantissa = self
            .mantissa
            .checked_mul(&other.mantissa)
            .ok_or_else(|| overflow("multiply"))?;
        Ok(Self {
            mantissa,
            scale: self.scale + other.scale,
        })
    }

    /// Quotient truncated to `digits` fractional digits; an inexact quotient
    /// gets one extra non-zero digit so ties and floors stay decidable.
    fn div(&self, other: &Self, digits: u32) -> MoneyResult<Self> {
        if other.mantissa.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }

        // (ma / 10^sa) / (mb / 10^sb) = ma * 10^sb / (mb * 10^sa)
        let numerator = self
            .mantissa
            .checked_mul(&pow10(other.scale + digits)?)
            .ok_or_else(|| overflow("divide"))?;
        let denominator = other
            .mantissa
            .checked_mul(&pow10(self.scale)?)
            .ok_or_else(|| overflow("divide"))?;

        let quotient = numerator.clone() / denominator.clone();
        let remainder = numerator.clone() % denominator.clone();
        if remainder.is_zero() {
            return Ok(Self {
                mantissa: quotient,
                scale: digits,
            });
        }

        let sticky = if numerator.is_negative() == denominator.is_negative() {
            I::one()
        } else {
            -I::one()
        };
        let mantissa = quotient
            .checked_mul(&constant(10)?)
            .and_then(|m| m.checked_add(&sticky))
            .ok_or_else(|| overflow("divide"))?;
        Ok(Self {
            mantissa,
            scale: digits + 1,
        })
    }

    /// Integer part truncated toward zero and the remainder, which carries
    /// the sign of the value.
    fn split(&self) -> MoneyResult<(I, I, I)> {
        let unit = pow10::<I>(self.scale)?;
        let truncated = self.mantissa.clone() / unit.clone();
        let remainder = self.mantissa.clone() % unit.clone();
        Ok((truncated, remainder, unit))
    }

    fn round(&self, mode: RoundingMode) -> MoneyResult<Self> {
        if self.scale == 0 {
            return Ok(self.clone());
        }
        let (truncated, remainder, unit) = self.split()?;
        let twice = remainder
            .abs()
            .checked_mul(&constant(2)?)
            .ok_or_else(|| overflow("round"))?;

        let away = match twice.cmp(&unit) {
            Ordering::Less => false,
            Ordering::Greater => true,
            Ordering::Equal => {
                let is_even = (truncated.clone() % constant(2)?).is_zero();
                mode.tie_goes_away_from_zero(is_even)
            }
        };

        if away {
            let step = self.mantissa.signum();
            let mantissa = truncated
                .checked_add(&step)
                .ok_or_else(|| overflow("round"))?;
            Ok(Self::integer(mantissa))
        } else {
            Ok(Self::integer(truncated))
        }
    }

    fn floor(&self) -> MoneyResult<Self> {
        let (truncated, remainder, _) = self.split()?;
        if remainder.is_negative() {
            let mantissa = truncated
                .checked_sub(&I::one())
                .ok_or_else(|| overflow("floor"))?;
            return Ok(Self::integer(mantissa));
        }
        Ok(Self::integer(truncated))
    }

    fn ceil(&self) -> MoneyResult<Self> {
        let (truncated, remainder, _) = self.split()?;
        if remainder.is_positive() {
            let mantissa = truncated
                .checked_add(&I::one())
                .ok_or_else(|| overflow("ceil"))?;
            return Ok(Self::integer(mantissa));
        }
        Ok(Self::integer(truncated))
    }

    fn compare(&self, other: &Self) -> MoneyResult<Ordering> {
        let (a, b, _) = self.align(other)?;
        Ok(a.cmp(&b))
    }
}

/// Calculator over scaled integers of type `I`.
#[derive(Debug)]
pub struct ScaledCalculator<I> {
    kind: BackendKind,
    division_digits: u32,
    _integer: PhantomData<fn() -> I>,
}

/// Unbounded backend built on `num_bigint::BigInt`.
pub type BigIntCalculator = ScaledCalculator<BigInt>;

/// Bounded backend built on `i128`.
pub type NativeCalculator = ScaledCalculator<i128>;

impl ScaledCalculator<BigInt> {
    /// Creates the big-integer backend.
    #[must_use]
    pub const fn big_integer() -> Self {
        Self {
            kind: BackendKind::BigInteger,
            division_digits: 32,
            _integer: PhantomData,
        }
    }
}

impl ScaledCalculator<i128> {
    /// Creates the native backend.
    ///
    /// Fewer division digits keep `10^n` multiplications inside `i128`.
    #[must_use]
    pub const fn native() -> Self {
        Self {
            kind: BackendKind::Native,
            division_digits: 8,
            _integer: PhantomData,
        }
    }
}

impl<I: ScaledInt> ScaledCalculator<I> {
    fn unary(
        number: &Number,
        op: impl FnOnce(&Scaled<I>) -> MoneyResult<Scaled<I>>,
    ) -> MoneyResult<Number> {
        Ok(op(&Scaled::parse(number)?)?.to_number())
    }

    fn binary(
        a: &Number,
        b: &Number,
        op: impl FnOnce(&Scaled<I>, &Scaled<I>) -> MoneyResult<Scaled<I>>,
    ) -> MoneyResult<Number> {
        Ok(op(&Scaled::parse(a)?, &Scaled::parse(b)?)?.to_number())
    }
}

impl<I: ScaledInt> Calculator for ScaledCalculator<I> {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn is_supported(&self) -> bool {
        true
    }

    fn compare(&self, a: &Number, b: &Number) -> MoneyResult<Ordering> {
        Scaled::<I>::parse(a)?.compare(&Scaled::parse(b)?)
    }

    fn add(&self, a: &Number, b: &Number) -> MoneyResult<Number> {
        Self::binary(a, b, Scaled::add)
    }

    fn subtract(&self, a: &Number, b: &Number) -> MoneyResult<Number> {
        Self::binary(a, b, Scaled::sub)
    }

    fn multiply(&self, amount: &Number, multiplier: &Number) -> MoneyResult<Number> {
        Self::binary(amount, multiplier, Scaled::mul)
    }

    fn divide(&self, amount: &Number, divisor: &Number) -> MoneyResult<Number> {
        let digits = self.division_digits;
        Self::binary(amount, divisor, |a, b| a.div(b, digits))
    }

    fn ceil(&self, number: &Number) -> MoneyResult<Number> {
        Self::unary(number, Scaled::ceil)
    }

    fn floor(&self, number: &Number) -> MoneyResult<Number> {
        Self::unary(number, Scaled::floor)
    }

    fn absolute(&self, number: &Number) -> MoneyResult<Number> {
        Self::unary(number, |n| {
            Ok(Scaled {
                mantissa: n.mantissa.abs(),
                scale: n.scale,
            })
        })
    }

    fn round(&self, number: &Number, mode: RoundingMode) -> MoneyResult<Number> {
        Self::unary(number, |n| n.round(mode))
    }
}
