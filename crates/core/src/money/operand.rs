//! Numeric operands for multiplication, division and allocation.

use coinage_shared::{MoneyError, MoneyResult};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::calculator::Number;

/// A validated, finite numeric operand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand(Number);

impl Operand {
    /// The operand as a backend-neutral number.
    #[must_use]
    pub const fn number(&self) -> &Number {
        &self.0
    }

    /// Returns true if the operand is zero, `-0.0` included.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns true if the operand is strictly negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.0.is_negative()
    }
}

impl From<Number> for Operand {
    fn from(number: Number) -> Self {
        Self(number)
    }
}

/// Anything usable as an [`Operand`].
///
/// Integers and `Decimal` always convert. Floats convert when finite and
/// strings when they are plain decimals like `-1.25`.
pub trait IntoOperand {
    /// Converts into an operand.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for NaN, infinities and malformed strings.
    fn into_operand(self) -> MoneyResult<Operand>;
}

impl IntoOperand for Operand {
    fn into_operand(self) -> MoneyResult<Operand> {
        Ok(self)
    }
}

impl IntoOperand for &Operand {
    fn into_operand(self) -> MoneyResult<Operand> {
        Ok(self.clone())
    }
}

impl IntoOperand for Number {
    fn into_operand(self) -> MoneyResult<Operand> {
        Ok(Operand(self))
    }
}

impl IntoOperand for Decimal {
    fn into_operand(self) -> MoneyResult<Operand> {
        Ok(Operand(Number::from(self)))
    }
}

impl IntoOperand for &Decimal {
    fn into_operand(self) -> MoneyResult<Operand> {
        (*self).into_operand()
    }
}

impl IntoOperand for f64 {
    fn into_operand(self) -> MoneyResult<Operand> {
        if !self.is_finite() {
            return Err(MoneyError::InvalidArgument(format!(
                "operand must be a finite number, got {self}"
            )));
        }
        Decimal::from_f64(self)
            .ok_or_else(|| MoneyError::InvalidArgument(format!("operand {self} is out of range")))?
            .into_operand()
    }
}

impl IntoOperand for &str {
    fn into_operand(self) -> MoneyResult<Operand> {
        Ok(Operand(self.trim().parse()?))
    }
}

macro_rules! integer_operand {
    ($($ty:ty),*) => {
        $(
            impl IntoOperand for $ty {
                fn into_operand(self) -> MoneyResult<Operand> {
                    Ok(Operand(Number::from_scaled(&self.to_string(), 0)))
                }
            }
        )*
    };
}

integer_operand!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
