//! Proportional allocation of money.
//!
//! Every share is `floor(amount * ratio / total)`, which never overshoots,
//! so the leftover is non-negative and smaller than the number of ratios.
//! Leftover minor units are then handed out one at a time, in input order,
//! whatever the ratio of the receiving part.
//!
//! The sum of the parts always equals the original amount exactly.

use coinage_shared::{MoneyError, MoneyResult};
use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

use super::operand::{IntoOperand, Operand};
use super::value::Money;
use crate::calculator::{Calculator, Number};

impl Money {
    /// Splits the value by `ratios`.
    ///
    /// With `precision` set, the value is rescaled first and the parts carry
    /// that precision.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for no ratios, a negative ratio or a zero total.
    ///
    /// # Example
    ///
    /// ```
    /// use coinage_core::{Currency, Money};
    ///
    /// let parts = Money::new(100, Currency::new("USD"))
    ///     .allocate([1, 1, 1], None)
    ///     .unwrap();
    /// let amounts: Vec<i64> = parts.iter().map(|m| m.amount().try_into().unwrap()).collect();
    /// assert_eq!(amounts, [34, 33, 33]);
    /// ```
    pub fn allocate<R: IntoOperand>(
        &self,
        ratios: impl IntoIterator<Item = R>,
        precision: Option<u32>,
    ) -> MoneyResult<Vec<Self>> {
        let ratios = ratios
            .into_iter()
            .map(IntoOperand::into_operand)
            .collect::<MoneyResult<Vec<_>>>()?;
        self.allocate_operands(&ratios, precision)
    }

    /// Splits the value by keyed ratios, keeping each key with its part.
    ///
    /// # Errors
    ///
    /// Same as [`Money::allocate`].
    pub fn allocate_keyed<K, R: IntoOperand>(
        &self,
        ratios: impl IntoIterator<Item = (K, R)>,
        precision: Option<u32>,
    ) -> MoneyResult<Vec<(K, Self)>> {
        let (keys, ratios): (Vec<K>, Vec<R>) = ratios.into_iter().unzip();
        let parts = self.allocate(ratios, precision)?;
        Ok(keys.into_iter().zip(parts).collect())
    }

    /// Splits the value into `parts` equal shares.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `parts` is zero.
    pub fn allocate_to(&self, parts: usize) -> MoneyResult<Vec<Self>> {
        if parts == 0 {
            return Err(MoneyError::InvalidArgument(
                "cannot allocate to zero parts".to_string(),
            ));
        }
        self.allocate(std::iter::repeat_n(1u8, parts), None)
    }

    fn allocate_operands(
        &self,
        ratios: &[Operand],
        precision: Option<u32>,
    ) -> MoneyResult<Vec<Self>> {
        if ratios.is_empty() {
            return Err(MoneyError::InvalidArgument(
                "cannot allocate to none, ratios cannot be empty".to_string(),
            ));
        }
        if ratios.iter().any(Operand::is_negative) {
            return Err(MoneyError::InvalidArgument(
                "cannot allocate to a negative ratio".to_string(),
            ));
        }

        let source = match precision {
            Some(precision) => self.to_precision(precision)?,
            None => self.clone(),
        };
        let engine = source.engine();

        let total = ratios
            .iter()
            .try_fold(Number::zero(), |sum, ratio| engine.add(&sum, ratio.number()))?;
        if total.is_zero() {
            return Err(MoneyError::InvalidArgument(
                "sum of ratios must be greater than zero".to_string(),
            ));
        }

        let amount = Number::from(source.amount());
        let mut shares = ratios
            .iter()
            .map(|ratio| engine.share(&amount, ratio.number(), &total)?.to_bigint())
            .collect::<MoneyResult<Vec<BigInt>>>()?;

        let allocated = shares.iter().fold(BigInt::zero(), |sum, share| sum + share);
        let mut remainder = source.amount() - allocated;
        debug_assert!(!remainder.is_negative());

        for share in &mut shares {
            if !remainder.is_positive() {
                break;
            }
            *share += BigInt::one();
            remainder -= BigInt::one();
        }

        Ok(shares
            .into_iter()
            .map(|share| {
                Self::with_precision(share, source.currency().clone(), source.precision())
                    .with_engine(engine)
            })
            .collect())
    }
}
