//! Currency conversion.
//!
//! CRITICAL: Rounding strategy for multi-currency:
//! - Always round to the counter currency's subunit digits
//! - The caller picks the rounding mode; nothing rounds implicitly

use coinage_shared::{MoneyError, MoneyResult, RoundingMode};
use tracing::debug;

use super::{CurrencyPair, Exchange};
use crate::calculator::{Calculator, Number};
use crate::currency::{Currencies, Currency};
use crate::money::Money;

/// Converts money between currencies.
///
/// The result is expressed at the counter currency's subunit precision, as
/// reported by the repository.
#[derive(Debug, Clone)]
pub struct Converter<C, E> {
    currencies: C,
    exchange: E,
}

impl<C: Currencies, E: Exchange> Converter<C, E> {
    /// Creates a converter reading subunits from `currencies` and rates from
    /// `exchange`.
    pub const fn new(currencies: C, exchange: E) -> Self {
        Self {
            currencies,
            exchange,
        }
    }

    /// Converts `money` into `counter` at the exchange's current quote.
    ///
    /// # Errors
    ///
    /// `UnresolvablePair` if no quote exists, `UnknownCurrency` if the
    /// repository does not know the counter currency.
    pub fn convert(
        &self,
        money: &Money,
        counter: &Currency,
        mode: RoundingMode,
    ) -> MoneyResult<Money> {
        Ok(self.convert_and_return_pair(money, counter, mode)?.0)
    }

    /// Like [`Converter::convert`], also returning the quote used.
    ///
    /// # Errors
    ///
    /// Same as [`Converter::convert`].
    pub fn convert_and_return_pair(
        &self,
        money: &Money,
        counter: &Currency,
        mode: RoundingMode,
    ) -> MoneyResult<(Money, CurrencyPair)> {
        let pair = self.exchange.quote(money.currency(), counter)?;
        let converted = self.convert_against_pair(money, &pair, mode)?;
        Ok((converted, pair))
    }

    /// Converts `money` through a known quote.
    ///
    /// `money` is read at its own precision, so an amount of 100 at
    /// precision 2 is one unit of the base currency.
    ///
    /// # Errors
    ///
    /// `CurrencyMismatch` unless `money` is in the pair's base currency,
    /// `UnknownCurrency` if the repository does not know either currency.
    pub fn convert_against_pair(
        &self,
        money: &Money,
        pair: &CurrencyPair,
        mode: RoundingMode,
    ) -> MoneyResult<Money> {
        if money.currency() != pair.base() {
            return Err(MoneyError::currency_mismatch(money.currency(), pair.base()));
        }
        let base_subunits = self.currencies.subunit_for(pair.base())?;
        let counter_subunits = self.currencies.subunit_for(pair.counter())?;

        let engine = money.engine();
        let product = engine.multiply(&Number::from(money.amount()), &Number::from(pair.ratio()))?;
        let shift = i64::from(counter_subunits) - i64::from(money.precision());
        let amount = engine
            .round(&product.scale_by_power_of_ten(shift), mode)?
            .to_bigint()?;

        debug!(
            %pair,
            base_subunits,
            counter_subunits,
            "Converted {} to {amount} minor units",
            money
        );
        let counter = Currency::with_subunits(pair.counter().code(), counter_subunits);
        Ok(Money::with_precision(amount, counter, counter_subunits).with_engine(engine))
    }
}
