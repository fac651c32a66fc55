//! Exchange over a fixed table of direct quotes.

use std::collections::HashMap;

use coinage_shared::{MoneyError, MoneyResult};
use rust_decimal::Decimal;

use super::{CurrencyPair, Exchange};
use crate::currency::Currency;

/// Direct quotes keyed by `(base, counter)` code.
#[derive(Debug, Clone, Default)]
pub struct FixedExchange {
    rates: HashMap<(String, String), Decimal>,
}

impl FixedExchange {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the `base/counter` quote.
    #[must_use]
    pub fn with_rate(mut self, base: &str, counter: &str, ratio: Decimal) -> Self {
        self.insert(base, counter, ratio);
        self
    }

    /// Adds or replaces the `base/counter` quote, returning the old ratio.
    pub fn insert(&mut self, base: &str, counter: &str, ratio: Decimal) -> Option<Decimal> {
        self.rates
            .insert((base.to_string(), counter.to_string()), ratio)
    }

    /// Removes the `base/counter` quote.
    pub fn remove(&mut self, base: &str, counter: &str) -> Option<Decimal> {
        self.rates.remove(&(base.to_string(), counter.to_string()))
    }
}

impl FromIterator<CurrencyPair> for FixedExchange {
    fn from_iter<I: IntoIterator<Item = CurrencyPair>>(iter: I) -> Self {
        Self {
            rates: iter
                .into_iter()
                .map(|pair| {
                    let key = (pair.base().code().to_string(), pair.counter().code().to_string());
                    (key, pair.ratio())
                })
                .collect(),
        }
    }
}

impl Exchange for FixedExchange {
    fn quote(&self, base: &Currency, counter: &Currency) -> MoneyResult<CurrencyPair> {
        let key = (base.code().to_string(), counter.code().to_string());
        let ratio = self
            .rates
            .get(&key)
            .ok_or_else(|| MoneyError::unresolvable(base, counter))?;
        CurrencyPair::new(base.clone(), counter.clone(), *ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quotes_direct_rates_only() {
        let exchange = FixedExchange::new().with_rate("EUR", "USD", dec!(1.25));
        let (eur, usd) = (Currency::new("EUR"), Currency::new("USD"));

        let pair = exchange.quote(&eur, &usd).unwrap();
        assert_eq!(pair.ratio(), dec!(1.25));
        assert_eq!(
            exchange.quote(&usd, &eur).unwrap_err(),
            MoneyError::unresolvable("USD", "EUR")
        );
    }

    #[test]
    fn test_insert_and_remove() {
        let mut exchange = FixedExchange::new();
        assert_eq!(exchange.insert("EUR", "USD", dec!(1.1)), None);
        assert_eq!(exchange.insert("EUR", "USD", dec!(1.2)), Some(dec!(1.1)));
        assert_eq!(exchange.remove("EUR", "USD"), Some(dec!(1.2)));
        assert!(exchange
            .quote(&Currency::new("EUR"), &Currency::new("USD"))
            .is_err());
    }

    #[test]
    fn test_from_pairs_keeps_caller_subunits() {
        let exchange: FixedExchange = ["USD/JPY 101".parse::<CurrencyPair>().unwrap()]
            .into_iter()
            .collect();
        let jpy = Currency::with_subunits("JPY", 0);
        let pair = exchange.quote(&Currency::new("USD"), &jpy).unwrap();
        assert_eq!(pair.counter().subunits(), 0);
        assert_eq!(pair.ratio(), dec!(101));
    }
}
