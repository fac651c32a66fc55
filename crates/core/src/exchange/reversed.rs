//! Exchange that also answers with reversed quotes.

use coinage_shared::{MoneyError, MoneyResult};
use tracing::debug;

use super::{CurrencyPair, Exchange};
use crate::currency::Currency;

/// Wraps an exchange; when `base/counter` is unknown it quotes
/// `counter/base` and inverts it.
#[derive(Debug, Clone)]
pub struct ReversedCurrenciesExchange<E> {
    inner: E,
}

impl<E: Exchange> ReversedCurrenciesExchange<E> {
    /// Wraps `inner`.
    pub const fn new(inner: E) -> Self {
        Self { inner }
    }
}

impl<E: Exchange> Exchange for ReversedCurrenciesExchange<E> {
    fn quote(&self, base: &Currency, counter: &Currency) -> MoneyResult<CurrencyPair> {
        match self.inner.quote(base, counter) {
            Err(original @ MoneyError::UnresolvablePair { .. }) => {
                match self.inner.quote(counter, base) {
                    Ok(reversed) => {
                        debug!(pair = %reversed, "Inverting reversed quote");
                        reversed.inverse()
                    }
                    Err(MoneyError::UnresolvablePair { .. }) => Err(original),
                    Err(err) => Err(err),
                }
            }
            result => result,
        }
    }
}
