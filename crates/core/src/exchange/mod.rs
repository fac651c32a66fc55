//! Exchange rates and currency conversion.
//!
//! - `pair` - Directional quotes between two currencies
//! - `fixed` - In-memory direct quotes
//! - `reversed` - Falls back to the inverse of the opposite quote
//! - `indirect` - Discovers multi-hop quotes by breadth-first search
//! - `conversion` - Converts money through a quote

pub mod conversion;
pub mod fixed;
pub mod indirect;
pub mod pair;
pub mod reversed;

use coinage_shared::MoneyResult;

use crate::currency::Currency;

pub use conversion::Converter;
pub use fixed::FixedExchange;
pub use indirect::IndirectExchange;
pub use pair::CurrencyPair;
pub use reversed::ReversedCurrenciesExchange;

/// Source of exchange rates.
pub trait Exchange {
    /// Quotes `base` in units of `counter`.
    ///
    /// # Errors
    ///
    /// `UnresolvablePair` when no rate is known.
    fn quote(&self, base: &Currency, counter: &Currency) -> MoneyResult<CurrencyPair>;
}

impl<T: Exchange + ?Sized> Exchange for &T {
    fn quote(&self, base: &Currency, counter: &Currency) -> MoneyResult<CurrencyPair> {
        (**self).quote(base, counter)
    }
}

impl<T: Exchange + ?Sized> Exchange for Box<T> {
    fn quote(&self, base: &Currency, counter: &Currency) -> MoneyResult<CurrencyPair> {
        (**self).quote(base, counter)
    }
}
