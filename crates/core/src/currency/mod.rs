//! Currencies and the repositories that know them.

pub mod bitcoin;
pub mod iso;
pub mod repository;
pub mod types;

pub use bitcoin::BitcoinCurrencies;
pub use iso::{IsoCurrencies, Specification};
pub use repository::{AggregateCurrencies, Currencies, CurrencyList};
pub use types::Currency;
