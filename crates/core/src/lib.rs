//! Core money logic for Coinage.
//!
//! This crate contains pure logic with ZERO I/O: the only data it reads is
//! the ISO 4217 table embedded at compile time.
//!
//! # Modules
//!
//! - `calculator` - Pluggable arbitrary-precision arithmetic engines
//! - `context` - Configured defaults for applications
//! - `currency` - Currency identity and currency repositories
//! - `money` - The exact `Money` value type, allocation and legacy parsing
//! - `exchange` - Currency pairs, exchanges and indirect rate resolution
//! - `format` - Decimal and Bitcoin parsers and formatters

pub mod calculator;
pub mod context;
pub mod currency;
pub mod exchange;
pub mod format;
pub mod money;

pub use calculator::{Calculator, Engine, Number};
pub use context::MoneyContext;
pub use currency::{
    AggregateCurrencies, BitcoinCurrencies, Currencies, Currency, CurrencyList, IsoCurrencies,
};
pub use exchange::{
    Converter, CurrencyPair, Exchange, FixedExchange, IndirectExchange,
    ReversedCurrenciesExchange,
};
pub use format::{
    BitcoinMoneyFormatter, BitcoinMoneyParser, DecimalMoneyFormatter, DecimalMoneyParser,
    MoneyFormatter, MoneyParser,
};
pub use money::{IntoOperand, Money, Operand, parse_to_minor_units};

pub use coinage_shared::{MoneyError, MoneyResult, RoundingMode};
