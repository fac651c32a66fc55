//! Non-locale parsing and formatting of money.

pub mod formatter;
pub mod parser;

pub use formatter::{BitcoinMoneyFormatter, DecimalMoneyFormatter, MoneyFormatter};
pub use parser::{BitcoinMoneyParser, DecimalMoneyParser, MoneyParser};
