//! Bitcoin as a currency.

use coinage_shared::{MoneyError, MoneyResult};

use super::{Currencies, Currency};

/// Code used for Bitcoin.
pub const CODE: &str = "XBT";

/// Symbol used for Bitcoin amounts.
pub const SYMBOL: char = 'Ƀ';

/// Satoshi digits.
pub const SUBUNITS: u32 = 8;

/// Repository holding only Bitcoin.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitcoinCurrencies;

impl BitcoinCurrencies {
    /// The Bitcoin currency.
    #[must_use]
    pub fn currency() -> Currency {
        Currency::with_subunits(CODE, SUBUNITS)
    }
}

impl Currencies for BitcoinCurrencies {
    fn contains(&self, currency: &Currency) -> bool {
        currency.code() == CODE
    }

    fn subunit_for(&self, currency: &Currency) -> MoneyResult<u32> {
        if self.contains(currency) {
            Ok(SUBUNITS)
        } else {
            Err(MoneyError::UnknownCurrency(currency.code().to_string()))
        }
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Currency> + '_> {
        Box::new(std::iter::once(Self::currency()))
    }
}
