//! Parsing money from strings.

use coinage_shared::{MoneyError, MoneyResult};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::currency::bitcoin::{self, BitcoinCurrencies};
use crate::currency::{Currencies, Currency};
use crate::money::Money;

static DECIMAL: Lazy<Result<Regex, regex::Error>> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+(\.(?P<fraction>[0-9]+))?$"));

/// Turns a formatted string into money.
pub trait MoneyParser {
    /// Parses `formatted`, using `currency` when the string carries none.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the string cannot be parsed.
    fn parse(&self, formatted: &str, currency: Option<&Currency>) -> MoneyResult<Money>;
}

impl<T: MoneyParser + ?Sized> MoneyParser for &T {
    fn parse(&self, formatted: &str, currency: Option<&Currency>) -> MoneyResult<Money> {
        (**self).parse(formatted, currency)
    }
}

/// Parses a decimal in the units of `digits` fractional digits.
fn parse_decimal(decimal: &str, currency: Currency, digits: u32) -> MoneyResult<Money> {
    let pattern = DECIMAL
        .as_ref()
        .map_err(|err| MoneyError::InvalidArgument(err.to_string()))?;
    let captures = pattern.captures(decimal).ok_or_else(|| {
        MoneyError::InvalidArgument(format!("cannot parse '{decimal}' to a decimal"))
    })?;

    let fraction = captures.name("fraction").map_or(0, |m| m.as_str().len());
    if fraction > digits as usize {
        return Err(MoneyError::InvalidArgument(format!(
            "'{decimal}' has more than {digits} fractional digits for {currency}"
        )));
    }
    Money::from_decimal(decimal, currency, digits)
}

/// Parses plain decimals like `-12.50` in the subunits of a required currency.
#[derive(Debug, Clone)]
pub struct DecimalMoneyParser<C> {
    currencies: C,
}

impl<C: Currencies> DecimalMoneyParser<C> {
    /// Creates a parser reading subunits from `currencies`.
    pub const fn new(currencies: C) -> Self {
        Self { currencies }
    }
}

impl<C: Currencies> MoneyParser for DecimalMoneyParser<C> {
    fn parse(&self, formatted: &str, currency: Option<&Currency>) -> MoneyResult<Money> {
        let currency = currency.ok_or_else(|| {
            MoneyError::InvalidArgument(
                "decimal strings carry no currency, pass one explicitly".to_string(),
            )
        })?;
        let subunits = self.currencies.subunit_for(currency)?;
        let currency = Currency::with_subunits(currency.code(), subunits);
        parse_decimal(formatted.trim(), currency, subunits)
    }
}

/// Parses `Ƀ`-prefixed amounts as Bitcoin and hands anything else to an
/// inner parser.
///
/// The symbol must appear once, at the start or right after a leading `-`.
#[derive(Debug, Clone)]
pub struct BitcoinMoneyParser<P> {
    inner: P,
    fraction_digits: u32,
}

impl<P: MoneyParser> BitcoinMoneyParser<P> {
    /// Wraps `inner`; Bitcoin amounts are read with `fraction_digits` digits.
    pub const fn new(inner: P, fraction_digits: u32) -> Self {
        Self {
            inner,
            fraction_digits,
        }
    }
}

impl<P: MoneyParser> MoneyParser for BitcoinMoneyParser<P> {
    fn parse(&self, formatted: &str, currency: Option<&Currency>) -> MoneyResult<Money> {
        if !formatted.contains(bitcoin::SYMBOL) {
            return self.inner.parse(formatted, currency);
        }

        let xbt = BitcoinCurrencies::currency();
        if let Some(forced) = currency.filter(|forced| **forced != xbt) {
            return Err(MoneyError::currency_mismatch(&xbt, forced));
        }
        let trimmed = formatted.trim();
        let (sign, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", trimmed),
        };
        let amount = unsigned.strip_prefix(bitcoin::SYMBOL).ok_or_else(|| {
            MoneyError::InvalidArgument(format!(
                "'{formatted}' must start with {} or -{}",
                bitcoin::SYMBOL,
                bitcoin::SYMBOL
            ))
        })?;
        parse_decimal(&format!("{sign}{amount}"), xbt, self.fraction_digits)
    }
}
