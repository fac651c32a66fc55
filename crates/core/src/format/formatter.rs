//! Rendering money as strings.

use coinage_shared::{MoneyError, MoneyResult};

use crate::currency::bitcoin;
use crate::currency::Currencies;
use crate::money::Money;

/// Turns money into a string.
pub trait MoneyFormatter {
    /// Formats `money`.
    ///
    /// # Errors
    ///
    /// Implementation specific; see each formatter.
    fn format(&self, money: &Money) -> MoneyResult<String>;
}

impl<T: MoneyFormatter + ?Sized> MoneyFormatter for &T {
    fn format(&self, money: &Money) -> MoneyResult<String> {
        (**self).format(money)
    }
}

/// Renders the plain decimal value with the currency's subunit digits,
/// e.g. `-12.50`. Extra digits are cut off.
#[derive(Debug, Clone)]
pub struct DecimalMoneyFormatter<C> {
    currencies: C,
}

impl<C: Currencies> DecimalMoneyFormatter<C> {
    /// Creates a formatter reading subunits from `currencies`.
    pub const fn new(currencies: C) -> Self {
        Self { currencies }
    }
}

impl<C: Currencies> MoneyFormatter for DecimalMoneyFormatter<C> {
    /// # Errors
    ///
    /// `UnknownCurrency` if the repository does not know the currency.
    fn format(&self, money: &Money) -> MoneyResult<String> {
        let subunits = self.currencies.subunit_for(money.currency())?;
        Ok(money.to_number().to_fixed(subunits))
    }
}

/// Renders Bitcoin as `Ƀ` followed by the decimal value, e.g. `-Ƀ0.25`.
#[derive(Debug, Clone, Copy)]
pub struct BitcoinMoneyFormatter {
    fraction_digits: u32,
}

impl BitcoinMoneyFormatter {
    /// Creates a formatter printing `fraction_digits` fractional digits.
    #[must_use]
    pub const fn new(fraction_digits: u32) -> Self {
        Self { fraction_digits }
    }
}

impl MoneyFormatter for BitcoinMoneyFormatter {
    /// # Errors
    ///
    /// `InvalidArgument` for money that is not Bitcoin.
    fn format(&self, money: &Money) -> MoneyResult<String> {
        if money.currency().code() != bitcoin::CODE {
            return Err(MoneyError::InvalidArgument(format!(
                "Bitcoin formatter cannot format {}",
                money.currency()
            )));
        }
        let value = money.to_number();
        let (sign, magnitude) = if value.is_negative() {
            ("-", value.negate())
        } else {
            ("", value)
        };
        Ok(format!(
            "{sign}{}{}",
            bitcoin::SYMBOL,
            magnitude.to_fixed(self.fraction_digits)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::{Currency, IsoCurrencies};
    use rstest::rstest;

    #[rstest]
    #[case(100_050, "USD", 2, "1000.50")]
    #[case(-5, "USD", 2, "-0.05")]
    #[case(1500, "JPY", 0, "1500")]
    #[case(1500, "JPY", 2, "15")]
    #[case(1005, "BHD", 3, "1.005")]
    #[case(12_345, "USD", 3, "12.34")]
    fn test_decimal_formatter(
        #[case] amount: i64,
        #[case] code: &str,
        #[case] precision: u32,
        #[case] expected: &str,
    ) {
        let money = Money::with_precision(amount, Currency::new(code), precision);
        assert_eq!(
            DecimalMoneyFormatter::new(IsoCurrencies).format(&money).unwrap(),
            expected
        );
    }

    #[test]
    fn test_decimal_formatter_unknown_currency() {
        let money = Money::new(1, Currency::new("XBT"));
        assert!(DecimalMoneyFormatter::new(IsoCurrencies).format(&money).is_err());
    }

    #[rstest]
    #[case(100_000, 8, 8, "Ƀ0.00100000")]
    #[case(-41, 2, 2, "-Ƀ0.41")]
    #[case(5, 0, 0, "Ƀ5")]
    #[case(1, 8, 2, "Ƀ0.00")]
    fn test_bitcoin_formatter(
        #[case] amount: i64,
        #[case] precision: u32,
        #[case] digits: u32,
        #[case] expected: &str,
    ) {
        let money = Money::with_precision(amount, Currency::new("XBT"), precision);
        assert_eq!(BitcoinMoneyFormatter::new(digits).format(&money).unwrap(), expected);
    }

    #[test]
    fn test_bitcoin_formatter_rejects_other_currencies() {
        let money = Money::new(1, Currency::new("USD"));
        assert!(matches!(
            BitcoinMoneyFormatter::new(8).format(&money),
            Err(MoneyError::InvalidArgument(_))
        ));
    }
}
