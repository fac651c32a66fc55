//! Currency pairs.

use std::fmt;
use std::str::FromStr;

use coinage_shared::{MoneyError, MoneyResult};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::Currency;

static ISO_PAIR: Lazy<Result<Regex, regex::Error>> = Lazy::new(|| {
    Regex::new(r"^(?P<base>[A-Z]{2,3})/(?P<counter>[A-Z]{2,3}) (?P<ratio>[0-9]*\.?[0-9]+)$")
});

/// A directional quote: one `base` buys `ratio` of `counter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyPair {
    base: Currency,
    counter: Currency,
    ratio: Decimal,
}

impl CurrencyPair {
    /// Creates a pair.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` unless `ratio` is positive.
    pub fn new(base: Currency, counter: Currency, ratio: Decimal) -> MoneyResult<Self> {
        if ratio <= Decimal::ZERO {
            return Err(MoneyError::InvalidArgument(format!(
                "conversion ratio for {base}/{counter} must be positive, got {ratio}"
            )));
        }
        Ok(Self {
            base,
            counter,
            ratio,
        })
    }

    /// The pair of a currency with itself.
    #[must_use]
    pub fn identity(currency: Currency) -> Self {
        Self {
            base: currency.clone(),
            counter: currency,
            ratio: Decimal::ONE,
        }
    }

    /// Currency being priced.
    #[must_use]
    pub const fn base(&self) -> &Currency {
        &self.base
    }

    /// Currency the price is expressed in.
    #[must_use]
    pub const fn counter(&self) -> &Currency {
        &self.counter
    }

    /// Units of `counter` per unit of `base`.
    #[must_use]
    pub const fn ratio(&self) -> Decimal {
        self.ratio
    }

    /// The opposite quote, `counter/base` at `1 / ratio`.
    ///
    /// # Errors
    ///
    /// `Overflow` if the reciprocal does not fit a `Decimal`.
    pub fn inverse(&self) -> MoneyResult<Self> {
        let ratio = Decimal::ONE.checked_div(self.ratio).ok_or_else(|| {
            MoneyError::Overflow(format!("reciprocal of {} for {}", self.ratio, self))
        })?;
        Self::new(self.counter.clone(), self.base.clone(), ratio)
    }
}

impl fmt::Display for CurrencyPair {
    /// ISO notation, e.g. `EUR/USD 1.2500`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} {}", self.base, self.counter, self.ratio)
    }
}

impl FromStr for CurrencyPair {
    type Err = MoneyError;

    /// Parses the ISO notation, e.g. `EUR/USD 1.2500`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pattern = ISO_PAIR
            .as_ref()
            .map_err(|err| MoneyError::InvalidArgument(err.to_string()))?;
        let invalid =
            || MoneyError::InvalidArgument(format!("cannot create currency pair from '{s}'"));

        let captures = pattern.captures(s).ok_or_else(invalid)?;
        let ratio = Decimal::from_str(&captures["ratio"]).map_err(|_| invalid())?;
        Self::new(
            Currency::new(&captures["base"]),
            Currency::new(&captures["counter"]),
            ratio,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn pair(base: &str, counter: &str, ratio: Decimal) -> CurrencyPair {
        CurrencyPair::new(Currency::new(base), Currency::new(counter), ratio).unwrap()
    }

    #[test]
    fn test_iso_notation() {
        let parsed: CurrencyPair = "EUR/USD 1.2500".parse().unwrap();
        assert_eq!(parsed, pair("EUR", "USD", dec!(1.2500)));
        assert_eq!(parsed.to_string(), "EUR/USD 1.2500");
        assert_eq!(
            "USD/JPY 101".parse::<CurrencyPair>().unwrap().ratio(),
            dec!(101)
        );
    }

    #[rstest]
    #[case("EUR/USD")]
    #[case("EUR-USD 1.25")]
    #[case("eur/usd 1.25")]
    #[case("EUR/USD -1.25")]
    #[case("EUR/USD 1.")]
    #[case("EUR/USD 0")]
    fn test_rejects_bad_notation(#[case] input: &str) {
        assert!(matches!(
            input.parse::<CurrencyPair>(),
            Err(MoneyError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_inverse() {
        let eur_usd = pair("EUR", "USD", dec!(1.25));
        let usd_eur = eur_usd.inverse().unwrap();
        assert_eq!(usd_eur.base().code(), "USD");
        assert_eq!(usd_eur.counter().code(), "EUR");
        assert_eq!(usd_eur.ratio(), dec!(0.8));
    }

    #[test]
    fn test_rejects_non_positive_ratio() {
        assert!(CurrencyPair::new(Currency::new("A"), Currency::new("B"), dec!(0)).is_err());
        assert!(CurrencyPair::new(Currency::new("A"), Currency::new("B"), dec!(-1)).is_err());
    }

    #[test]
    fn test_identity() {
        let usd = CurrencyPair::identity(Currency::new("USD"));
        assert_eq!(usd.ratio(), Decimal::ONE);
        assert_eq!(usd.base(), usd.counter());
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_value(pair("EUR", "USD", dec!(1.25))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"base": "EUR", "counter": "USD", "ratio": "1.25"})
        );
    }
}
