//! Currency identity.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use coinage_shared::MoneyError;
use serde::{Deserialize, Serialize};

use super::Currencies;

/// Subunit digits assumed when none are given.
pub const DEFAULT_SUBUNITS: u32 = 2;

/// A currency, identified by its code.
///
/// Equality, ordering and hashing only look at the code: `USD` with 2
/// subunits and `USD` with 3 are the same currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Currency {
    code: String,
    subunits: u32,
}

impl Currency {
    /// Creates a currency with the default 2 subunit digits.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self::with_subunits(code, DEFAULT_SUBUNITS)
    }

    /// Creates a currency with an explicit number of subunit digits.
    #[must_use]
    pub fn with_subunits(code: impl Into<String>, subunits: u32) -> Self {
        Self {
            code: code.into(),
            subunits,
        }
    }

    /// The currency code, e.g. `USD`.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Number of minor-unit digits.
    #[must_use]
    pub const fn subunits(&self) -> u32 {
        self.subunits
    }

    /// Returns true if `currencies` knows this currency.
    #[must_use]
    pub fn is_available_within(&self, currencies: &impl Currencies) -> bool {
        currencies.contains(self)
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Currency {}

impl Hash for Currency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl PartialOrd for Currency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Currency {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code.cmp(&other.code)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)
    }
}

impl FromStr for Currency {
    type Err = MoneyError;

    /// Parses a currency code, uppercasing it.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.is_empty() || !code.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(MoneyError::InvalidArgument(format!(
                "'{s}' is not a valid currency code"
            )));
        }
        Ok(Self::new(code.to_ascii_uppercase()))
    }
}

impl From<Currency> for String {
    fn from(currency: Currency) -> Self {
        currency.code
    }
}

impl TryFrom<String> for Currency {
    type Error = MoneyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_currency_new_defaults_to_two_subunits() {
        let usd = Currency::new("USD");
        assert_eq!(usd.code(), "USD");
        assert_eq!(usd.subunits(), 2);
    }

    #[test]
    fn test_equality_ignores_subunits() {
        let a = Currency::with_subunits("BHD", 3);
        let b = Currency::new("BHD");
        assert_eq!(a, b);

        let set: HashSet<Currency> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_ne!(Currency::new("USD"), Currency::new("EUR"));
    }

    #[test]
    fn test_currency_display() {
        assert_eq!(Currency::new("JPY").to_string(), "JPY");
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!(Currency::from_str("usd").unwrap(), Currency::new("USD"));
        assert_eq!(Currency::from_str(" eur ").unwrap().code(), "EUR");

        assert!(Currency::from_str("").is_err());
        assert!(Currency::from_str("US D").is_err());
        assert!(Currency::from_str("€").is_err());
    }

    #[test]
    fn test_serializes_as_code() {
        let json = serde_json::to_string(&Currency::with_subunits("XBT", 8)).unwrap();
        assert_eq!(json, "\"XBT\"");

        let parsed: Currency = serde_json::from_str("\"gbp\"").unwrap();
        assert_eq!(parsed, Currency::new("GBP"));
        assert!(serde_json::from_str::<Currency>("\"\"").is_err());
    }
}
