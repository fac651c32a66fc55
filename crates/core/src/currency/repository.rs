//! Currency repositories.

use std::collections::HashSet;

use coinage_shared::{MoneyError, MoneyResult};
use indexmap::IndexMap;

use super::Currency;

/// Lookup contract for known currencies.
pub trait Currencies {
    /// Returns true if the currency is known.
    fn contains(&self, currency: &Currency) -> bool;

    /// Number of minor-unit digits of a known currency.
    ///
    /// # Errors
    ///
    /// `UnknownCurrency` if the currency is not known.
    fn subunit_for(&self, currency: &Currency) -> MoneyResult<u32>;

    /// Every known currency, in a stable order.
    fn iter(&self) -> Box<dyn Iterator<Item = Currency> + '_>;
}

impl<T: Currencies + ?Sized> Currencies for &T {
    fn contains(&self, currency: &Currency) -> bool {
        (**self).contains(currency)
    }

    fn subunit_for(&self, currency: &Currency) -> MoneyResult<u32> {
        (**self).subunit_for(currency)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Currency> + '_> {
        (**self).iter()
    }
}

impl<T: Currencies + ?Sized> Currencies for Box<T> {
    fn contains(&self, currency: &Currency) -> bool {
        (**self).contains(currency)
    }

    fn subunit_for(&self, currency: &Currency) -> MoneyResult<u32> {
        (**self).subunit_for(currency)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Currency> + '_> {
        (**self).iter()
    }
}

/// In-memory currency list, iterated in insertion order.
#[derive(Debug, Clone, Default)]
pub struct CurrencyList {
    currencies: IndexMap<String, u32>,
}

impl CurrencyList {
    /// Builds a list from `(code, subunits)` pairs.
    ///
    /// A code listed twice keeps its first position and its last subunits.
    #[must_use]
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            currencies: entries
                .into_iter()
                .map(|(code, subunits)| (code.into(), subunits))
                .collect(),
        }
    }

    /// Number of currencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.currencies.len()
    }

    /// Returns true if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }
}

impl FromIterator<Currency> for CurrencyList {
    fn from_iter<I: IntoIterator<Item = Currency>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|currency| (currency.code().to_string(), currency.subunits())),
        )
    }
}

impl Currencies for CurrencyList {
    fn contains(&self, currency: &Currency) -> bool {
        self.currencies.contains_key(currency.code())
    }

    fn subunit_for(&self, currency: &Currency) -> MoneyResult<u32> {
        self.currencies
            .get(currency.code())
            .copied()
            .ok_or_else(|| MoneyError::UnknownCurrency(currency.code().to_string()))
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Currency> + '_> {
        Box::new(
            self.currencies
                .iter()
                .map(|(code, subunits)| Currency::with_subunits(code.clone(), *subunits)),
        )
    }
}

/// Chains several repositories; the first one that knows a currency wins.
#[derive(Default)]
pub struct AggregateCurrencies {
    sources: Vec<Box<dyn Currencies + Send + Sync>>,
}

impl AggregateCurrencies {
    /// Creates an aggregate over `sources`, consulted in order.
    #[must_use]
    pub fn new(sources: Vec<Box<dyn Currencies + Send + Sync>>) -> Self {
        Self { sources }
    }

    /// Appends another source, consulted after the existing ones.
    #[must_use]
    pub fn with(mut self, source: impl Currencies + Send + Sync + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl std::fmt::Debug for AggregateCurrencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregateCurrencies")
            .field("sources", &self.sources.len())
            .finish()
    }
}

impl Currencies for AggregateCurrencies {
    fn contains(&self, currency: &Currency) -> bool {
        self.sources.iter().any(|source| source.contains(currency))
    }

    fn subunit_for(&self, currency: &Currency) -> MoneyResult<u32> {
        self.sources
            .iter()
            .find(|source| source.contains(currency))
            .ok_or_else(|| MoneyError::UnknownCurrency(currency.code().to_string()))?
            .subunit_for(currency)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Currency> + '_> {
        let mut seen = HashSet::new();
        Box::new(
            self.sources
                .iter()
                .flat_map(|source| source.iter())
                .filter(move |currency| seen.insert(currency.code().to_string())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn majors() -> CurrencyList {
        CurrencyList::new([("USD", 2), ("EUR", 2), ("JPY", 0)])
    }

    #[test]
    fn test_currency_list_lookup() {
        let list = majors();
        assert!(list.contains(&Currency::new("JPY")));
        assert!(!list.contains(&Currency::new("GBP")));
        assert_eq!(list.subunit_for(&Currency::new("JPY")).unwrap(), 0);
        assert_eq!(
            list.subunit_for(&Currency::new("GBP")).unwrap_err(),
            MoneyError::UnknownCurrency("GBP".to_string())
        );
    }

    #[test]
    fn test_currency_list_iterates_in_insertion_order() {
        let codes: Vec<String> = majors().iter().map(|c| c.code().to_string()).collect();
        assert_eq!(codes, ["USD", "EUR", "JPY"]);

        let jpy = majors().iter().last().unwrap();
        assert_eq!(jpy.subunits(), 0);
    }

    #[test]
    fn test_currency_list_from_currencies() {
        let list: CurrencyList = [Currency::with_subunits("XBT", 8), Currency::new("USD")]
            .into_iter()
            .collect();
        assert_eq!(list.len(), 2);
        assert_eq!(list.subunit_for(&Currency::new("XBT")).unwrap(), 8);
    }

    #[test]
    fn test_aggregate_first_match_wins() {
        let aggregate = AggregateCurrencies::default()
            .with(CurrencyList::new([("USD", 2), ("XYZ", 1)]))
            .with(CurrencyList::new([("XYZ", 4), ("ABC", 3)]));

        assert_eq!(aggregate.subunit_for(&Currency::new("XYZ")).unwrap(), 1);
        assert_eq!(aggregate.subunit_for(&Currency::new("ABC")).unwrap(), 3);
        assert!(matches!(
            aggregate.subunit_for(&Currency::new("EUR")),
            Err(MoneyError::UnknownCurrency(_))
        ));
    }

    #[test]
    fn test_aggregate_iterates_without_duplicates() {
        let sources: Vec<Box<dyn Currencies + Send + Sync>> = vec![
            Box::new(CurrencyList::new([("USD", 2), ("XYZ", 1)])),
            Box::new(CurrencyList::new([("XYZ", 4), ("ABC", 3)])),
        ];
        let aggregate = AggregateCurrencies::new(sources);
        let codes: Vec<String> = aggregate.iter().map(|c| c.code().to_string()).collect();
        assert_eq!(codes, ["USD", "XYZ", "ABC"]);
    }

    #[test]
    fn test_empty_aggregate_knows_nothing() {
        let aggregate = AggregateCurrencies::default();
        assert!(!aggregate.contains(&Currency::new("USD")));
        assert_eq!(aggregate.iter().count(), 0);
    }
}
