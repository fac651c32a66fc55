//! ISO 4217 currencies.
//!
//! The table is embedded at compile time and parsed on first use. It covers
//! the commonly traded currencies; applications needing the full list can
//! chain a [`CurrencyList`](super::CurrencyList) through
//! [`AggregateCurrencies`](super::AggregateCurrencies).

use coinage_shared::{MoneyError, MoneyResult};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Currencies, Currency};

static ISO_TABLE_JSON: &str = include_str!("../../resources/iso_currencies.json");

static ISO_TABLE: Lazy<MoneyResult<IndexMap<String, Specification>>> = Lazy::new(|| {
    let entries: Vec<Specification> = serde_json::from_str(ISO_TABLE_JSON).map_err(|err| {
        MoneyError::InvalidArgument(format!("embedded ISO 4217 table is malformed: {err}"))
    })?;
    debug!(currencies = entries.len(), "Loaded ISO 4217 table");
    Ok(entries
        .into_iter()
        .map(|entry| (entry.code.clone(), entry))
        .collect())
});

/// Reference data for one ISO currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specification {
    /// Alphabetic code, e.g. `EUR`.
    pub code: String,
    /// Number of minor-unit digits.
    pub minor_unit: u32,
    /// English name.
    pub name: String,
    /// Numeric code, e.g. `978`.
    pub numeric_code: u16,
}

/// Repository backed by the embedded ISO 4217 table.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoCurrencies;

impl IsoCurrencies {
    fn table() -> MoneyResult<&'static IndexMap<String, Specification>> {
        ISO_TABLE.as_ref().map_err(Clone::clone)
    }

    fn lookup(currency: &Currency) -> MoneyResult<&'static Specification> {
        Self::table()?
            .get(currency.code())
            .ok_or_else(|| MoneyError::UnknownCurrency(currency.code().to_string()))
    }

    /// Full reference data for a currency.
    ///
    /// # Errors
    ///
    /// `UnknownCurrency` if the currency is not an ISO currency.
    pub fn specify(&self, currency: &Currency) -> MoneyResult<Specification> {
        Self::lookup(currency).cloned()
    }

    /// ISO numeric code of a currency.
    ///
    /// # Errors
    ///
    /// `UnknownCurrency` if the currency is not an ISO currency.
    pub fn numeric_code_for(&self, currency: &Currency) -> MoneyResult<u16> {
        Ok(Self::lookup(currency)?.numeric_code)
    }
}

impl Currencies for IsoCurrencies {
    fn contains(&self, currency: &Currency) -> bool {
        Self::lookup(currency).is_ok()
    }

    fn subunit_for(&self, currency: &Currency) -> MoneyResult<u32> {
        Ok(Self::lookup(currency)?.minor_unit)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = Currency> + '_> {
        match Self::table() {
            Ok(table) => Box::new(
                table
                    .values()
                    .map(|spec| Currency::with_subunits(spec.code.clone(), spec.minor_unit)),
            ),
            Err(_) => Box::new(std::iter::empty()),
        }
    }
}
