//! Indirect quotes through intermediate currencies.
//!
//! When no direct quote exists, the currencies known to a repository are
//! treated as graph nodes and every quotable pair as an edge. A
//! breadth-first search, starting from the base currency whether or not the
//! repository knows it, finds the path with the fewest hops; the composed
//! ratio is the product of the edge ratios from base to counter.
//!
//! Ratios compose as `Decimal`: a product needing more than 28 fractional
//! digits is rounded to fit, and only magnitude overflow is an error.

use std::collections::{HashMap, VecDeque};

use coinage_shared::{MoneyError, MoneyResult};
use rust_decimal::Decimal;
use tracing::debug;

use super::{CurrencyPair, Exchange};
use crate::currency::{Currencies, Currency};

/// Search state of one currency.
#[derive(Debug)]
struct Node {
    currency: Currency,
    discovered: bool,
    predecessor: Option<String>,
}

/// Resolves quotes directly or through a chain of intermediate currencies.
///
/// Composed ratios carry at most `Decimal` precision; see the module docs.
#[derive(Debug, Clone)]
pub struct IndirectExchange<E, C> {
    exchange: E,
    currencies: C,
}

impl<E: Exchange, C: Currencies> IndirectExchange<E, C> {
    /// Searches `exchange` over the currencies `currencies` knows.
    pub const fn new(exchange: E, currencies: C) -> Self {
        Self {
            exchange,
            currencies,
        }
    }

    /// Quotes every hop from `base` to `counter`, in order.
    ///
    /// # Errors
    ///
    /// `UnresolvablePair` if no chain exists.
    pub fn conversions(&self, base: &Currency, counter: &Currency) -> MoneyResult<Vec<CurrencyPair>> {
        let mut nodes: HashMap<String, Node> = self
            .currencies
            .iter()
            .map(|currency| {
                let node = Node {
                    currency: currency.clone(),
                    discovered: false,
                    predecessor: None,
                };
                (currency.code().to_string(), node)
            })
            .collect();

        if !nodes.contains_key(counter.code()) {
            return Err(MoneyError::unresolvable(base, counter));
        }
        // the base only has to be quotable, not known to the repository
        let start = nodes.entry(base.code().to_string()).or_insert_with(|| Node {
            currency: base.clone(),
            discovered: false,
            predecessor: None,
        });
        start.discovered = true;

        let mut frontier = VecDeque::from([start.currency.clone()]);
        while let Some(current) = frontier.pop_front() {
            if current == *counter {
                return self.reconstruct(&nodes, base, counter);
            }

            for candidate in self.currencies.iter() {
                let Some(node) = nodes.get_mut(candidate.code()) else {
                    continue;
                };
                if node.discovered {
                    continue;
                }
                match self.exchange.quote(&current, &candidate) {
                    Ok(_) => {
                        node.discovered = true;
                        node.predecessor = Some(current.code().to_string());
                        frontier.push_back(node.currency.clone());
                    }
                    Err(MoneyError::UnresolvablePair { .. }) => {}
                    Err(err) => return Err(err),
                }
            }
        }

        debug!(%base, %counter, "No conversion chain found");
        Err(MoneyError::unresolvable(base, counter))
    }

    /// Walks predecessors back from `counter` and re-quotes each hop.
    fn reconstruct(
        &self,
        nodes: &HashMap<String, Node>,
        base: &Currency,
        counter: &Currency,
    ) -> MoneyResult<Vec<CurrencyPair>> {
        let mut path = vec![counter.code()];
        let mut cursor = counter.code();
        while let Some(previous) = nodes.get(cursor).and_then(|node| node.predecessor.as_deref()) {
            path.push(previous);
            cursor = previous;
        }
        path.reverse();

        let currency = |code: &str| {
            nodes
                .get(code)
                .map(|node| node.currency.clone())
                .ok_or_else(|| MoneyError::unresolvable(base, counter))
        };
        let pairs = path
            .windows(2)
            .map(|hop| self.exchange.quote(&currency(hop[0])?, &currency(hop[1])?))
            .collect::<MoneyResult<Vec<_>>>()?;

        debug!(%base, %counter, hops = pairs.len(), "Resolved conversion chain");
        Ok(pairs)
    }
}

impl<E: Exchange, C: Currencies> Exchange for IndirectExchange<E, C> {
    fn quote(&self, base: &Currency, counter: &Currency) -> MoneyResult<CurrencyPair> {
        if base == counter {
            return Ok(CurrencyPair::identity(base.clone()));
        }
        match self.exchange.quote(base, counter) {
            Err(MoneyError::UnresolvablePair { .. }) => {}
            result => return result,
        }

        let ratio = self
            .conversions(base, counter)?
            .iter()
            .try_fold(Decimal::ONE, |ratio, pair| ratio.checked_mul(pair.ratio()))
            .ok_or_else(|| {
                MoneyError::Overflow(format!("composed ratio for {base}/{counter}"))
            })?;
        CurrencyPair::new(base.clone(), counter.clone(), ratio)
    }
}
