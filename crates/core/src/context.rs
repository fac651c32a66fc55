//! Configured entry point.
//!
//! Applications load a [`CoinageConfig`] once at startup and build a
//! `MoneyContext` from it; the context carries the configured engine,
//! default precision and rounding mode.

use coinage_shared::telemetry::init_tracing;
use coinage_shared::{CoinageConfig, MoneyConfig, MoneyResult, RoundingMode};
use num_bigint::BigInt;
use tracing::info;

use crate::calculator::{Calculator, Engine};
use crate::currency::Currency;
use crate::money::Money;

/// Money defaults resolved from configuration.
#[derive(Debug, Clone)]
pub struct MoneyContext {
    engine: &'static Engine,
    money: MoneyConfig,
}

impl MoneyContext {
    /// Installs tracing and pins the process engine, then builds a context.
    ///
    /// Tracing that is already installed is left alone.
    ///
    /// # Errors
    ///
    /// Fails if the configured engine conflicts with the one already in use
    /// or no backend is supported.
    pub fn init(config: &CoinageConfig) -> MoneyResult<Self> {
        init_tracing(&config.logging);
        let context = Self::from_config(config)?;
        info!(
            backend = %context.engine.kind(),
            precision = context.money.default_precision,
            rounding = %context.money.rounding_mode,
            "Coinage initialized"
        );
        Ok(context)
    }

    /// Builds a context without touching tracing.
    ///
    /// # Errors
    ///
    /// Same as [`MoneyContext::init`].
    pub fn from_config(config: &CoinageConfig) -> MoneyResult<Self> {
        Ok(Self {
            engine: Engine::install(&config.engine)?,
            money: config.money.clone(),
        })
    }

    /// The configured engine.
    #[must_use]
    pub const fn engine(&self) -> &'static Engine {
        self.engine
    }

    /// Precision used by [`MoneyContext::money`].
    #[must_use]
    pub const fn default_precision(&self) -> u32 {
        self.money.default_precision
    }

    /// Rounding mode applications should use when none is given.
    #[must_use]
    pub const fn rounding_mode(&self) -> RoundingMode {
        self.money.rounding_mode
    }

    /// Money at the configured default precision.
    #[must_use]
    pub fn money(&self, amount: impl Into<BigInt>, currency: Currency) -> Money {
        Money::with_precision(amount, currency, self.money.default_precision)
            .with_engine(self.engine)
    }

    /// Parses a decimal string at the configured default precision.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `value` is not a plain decimal number.
    pub fn from_decimal(&self, value: &str, currency: Currency) -> MoneyResult<Money> {
        Ok(Money::from_decimal(value, currency, self.money.default_precision)?
            .with_engine(self.engine))
    }
}
