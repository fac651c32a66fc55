//! Library configuration management.

use serde::Deserialize;

use crate::types::{BackendKind, RoundingMode};

/// Library configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinageConfig {
    /// Arithmetic engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Money defaults.
    #[serde(default)]
    pub money: MoneyConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Arithmetic engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Backend to pin the process engine to. `None` keeps the preference order.
    #[serde(default)]
    pub backend: Option<BackendKind>,
}

/// Money defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct MoneyConfig {
    /// Precision used when none is given.
    #[serde(default = "default_precision")]
    pub default_precision: u32,
    /// Rounding mode used when none is given.
    #[serde(default)]
    pub rounding_mode: RoundingMode,
}

impl Default for MoneyConfig {
    fn default() -> Self {
        Self {
            default_precision: default_precision(),
            rounding_mode: RoundingMode::default(),
        }
    }
}

fn default_precision() -> u32 {
    2
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "coinage=info".to_string()
}

impl CoinageConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Sources, later ones winning: `config/coinage.*`, `config/{RUN_MODE}.*`,
    /// then `COINAGE__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a source is malformed.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/coinage").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("COINAGE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
