//! Engine configuration.
//!
//! Stored as TOML. Every field has a default, so an empty file (or no file at
//! all) yields a working engine with the built-in reference price table.
//!
//! ```toml
//! mode = "simulated"
//! seed = 42
//!
//! [live]
//! timeout_secs = 10
//! max_retries = 2
//!
//! [reference_prices]
//! AAPL = 189.30
//! "RELIANCE.NS" = 2847.60
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Smallest reference price accepted: one cent, the resolution quotes are rounded to.
pub const MIN_REFERENCE_PRICE: f64 = 0.01;

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Whether the engine may contact the live market-data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataMode {
    /// Try the live source first, fall back to synthetic data on any failure.
    #[default]
    Live,
    /// Never touch the network.
    Simulated,
}

/// Live provider tuning: timeouts, retries, circuit breaker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveSettings {
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub cooldown_secs: u64,
    pub failure_threshold: u32,
}

impl Default for LiveSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            max_retries: 2,
            base_delay_ms: 250,
            cooldown_secs: 30 * 60,
            failure_threshold: 3,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub mode: DataMode,
    /// Master seed for synthetic data. `None` draws from OS entropy per call.
    pub seed: Option<u64>,
    pub live: LiveSettings,
    /// Reference base prices for the synthetic generator, keyed by ticker.
    pub reference_prices: BTreeMap<String, f64>,
    /// US tickers listed on NASDAQ (everything else non-`.NS` is NYSE).
    pub nasdaq_symbols: Vec<String>,
    /// Default symbol set for the ticker strip.
    pub ticker_symbols: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let reference_prices = [
            ("AAPL", 189.30),
            ("MSFT", 415.60),
            ("GOOGL", 175.40),
            ("TSLA", 248.50),
            ("NVDA", 875.20),
            ("AMZN", 198.70),
            ("RELIANCE.NS", 2847.60),
            ("TCS.NS", 3921.40),
            ("INFY.NS", 1642.80),
            ("META", 578.30),
            ("NFLX", 892.10),
            ("AMD", 168.40),
            ("INTC", 43.20),
            ("BABA", 84.50),
        ]
        .into_iter()
        .map(|(sym, price)| (sym.to_string(), price))
        .collect();

        let nasdaq_symbols = [
            "AAPL", "MSFT", "GOOGL", "TSLA", "NVDA", "AMZN", "META", "NFLX", "AMD", "INTC",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        let ticker_symbols = [
            "AAPL",
            "MSFT",
            "GOOGL",
            "TSLA",
            "NVDA",
            "AMZN",
            "META",
            "RELIANCE.NS",
            "TCS.NS",
            "INFY.NS",
        ]
        .into_iter()
        .map(String::from)
        .collect();

        Self {
            mode: DataMode::default(),
            seed: None,
            live: LiveSettings::default(),
            reference_prices,
            nasdaq_symbols,
            ticker_symbols,
        }
    }
}

impl EngineConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    ///
    /// Tables that are present replace the defaults wholesale; a
    /// `[reference_prices]` table with two entries means only those two
    /// symbols have reference prices.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Same config with the network disabled.
    pub fn simulated(mut self) -> Self {
        self.mode = DataMode::Simulated;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (symbol, price) in &self.reference_prices {
            if !price.is_finite() || *price < MIN_REFERENCE_PRICE {
                return Err(ConfigError::Invalid(format!(
                    "reference price for '{symbol}' must be at least {MIN_REFERENCE_PRICE}, got {price}"
                )));
            }
        }
        if self.live.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "live.timeout_secs must be greater than zero".into(),
            ));
        }
        if self.live.failure_threshold == 0 {
            return Err(ConfigError::Invalid(
                "live.failure_threshold must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}
