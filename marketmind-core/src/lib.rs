//! MarketMind Core: quotes, price history, technical signals, sentiment, portfolio analytics.
//!
//! This crate contains the market data and signal engine:
//! - Domain types (symbols, quotes, history series, holdings, periods)
//! - Live Yahoo Finance provider behind a circuit breaker, with synthetic fallback
//! - Pure indicator functions (SMA, RSI, MACD approximation, volatility, momentum)
//! - Composite signal classification and predicted next price
//! - Per-symbol analysis and portfolio aggregation via `MarketEngine`
//!
//! Every engine operation returns a well-formed value: live-source failures are
//! logged and replaced by synthetic data, never surfaced to the caller.

pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod indicators;
pub mod rng;
pub mod sentiment;
pub mod signal;

pub use config::{ConfigError, DataMode, EngineConfig, LiveSettings};
pub use domain::{HistorySeries, Holding, Period, PricePoint, Provenance, Quote, Symbol};
pub use engine::{
    support_resistance, AnalysisReport, HoldingReport, MarketEngine, PortfolioReport, TickerEntry,
};
pub use sentiment::{compute_sentiment, SentimentLabel, SentimentReport};
pub use signal::{compute_signal, IndicatorReport, IndicatorStats, Signal};
