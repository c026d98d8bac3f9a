//! Live market-data provider trait and structured error types.
//!
//! The `MarketDataProvider` trait abstracts over live sources so the engine can
//! swap implementations and tests can inject stubs. Providers are allowed to
//! fail; the engine turns every failure into synthetic data.

use crate::domain::{HistorySeries, Period, Quote, Symbol};
use thiserror::Error;

/// Why a live fetch did not produce usable data.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("no current price available for {symbol}")]
    MissingPrice { symbol: String },

    #[error("empty price history for {symbol}")]
    EmptyHistory { symbol: String },

    #[error("hard stop: data provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("data error: {0}")]
    Other(String),
}

/// A live source of quotes and daily history.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Current price snapshot. Returned quotes carry `Provenance::Live`.
    fn quote(&self, symbol: &Symbol) -> Result<Quote, DataError>;

    /// Daily closes over `period`. An empty result is an error, not an empty series.
    fn history(&self, symbol: &Symbol, period: Period) -> Result<HistorySeries, DataError>;

    /// Whether the provider is currently accepting requests (not rate-limited or blocked).
    fn is_available(&self) -> bool;
}
