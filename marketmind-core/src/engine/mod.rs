//! Market engine: live-or-synthetic data resolution plus the analysis,
//! portfolio and ticker operations built on it.
//!
//! Resolution policy for quotes and histories:
//! 1. If a live provider is configured and its circuit breaker allows requests → fetch
//! 2. If the fetch fails, or returns data that breaks an invariant → log and synthesize
//! 3. Without a live provider → synthesize
//!
//! The caller only ever sees the `source` provenance tag; provider errors are
//! logged at `warn` and never returned.

pub mod analysis;
pub mod portfolio;
pub mod ticker;

pub use analysis::{support_resistance, AnalysisReport};
pub use portfolio::{HoldingReport, PortfolioReport};
pub use ticker::TickerEntry;

use crate::config::{DataMode, EngineConfig};
use crate::data::{MarketDataProvider, SyntheticMarket, YahooProvider};
use crate::domain::{HistorySeries, Period, Quote, Symbol};
use crate::rng::{RngSource, Stream};
use chrono::{NaiveDate, Utc};
use std::sync::Arc;

/// Request-scoped market data and analytics engine.
///
/// Holds only immutable configuration and a thread-safe provider handle, so
/// one engine can serve concurrent callers.
pub struct MarketEngine {
    live: Option<Arc<dyn MarketDataProvider>>,
    synthetic: SyntheticMarket,
    rng: RngSource,
    ticker_symbols: Vec<Symbol>,
}

impl MarketEngine {
    /// Build an engine from config. In `live` mode this creates a Yahoo
    /// provider; if that fails the engine runs on synthetic data only.
    pub fn new(config: &EngineConfig) -> Self {
        let live: Option<Arc<dyn MarketDataProvider>> = match config.mode {
            DataMode::Live => match YahooProvider::from_settings(&config.live) {
                Ok(provider) => Some(Arc::new(provider)),
                Err(e) => {
                    tracing::warn!(error = %e, "live provider unavailable, serving synthetic data");
                    None
                }
            },
            DataMode::Simulated => None,
        };
        Self::build(config, live)
    }

    /// Build an engine around an explicit live provider, regardless of `config.mode`.
    pub fn with_provider(config: &EngineConfig, provider: Arc<dyn MarketDataProvider>) -> Self {
        Self::build(config, Some(provider))
    }

    fn build(config: &EngineConfig, live: Option<Arc<dyn MarketDataProvider>>) -> Self {
        let engine = Self {
            live,
            synthetic: SyntheticMarket::from_config(config),
            rng: RngSource::from_seed(config.seed),
            ticker_symbols: config.ticker_symbols.iter().map(|s| Symbol::new(s)).collect(),
        };
        tracing::info!(
            provider = engine.provider_name().unwrap_or("none"),
            seeded = config.seed.is_some(),
            "market engine ready"
        );
        engine
    }

    /// Name of the live provider, if one is configured.
    pub fn provider_name(&self) -> Option<&str> {
        self.live.as_deref().map(|p| p.name())
    }

    /// Live provider, if configured and currently accepting requests.
    fn available_provider(&self) -> Option<&dyn MarketDataProvider> {
        self.live.as_deref().filter(|p| p.is_available())
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Current quote: live when possible, otherwise synthetic. Never fails.
    pub fn quote(&self, symbol: &Symbol) -> Quote {
        if let Some(provider) = self.available_provider() {
            match provider.quote(symbol) {
                Ok(quote) if quote.price.is_finite() && quote.price > 0.0 => return quote,
                Ok(quote) => tracing::warn!(
                    %symbol,
                    provider = provider.name(),
                    price = quote.price,
                    "live quote has no positive price, using synthetic quote"
                ),
                Err(e) => tracing::warn!(
                    %symbol,
                    provider = provider.name(),
                    error = %e,
                    "live quote failed, using synthetic quote"
                ),
            }
        }
        self.synthetic_quote(symbol)
    }

    /// Quote from the synthetic generator only (no network).
    pub fn synthetic_quote(&self, symbol: &Symbol) -> Quote {
        let mut rng = self.rng.rng_for(Stream::Quote, symbol);
        self.synthetic.quote(symbol, &mut rng)
    }

    /// Daily history over `period`: live when possible, otherwise synthetic.
    /// Never fails and never returns an empty series.
    pub fn history(&self, symbol: &Symbol, period: Period) -> HistorySeries {
        if let Some(provider) = self.available_provider() {
            match provider.history(symbol, period) {
                Ok(series) if !series.is_empty() && series.is_chronological() => return series,
                Ok(series) => tracing::warn!(
                    %symbol,
                    provider = provider.name(),
                    points = series.len(),
                    "live history is empty or out of order, using synthetic history"
                ),
                Err(e) => tracing::warn!(
                    %symbol,
                    provider = provider.name(),
                    error = %e,
                    "live history failed, using synthetic history"
                ),
            }
        }
        self.synthetic_history(symbol, period)
    }

    /// History from the synthetic generator only, ending today (UTC).
    pub fn synthetic_history(&self, symbol: &Symbol, period: Period) -> HistorySeries {
        let mut rng = self.rng.rng_for(Stream::History, symbol);
        self.synthetic.history(symbol, period, Self::today(), &mut rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Provenance;

    fn simulated() -> MarketEngine {
        MarketEngine::new(&EngineConfig::default().simulated().with_seed(1))
    }

    #[test]
    fn simulated_mode_has_no_provider() {
        assert_eq!(simulated().provider_name(), None);
    }

    #[test]
    fn simulated_quote_and_history() {
        let engine = simulated();
        let sym = Symbol::new("aapl");
        let quote = engine.quote(&sym);
        assert_eq!(quote.symbol.as_str(), "AAPL");
        assert_eq!(quote.source, Provenance::Simulated);

        let history = engine.history(&sym, Period::SixMonths);
        assert_eq!(history.len(), 180);
        assert_eq!(history.source, Provenance::Simulated);
        assert_eq!(history.points.last().unwrap().date, Utc::now().date_naive());
    }

    #[test]
    fn seeded_engine_is_reproducible() {
        let sym = Symbol::new("NEWCO");
        assert_eq!(simulated().quote(&sym), simulated().quote(&sym));
        assert_eq!(
            simulated().history(&sym, Period::OneYear).closes(),
            simulated().history(&sym, Period::OneYear).closes()
        );
    }
}
