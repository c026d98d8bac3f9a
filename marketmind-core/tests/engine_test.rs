//! Integration tests for live/synthetic resolution and the engine operations.
//!
//! Stub providers stand in for the network:
//! - `FixedProvider` returns a known AAPL quote and a rising history
//! - `FailingProvider` fails every call
//! - `CountingProvider` counts calls and can report itself unavailable

use chrono::{Duration, NaiveDate};
use marketmind_core::data::{DataError, MarketDataProvider};
use marketmind_core::{
    EngineConfig, HistorySeries, Holding, MarketEngine, Period, PricePoint, Provenance, Quote,
    Signal, Symbol,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ── Stub providers ───────────────────────────────────────────────────

struct FixedProvider {
    history_len: usize,
}

impl FixedProvider {
    fn quote_for(symbol: &Symbol) -> Quote {
        Quote {
            symbol: symbol.clone(),
            price: 189.30,
            change: 2.10,
            change_percent: 1.12,
            volume: 52_000_000,
            market_cap: 0.0,
            pe: 0.0,
            week52_low: 164.08,
            week52_high: 199.62,
            currency: "USD".into(),
            exchange: "NMS".into(),
            long_name: Some("Apple Inc.".into()),
            sector: Some("Unknown".into()),
            source: Provenance::Live,
        }
    }
}

impl MarketDataProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    fn quote(&self, symbol: &Symbol) -> Result<Quote, DataError> {
        Ok(Self::quote_for(symbol))
    }

    fn history(&self, symbol: &Symbol, _period: Period) -> Result<HistorySeries, DataError> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let points = (0..self.history_len)
            .map(|i| PricePoint {
                date: start + Duration::days(i as i64),
                close: 150.0 + i as f64,
                volume: 1_000_000,
            })
            .collect();
        Ok(HistorySeries {
            symbol: symbol.clone(),
            points,
            source: Provenance::Live,
        })
    }

    fn is_available(&self) -> bool {
        true
    }
}

struct FailingProvider;

impl MarketDataProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    fn quote(&self, _symbol: &Symbol) -> Result<Quote, DataError> {
        Err(DataError::NetworkUnreachable("connection refused".into()))
    }

    fn history(&self, symbol: &Symbol, _period: Period) -> Result<HistorySeries, DataError> {
        Err(DataError::SymbolNotFound {
            symbol: symbol.to_string(),
        })
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[derive(Default)]
struct CountingProvider {
    calls: AtomicUsize,
    available: bool,
}

impl CountingProvider {
    fn available() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            available: true,
        }
    }
}

impl MarketDataProvider for CountingProvider {
    fn name(&self) -> &str {
        "counting"
    }

    fn quote(&self, symbol: &Symbol) -> Result<Quote, DataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FixedProvider::quote_for(symbol))
    }

    fn history(&self, _symbol: &Symbol, _period: Period) -> Result<HistorySeries, DataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DataError::CircuitBreakerTripped)
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

fn config() -> EngineConfig {
    EngineConfig::default().with_seed(42)
}

fn engine_with(provider: impl MarketDataProvider + 'static) -> MarketEngine {
    MarketEngine::with_provider(&config(), Arc::new(provider))
}

// ── Resolution ───────────────────────────────────────────────────────

#[test]
fn live_quote_passes_through() {
    let engine = engine_with(FixedProvider { history_len: 30 });
    let quote = engine.quote(&Symbol::new("aapl"));
    assert_eq!(quote.source, Provenance::Live);
    assert_eq!(quote.price, 189.30);
    assert_eq!(quote.long_name.as_deref(), Some("Apple Inc."));
    assert_eq!(engine.provider_name(), Some("fixed"));
}

#[test]
fn failing_provider_falls_back_to_synthetic() {
    let engine = engine_with(FailingProvider);
    let sym = Symbol::new("RELIANCE.NS");

    let quote = engine.quote(&sym);
    assert_eq!(quote.source, Provenance::Simulated);
    assert!(quote.price > 0.0);
    assert_eq!(quote.currency, "INR");
    assert_eq!(quote.exchange, "NSE");

    let history = engine.history(&sym, Period::SixMonths);
    assert_eq!(history.source, Provenance::Simulated);
    assert_eq!(history.len(), 180);
    assert!(history.is_chronological());
}

#[test]
fn empty_live_history_falls_back() {
    let engine = engine_with(FixedProvider { history_len: 0 });
    let history = engine.history(&Symbol::new("AAPL"), Period::OneYear);
    assert_eq!(history.source, Provenance::Simulated);
    assert_eq!(history.len(), 252);
}

#[test]
fn unavailable_provider_is_never_called() {
    let provider = Arc::new(CountingProvider::default());
    let engine = MarketEngine::with_provider(&config(), provider.clone());
    let sym = Symbol::new("MSFT");

    assert_eq!(engine.quote(&sym).source, Provenance::Simulated);
    assert_eq!(engine.history(&sym, Period::ThreeMonths).source, Provenance::Simulated);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn currency_and_exchange_rules() {
    let engine = MarketEngine::new(&config().simulated());
    let cases = [
        ("INFY.NS", "INR", "NSE"),
        ("NVDA", "USD", "NASDAQ"),
        ("JPM", "USD", "NYSE"),
        ("unknownco", "USD", "NYSE"),
    ];
    for (raw, currency, exchange) in cases {
        let quote = engine.quote(&Symbol::new(raw));
        assert_eq!(quote.currency, currency, "{raw}");
        assert_eq!(quote.exchange, exchange, "{raw}");
    }
}

#[test]
fn synthetic_history_lengths() {
    let engine = MarketEngine::new(&config().simulated());
    let sym = Symbol::new("GOOGL");
    for (raw, len) in [("1mo", 90), ("3mo", 90), ("6mo", 180), ("1y", 252), ("5y", 90)] {
        let history = engine.history(&sym, Period::parse(raw));
        assert_eq!(history.len(), len, "{raw}");
        assert!(history.is_chronological());
    }
}

// ── Analysis ─────────────────────────────────────────────────────────

#[test]
fn analysis_on_live_data() {
    let engine = engine_with(FixedProvider { history_len: 30 });
    let report = engine.analyze(&Symbol::new("AAPL"), Period::ThreeMonths);

    assert_eq!(report.quote.source, Provenance::Live);
    assert_eq!(report.history.len(), 30);
    // Closes 150..=179: trailing-20 low is 160, high 179.
    assert_eq!(report.support, 158.4);
    assert_eq!(report.resistance, 180.79);
    // Steady climb: above both SMAs but overbought with negative MACD.
    let stats = report.indicators.stats.as_ref().unwrap();
    assert_eq!(stats.score, -1);
    assert_eq!(report.indicators.signal, Signal::Sell);
}

#[test]
fn analysis_with_short_live_history_is_neutral() {
    let engine = engine_with(FixedProvider { history_len: 10 });
    let report = engine.analyze(&Symbol::new("AAPL"), Period::OneMonth);

    assert_eq!(report.indicators.signal, Signal::Hold);
    assert_eq!(report.indicators.confidence, 50.0);
    assert_eq!(report.indicators.predicted_price, 159.0);
    assert_eq!(report.support, 151.05);
    assert_eq!(report.resistance, 166.95);
}

// ── Portfolio ────────────────────────────────────────────────────────

#[test]
fn portfolio_with_live_quote() {
    let engine = engine_with(FixedProvider { history_len: 30 });
    let report = engine.portfolio(&[Holding::new("AAPL", 10.0, 150.0)]);

    let h = &report.holdings[0];
    assert_eq!(h.current_price, 189.30);
    assert_eq!(h.current_value, 1893.0);
    assert_eq!(h.pnl, 393.0);
    assert_eq!(h.pnl_percent, 26.2);
    assert_eq!(report.total_value, 1893.0);
    assert_eq!(report.total_cost, 1500.0);
    assert_eq!(report.total_pnl, 393.0);
    assert_eq!(report.total_pnl_percent, 26.2);
}

#[test]
fn empty_portfolio_is_all_zero() {
    let engine = engine_with(FailingProvider);
    let report = engine.portfolio(&[]);
    assert!(report.holdings.is_empty());
    assert_eq!(report.total_value, 0.0);
    assert_eq!(report.total_cost, 0.0);
    assert_eq!(report.total_pnl, 0.0);
    assert_eq!(report.total_pnl_percent, 0.0);
}

#[test]
fn ticker_strip_ignores_live_provider() {
    let provider = Arc::new(CountingProvider::available());
    let engine = MarketEngine::with_provider(&config(), provider.clone());
    let strip = engine.default_ticker_strip();
    assert_eq!(strip.len(), 10);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

    // The same provider is consulted for regular quotes.
    assert_eq!(engine.quote(&Symbol::new("AAPL")).source, Provenance::Live);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}
