//! Synthetic quotes and price histories.
//!
//! Used whenever the live provider is disabled or fails. Quotes are drawn
//! around a per-symbol reference price; histories are a geometric random
//! walk starting from it. All randomness comes from the caller-supplied
//! generator, so seeded generators give reproducible output.

use crate::config::EngineConfig;
use crate::domain::{round2, HistorySeries, Period, PricePoint, Provenance, Quote, Symbol};
use chrono::{Duration, NaiveDate};
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};

/// Half-width of the synthetic daily move, in percent.
const MAX_DAILY_CHANGE_PCT: f64 = 3.5;
/// Base-price range for symbols missing from the reference table (quotes).
const UNKNOWN_BASE_RANGE: std::ops::Range<f64> = 100.0..1000.0;
/// Starting price for histories of symbols missing from the reference table.
const UNKNOWN_HISTORY_BASE: f64 = 150.0;

/// Floor for every synthetic price and close: one cent.
const MIN_PRICE: f64 = 0.01;

/// Per-step drift and volatility of the history walk.
const WALK_DRIFT: f64 = 0.0003;
const WALK_VOLATILITY: f64 = 0.018;

/// Synthetic market: immutable reference table plus listing rules.
#[derive(Debug, Clone)]
pub struct SyntheticMarket {
    reference_prices: BTreeMap<Symbol, f64>,
    nasdaq_symbols: BTreeSet<Symbol>,
}

impl SyntheticMarket {
    pub fn new(reference_prices: BTreeMap<Symbol, f64>, nasdaq_symbols: BTreeSet<Symbol>) -> Self {
        Self {
            reference_prices,
            nasdaq_symbols,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        let reference_prices = config
            .reference_prices
            .iter()
            .map(|(sym, &price)| (Symbol::new(sym), price))
            .collect();
        let nasdaq_symbols = config.nasdaq_symbols.iter().map(|s| Symbol::new(s)).collect();
        Self::new(reference_prices, nasdaq_symbols)
    }

    pub fn reference_price(&self, symbol: &Symbol) -> Option<f64> {
        self.reference_prices.get(symbol).copied()
    }

    /// Synthesize a quote around the symbol's reference price.
    pub fn quote<R: Rng + ?Sized>(&self, symbol: &Symbol, rng: &mut R) -> Quote {
        let base = self
            .reference_price(symbol)
            .unwrap_or_else(|| rng.gen_range(UNKNOWN_BASE_RANGE));
        let change_pct = rng.gen_range(-MAX_DAILY_CHANGE_PCT..=MAX_DAILY_CHANGE_PCT);
        let price = round2(base * (1.0 + change_pct / 100.0)).max(MIN_PRICE);
        let change = round2(price - base);

        let volume = rng.gen_range(8_000_000..=120_000_000u64);
        let shares_outstanding = rng.gen_range(500_000_000..=15_000_000_000u64);
        let market_cap = round2(price * shares_outstanding as f64 / 1e9);
        let pe = round2(rng.gen_range(12.0..=65.0));
        let week52_low = round2(price * rng.gen_range(0.6..=0.9));
        let week52_high = round2(price * rng.gen_range(1.05..=1.6));

        Quote {
            symbol: symbol.clone(),
            price,
            change,
            change_percent: round2(change_pct),
            volume,
            market_cap,
            pe,
            week52_low,
            week52_high,
            currency: symbol.currency().to_string(),
            exchange: symbol.exchange(&self.nasdaq_symbols).to_string(),
            long_name: None,
            sector: None,
            source: Provenance::Simulated,
        }
    }

    /// Synthesize a daily series of `period.synthetic_len()` points ending on `end`.
    pub fn history<R: Rng + ?Sized>(
        &self,
        symbol: &Symbol,
        period: Period,
        end: NaiveDate,
        rng: &mut R,
    ) -> HistorySeries {
        let len = period.synthetic_len();
        let base = self
            .reference_price(symbol)
            .unwrap_or(UNKNOWN_HISTORY_BASE);
        let closes = random_walk(base, len, rng);

        let points = closes
            .into_iter()
            .enumerate()
            .map(|(i, close)| PricePoint {
                date: end - Duration::days((len - 1 - i) as i64),
                close,
                volume: rng.gen_range(5_000_000..=80_000_000u64),
            })
            .collect();

        HistorySeries {
            symbol: symbol.clone(),
            points,
            source: Provenance::Simulated,
        }
    }
}

/// Geometric random walk: `close[i] = close[i-1] * (1 + N(drift, vol))`,
/// rounded to cents and never below one cent.
pub fn random_walk<R: Rng + ?Sized>(base: f64, len: usize, rng: &mut R) -> Vec<f64> {
    let mut closes = Vec::with_capacity(len);
    if len == 0 {
        return closes;
    }
    closes.push(round2(base).max(MIN_PRICE));
    for i in 1..len {
        let step = gaussian(rng, WALK_DRIFT, WALK_VOLATILITY);
        closes.push(round2(closes[i - 1] * (1.0 + step)).max(MIN_PRICE));
    }
    closes
}

/// Normal draw via the Box-Muller transform.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, std_dev: f64) -> f64 {
    // 1 - U keeps u1 in (0, 1] so ln(u1) is finite.
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}
