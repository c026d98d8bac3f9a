//! Portfolio valuation: per-holding P&L plus a signal, rolled up into totals.

use super::MarketEngine;
use crate::domain::{round2, Holding, Period, Quote, Symbol};
use crate::signal::{compute_signal, IndicatorReport, Signal};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// History window used for per-holding signals.
const SIGNAL_PERIOD: Period = Period::OneMonth;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingReport {
    pub symbol: Symbol,
    pub quantity: f64,
    pub avg_cost: f64,
    pub current_price: f64,
    pub current_value: f64,
    pub pnl: f64,
    pub pnl_percent: f64,
    pub signal: Signal,
    pub confidence: f64,
    pub change: f64,
    pub change_percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioReport {
    pub holdings: Vec<HoldingReport>,
    pub total_value: f64,
    pub total_cost: f64,
    pub total_pnl: f64,
    pub total_pnl_percent: f64,
}

fn pnl_percent(pnl: f64, cost: f64) -> f64 {
    if cost > 0.0 {
        pnl / cost * 100.0
    } else {
        0.0
    }
}

/// Valued holding with unrounded amounts kept for the totals.
struct Position {
    report: HoldingReport,
    value: f64,
    cost: f64,
}

fn value_position(holding: &Holding, quote: &Quote, indicators: &IndicatorReport) -> Position {
    let value = quote.price * holding.quantity;
    let cost = holding.avg_cost * holding.quantity;
    let pnl = value - cost;

    Position {
        report: HoldingReport {
            symbol: holding.symbol.clone(),
            quantity: holding.quantity,
            avg_cost: holding.avg_cost,
            current_price: quote.price,
            current_value: round2(value),
            pnl: round2(pnl),
            pnl_percent: round2(pnl_percent(pnl, cost)),
            signal: indicators.signal,
            confidence: indicators.confidence,
            change: quote.change,
            change_percent: quote.change_percent,
        },
        value,
        cost,
    }
}

impl PortfolioReport {
    /// Build a report from already-resolved quotes and signals, in input order.
    pub fn from_parts<'a, I>(parts: I) -> Self
    where
        I: IntoIterator<Item = (&'a Holding, &'a Quote, &'a IndicatorReport)>,
    {
        let positions: Vec<Position> = parts
            .into_iter()
            .map(|(holding, quote, indicators)| value_position(holding, quote, indicators))
            .collect();
        Self::from_positions(positions)
    }

    fn from_positions(positions: Vec<Position>) -> Self {
        let value: f64 = positions.iter().map(|p| p.value).sum();
        let cost: f64 = positions.iter().map(|p| p.cost).sum();
        let total_value = round2(value);
        let total_cost = round2(cost);

        Self {
            holdings: positions.into_iter().map(|p| p.report).collect(),
            total_value,
            total_cost,
            total_pnl: round2(total_value - total_cost),
            total_pnl_percent: round2(pnl_percent(value - cost, cost)),
        }
    }
}

impl MarketEngine {
    /// Value every holding in parallel and roll up totals. Output order
    /// matches input order; an empty slice gives an all-zero report.
    pub fn portfolio(&self, holdings: &[Holding]) -> PortfolioReport {
        let positions: Vec<Position> = holdings
            .par_iter()
            .map(|holding| {
                let quote = self.quote(&holding.symbol);
                let history = self.history(&holding.symbol, SIGNAL_PERIOD);
                let indicators = compute_signal(&history.closes());
                value_position(holding, &quote, &indicators)
            })
            .collect();

        tracing::debug!(holdings = positions.len(), "portfolio valued");
        PortfolioReport::from_positions(positions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::domain::Provenance;

    fn quote(symbol: &str, price: f64) -> Quote {
        let symbol = Symbol::new(symbol);
        Quote {
            currency: symbol.currency().to_string(),
            symbol,
            price,
            change: 1.5,
            change_percent: 0.8,
            volume: 1_000_000,
            market_cap: 0.0,
            pe: 0.0,
            week52_low: price * 0.8,
            week52_high: price * 1.2,
            exchange: "NASDAQ".to_string(),
            long_name: None,
            sector: None,
            source: Provenance::Live,
        }
    }

    #[test]
    fn single_holding_example() {
        let holding = Holding::new("AAPL", 10.0, 150.0);
        let q = quote("AAPL", 189.30);
        let indicators = IndicatorReport::neutral(189.30);
        let report = PortfolioReport::from_parts([(&holding, &q, &indicators)]);

        let h = &report.holdings[0];
        assert_eq!(h.current_value, 1893.0);
        assert_eq!(h.pnl, 393.0);
        assert_eq!(h.pnl_percent, 26.2);
        assert_eq!(h.signal, Signal::Hold);
        assert_eq!(report.total_value, 1893.0);
        assert_eq!(report.total_cost, 1500.0);
        assert_eq!(report.total_pnl, 393.0);
        assert_eq!(report.total_pnl_percent, 26.2);
    }

    #[test]
    fn zero_cost_has_zero_percent() {
        let holding = Holding::new("GIFT", 5.0, 0.0);
        let q = quote("GIFT", 20.0);
        let indicators = IndicatorReport::neutral(20.0);
        let report = PortfolioReport::from_parts([(&holding, &q, &indicators)]);

        assert_eq!(report.holdings[0].pnl_percent, 0.0);
        assert_eq!(report.total_cost, 0.0);
        assert_eq!(report.total_pnl, 100.0);
        assert_eq!(report.total_pnl_percent, 0.0);
    }

    #[test]
    fn empty_portfolio_is_zero() {
        let engine = MarketEngine::new(&EngineConfig::default().simulated().with_seed(5));
        assert_eq!(engine.portfolio(&[]), PortfolioReport::default());
    }

    #[test]
    fn parallel_valuation_keeps_order() {
        let engine = MarketEngine::new(&EngineConfig::default().simulated().with_seed(5));
        let holdings: Vec<Holding> = ["NVDA", "AAPL", "INFY.NS", "ZZZ", "MSFT"]
            .iter()
            .map(|s| Holding::new(s, 2.0, 100.0))
            .collect();
        let report = engine.portfolio(&holdings);

        let symbols: Vec<&str> = report.holdings.iter().map(|h| h.symbol.as_str()).collect();
        assert_eq!(symbols, ["NVDA", "AAPL", "INFY.NS", "ZZZ", "MSFT"]);
        assert_eq!(report.total_cost, 1000.0);
        assert!((report.total_pnl - (report.total_value - report.total_cost)).abs() < 0.011);
    }

    #[test]
    fn wire_names_are_camel_case() {
        let holding = Holding::new("AAPL", 1.0, 1.0);
        let q = quote("AAPL", 2.0);
        let indicators = IndicatorReport::neutral(2.0);
        let json = serde_json::to_value(PortfolioReport::from_parts([(&holding, &q, &indicators)])).unwrap();
        assert!(json.get("totalPnlPercent").is_some());
        assert!(json["holdings"][0].get("avgCost").is_some());
        assert!(json["holdings"][0].get("currentValue").is_some());
        assert_eq!(json["holdings"][0]["signal"], "HOLD");
    }
}
