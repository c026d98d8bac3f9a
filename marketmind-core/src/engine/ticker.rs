//! Ticker strip: a cheap batch of synthetic quotes for display.

use super::MarketEngine;
use crate::domain::Symbol;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerEntry {
    pub symbol: Symbol,
    pub price: f64,
    pub change_percent: f64,
}

impl MarketEngine {
    /// One entry per symbol, in input order. Never touches the network.
    pub fn ticker_strip(&self, symbols: &[Symbol]) -> Vec<TickerEntry> {
        symbols
            .iter()
            .map(|symbol| {
                let quote = self.synthetic_quote(symbol);
                TickerEntry {
                    symbol: quote.symbol,
                    price: quote.price,
                    change_percent: quote.change_percent,
                }
            })
            .collect()
    }

    /// Ticker strip over the configured symbol list.
    pub fn default_ticker_strip(&self) -> Vec<TickerEntry> {
        self.ticker_strip(&self.ticker_symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;

    #[test]
    fn default_strip_covers_configured_symbols() {
        let engine = MarketEngine::new(&EngineConfig::default().simulated().with_seed(2));
        let strip = engine.default_ticker_strip();
        assert_eq!(strip.len(), 10);
        assert_eq!(strip[0].symbol.as_str(), "AAPL");
        assert_eq!(strip[9].symbol.as_str(), "INFY.NS");
        assert!(strip.iter().all(|e| e.price > 0.0 && e.change_percent.abs() <= 3.5));
    }

    #[test]
    fn custom_strip_keeps_order() {
        let engine = MarketEngine::new(&EngineConfig::default().simulated());
        let symbols = [Symbol::new("tsla"), Symbol::new("wipro.ns")];
        let strip = engine.ticker_strip(&symbols);
        assert_eq!(strip[0].symbol.as_str(), "TSLA");
        assert_eq!(strip[1].symbol.as_str(), "WIPRO.NS");
    }

    #[test]
    fn entry_wire_names() {
        let entry = TickerEntry {
            symbol: Symbol::new("AAPL"),
            price: 189.3,
            change_percent: 1.1,
        };
        let json = serde_json::to_value(entry).unwrap();
        assert_eq!(json["changePercent"], 1.1);
        assert_eq!(json["symbol"], "AAPL");
    }
}
