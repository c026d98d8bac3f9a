//! Caller-supplied portfolio position.

use super::Symbol;
use serde::{Deserialize, Serialize};

/// A position the caller holds. Quantity and cost basis are expected to be
/// non-negative numbers; the engine does not own or persist holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: Symbol,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub avg_cost: f64,
}

impl Holding {
    pub fn new(symbol: &str, quantity: f64, avg_cost: f64) -> Self {
        Self {
            symbol: Symbol::new(symbol),
            quantity,
            avg_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_format() {
        let h: Holding =
            serde_json::from_str(r#"{"symbol":"aapl","quantity":10,"avgCost":150}"#).unwrap();
        assert_eq!(h, Holding::new("AAPL", 10.0, 150.0));
    }

    #[test]
    fn missing_numbers_default_to_zero() {
        let h: Holding = serde_json::from_str(r#"{"symbol":"MSFT"}"#).unwrap();
        assert_eq!(h.quantity, 0.0);
        assert_eq!(h.avg_cost, 0.0);
    }
}
