//! Quote: point-in-time price snapshot.

use super::Symbol;
use serde::{Deserialize, Serialize};

/// Where a quote or history series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Live,
    Simulated,
}

/// Current price snapshot for a symbol.
///
/// `price` is always positive. `change_percent` is `change / previous_close * 100`
/// when the previous close is known and non-zero, else 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub symbol: Symbol,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    /// Market capitalization in billions.
    pub market_cap: f64,
    pub pe: f64,
    #[serde(rename = "week52Low")]
    pub week52_low: f64,
    #[serde(rename = "week52High")]
    pub week52_high: f64,
    pub currency: String,
    pub exchange: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    pub source: Provenance,
}
