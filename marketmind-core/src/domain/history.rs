//! Daily close/volume history for a single symbol.

use super::{Provenance, Symbol};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One trading day: date, close, volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
    pub volume: u64,
}

/// Chronologically ordered daily series.
///
/// Dates are strictly increasing. Series produced by the engine are never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySeries {
    pub symbol: Symbol,
    pub points: Vec<PricePoint>,
    pub source: Provenance,
}

impl HistorySeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Close prices in date order (input to the indicator engine).
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    pub fn last_close(&self) -> Option<f64> {
        self.points.last().map(|p| p.close)
    }

    /// True if every date is strictly after the previous one.
    pub fn is_chronological(&self) -> bool {
        self.points.windows(2).all(|w| w[0].date < w[1].date)
    }
}
