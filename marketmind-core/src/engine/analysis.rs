//! Full per-symbol analysis: quote, history, indicators, sentiment and a
//! support/resistance band.

use super::MarketEngine;
use crate::domain::{round2, HistorySeries, Period, Quote, Symbol};
use crate::rng::Stream;
use crate::sentiment::{compute_sentiment, SentimentReport};
use crate::signal::{compute_signal, IndicatorReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Closes considered for the support/resistance band.
const BAND_WINDOW: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub quote: Quote,
    pub history: HistorySeries,
    pub indicators: IndicatorReport,
    pub sentiment: SentimentReport,
    pub support: f64,
    pub resistance: f64,
    pub timestamp: DateTime<Utc>,
}

/// Support and resistance from a close series.
///
/// With at least 20 closes: 1% below the trailing-20 low and 1% above the
/// trailing-20 high. Otherwise ±5% around the last close. Empty input gives (0, 0).
pub fn support_resistance(closes: &[f64]) -> (f64, f64) {
    let Some(&last) = closes.last() else {
        return (0.0, 0.0);
    };
    if closes.len() < BAND_WINDOW {
        return (round2(last * 0.95), round2(last * 1.05));
    }
    let recent = &closes[closes.len() - BAND_WINDOW..];
    let low = recent.iter().copied().fold(f64::INFINITY, f64::min);
    let high = recent.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (round2(low * 0.99), round2(high * 1.01))
}

impl MarketEngine {
    /// Analyze one symbol over `period`. Always produces a report.
    pub fn analyze(&self, symbol: &Symbol, period: Period) -> AnalysisReport {
        let quote = self.quote(symbol);
        let history = self.history(symbol, period);
        let closes = history.closes();

        let indicators = compute_signal(&closes);
        let sentiment = compute_sentiment(&mut self.rng.rng_for(Stream::Sentiment, symbol));
        let (support, resistance) = support_resistance(&closes);

        tracing::debug!(
            %symbol,
            %period,
            points = closes.len(),
            signal = %indicators.signal,
            "analysis complete"
        );

        AnalysisReport {
            quote,
            history,
            indicators,
            sentiment,
            support,
            resistance,
            timestamp: Utc::now(),
        }
    }
}
