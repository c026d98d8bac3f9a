//! Composite trading signal from a close-price series.
//!
//! Four indicators vote into an integer score:
//! - +1 if the last close is above SMA20
//! - +1 if SMA20 is above SMA50
//! - +2 if RSI14 < 35 (oversold), -2 if RSI14 > 65 (overbought)
//! - +1 if MACD > 0, else -1
//!
//! The score maps to one of five signal classes with a capped confidence.
//! Series shorter than `MIN_POINTS` get a neutral HOLD.

use crate::domain::{round1, round2, round4};
use crate::indicators::{annualized_volatility, macd, momentum, rsi, trailing_mean};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fewest closes for which indicators are computed.
pub const MIN_POINTS: usize = 20;

const SMA_SHORT: usize = 20;
const SMA_LONG: usize = 50;
const RSI_PERIOD: usize = 14;
const VOLATILITY_WINDOW: usize = 20;
const MOMENTUM_LOOKBACK: usize = 5;

const RSI_OVERSOLD: f64 = 35.0;
const RSI_OVERBOUGHT: f64 = 65.0;

/// Weight of momentum in the predicted price, plus a constant drift.
const MOMENTUM_WEIGHT: f64 = 0.3;
const PREDICTION_DRIFT: f64 = 0.002;

/// Trading signal classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    #[serde(rename = "STRONG BUY")]
    StrongBuy,
    #[serde(rename = "BUY")]
    Buy,
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "STRONG SELL")]
    StrongSell,
}

impl Signal {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StrongBuy => "STRONG BUY",
            Self::Buy => "BUY",
            Self::Hold => "HOLD",
            Self::Sell => "SELL",
            Self::StrongSell => "STRONG SELL",
        }
    }

    /// Upper bound on confidence for this class.
    pub const fn confidence_cap(self) -> f64 {
        match self {
            Self::StrongBuy => 92.0,
            Self::Buy => 80.0,
            Self::Hold => 55.0,
            Self::Sell => 75.0,
            Self::StrongSell => 88.0,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supporting statistics behind a signal (rounded for display).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorStats {
    pub rsi: f64,
    pub sma20: f64,
    pub sma50: f64,
    pub macd: f64,
    /// Annualized volatility in percent.
    pub volatility: f64,
    pub score: i32,
}

/// Output of the indicator engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReport {
    pub signal: Signal,
    pub confidence: f64,
    pub predicted_price: f64,
    /// Absent for the neutral default on short series.
    #[serde(flatten)]
    pub stats: Option<IndicatorStats>,
}

impl IndicatorReport {
    /// HOLD at confidence 50, predicting no change.
    pub fn neutral(last_close: f64) -> Self {
        Self {
            signal: Signal::Hold,
            confidence: 50.0,
            predicted_price: last_close,
            stats: None,
        }
    }
}

/// Map a composite score to a signal class and confidence (first match wins).
pub fn classify(score: i32) -> (Signal, f64) {
    let magnitude = f64::from(score.abs());
    if score >= 3 {
        let signal = Signal::StrongBuy;
        (signal, (70.0 + magnitude * 4.0).min(signal.confidence_cap()))
    } else if score >= 1 {
        let signal = Signal::Buy;
        (signal, (60.0 + magnitude * 5.0).min(signal.confidence_cap()))
    } else if score <= -3 {
        let signal = Signal::StrongSell;
        (signal, (68.0 + magnitude * 4.0).min(signal.confidence_cap()))
    } else if score <= -1 {
        let signal = Signal::Sell;
        (signal, (58.0 + magnitude * 5.0).min(signal.confidence_cap()))
    } else {
        (Signal::Hold, Signal::Hold.confidence_cap())
    }
}

/// Composite score from raw (unrounded) indicator values.
pub fn composite_score(last: f64, sma20: f64, sma50: f64, rsi: f64, macd: f64) -> i32 {
    let mut score = 0;
    if last > sma20 {
        score += 1;
    }
    if sma20 > sma50 {
        score += 1;
    }
    if rsi < RSI_OVERSOLD {
        score += 2;
    } else if rsi > RSI_OVERBOUGHT {
        score -= 2;
    }
    if macd > 0.0 {
        score += 1;
    } else {
        score -= 1;
    }
    score
}

/// Compute indicators, signal, confidence and predicted next close.
///
/// Pure: identical input always produces an identical report.
pub fn compute_signal(closes: &[f64]) -> IndicatorReport {
    let Some(&last) = closes.last() else {
        return IndicatorReport::neutral(0.0);
    };
    if closes.len() < MIN_POINTS {
        return IndicatorReport::neutral(last);
    }

    let sma20 = trailing_mean(closes, SMA_SHORT);
    let sma50 = trailing_mean(closes, SMA_LONG);
    let rsi = rsi(closes, RSI_PERIOD);
    let macd = macd(closes);
    let volatility = annualized_volatility(closes, VOLATILITY_WINDOW);

    let score = composite_score(last, sma20, sma50, rsi, macd);
    let (signal, confidence) = classify(score);

    let momentum = momentum(closes, MOMENTUM_LOOKBACK);
    let predicted = last * (1.0 + momentum * MOMENTUM_WEIGHT + PREDICTION_DRIFT);

    IndicatorReport {
        signal,
        confidence: round1(confidence),
        predicted_price: round2(predicted),
        stats: Some(IndicatorStats {
            rsi: round1(rsi),
            sma20: round2(sma20),
            sma50: round2(sma50),
            macd: round4(macd),
            volatility: round1(volatility),
            score,
        }),
    }
}
