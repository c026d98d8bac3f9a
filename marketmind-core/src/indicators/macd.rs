//! MACD approximation from a backward-seeded EMA pair.
//!
//! Only the trailing window is used. Both EMAs start at the most recent close
//! and are then blended with each earlier close, walking backward:
//!   ema = close[n-1-i] * alpha + ema * (1 - alpha),  i = 1..window
//! This is not a streaming forward EMA; the backward recursion is the defined
//! behavior and its values differ from a textbook MACD.
//! MACD = EMA(alpha = 2/13) - EMA(alpha = 2/27)

/// Points in the trailing window (the seed plus 25 earlier closes).
pub const MACD_WINDOW: usize = 26;

pub const FAST_ALPHA: f64 = 2.0 / 13.0;
pub const SLOW_ALPHA: f64 = 2.0 / 27.0;

/// Backward-seeded EMA over the last `min(window, n)` closes. NaN for an empty series.
pub fn backward_ema(closes: &[f64], alpha: f64, window: usize) -> f64 {
    let n = closes.len();
    let Some(&last) = closes.last() else {
        return f64::NAN;
    };
    let mut ema = last;
    for i in 1..window.min(n) {
        ema = closes[n - 1 - i] * alpha + ema * (1.0 - alpha);
    }
    ema
}

/// Fast minus slow backward EMA over the trailing 26 points.
pub fn macd(closes: &[f64]) -> f64 {
    backward_ema(closes, FAST_ALPHA, MACD_WINDOW) - backward_ema(closes, SLOW_ALPHA, MACD_WINDOW)
}
