//! Annualized realized volatility.
//!
//! Simple daily returns over the trailing `min(window, n-1)` points; sample
//! standard deviation (n - 1 divisor) scaled by sqrt(252), in percent.

/// Trading days per year used for annualization.
pub const TRADING_DAYS: f64 = 252.0;

/// Annualized volatility in percent. Zero when fewer than two returns exist.
pub fn annualized_volatility(closes: &[f64], window: usize) -> f64 {
    let n = closes.len();
    let count = window.min(n.saturating_sub(1));
    if count < 2 {
        return 0.0;
    }

    let returns: Vec<f64> = closes[n - count - 1..]
        .windows(2)
        .map(|pair| {
            if pair[0] == 0.0 {
                0.0
            } else {
                (pair[1] - pair[0]) / pair[0]
            }
        })
        .collect();

    let mean = returns.iter().sum::<f64>() / count as f64;
    let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
    variance.sqrt() * TRADING_DAYS.sqrt() * 100.0
}
