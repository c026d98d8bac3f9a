//! Relative Strength Index (RSI) over the trailing window.
//!
//! Simple (non-Wilder) averages of the last `min(period, n-1)` day-over-day
//! changes. Rises count as gains; everything else, flat days included,
//! counts toward losses. Both sums are divided by the window length, and the
//! average loss is floored at `MIN_AVG_LOSS` so an all-gains window yields
//! RSI close to 100 instead of dividing by zero.
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)

/// Floor for the average loss.
pub const MIN_AVG_LOSS: f64 = 0.001;

/// RSI of the most recent `period` changes. Returns 50 (no information) for
/// series with fewer than two points.
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    let n = closes.len();
    let window = period.min(n.saturating_sub(1));
    if window == 0 {
        return 50.0;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for pair in closes[n - window - 1..].windows(2) {
        let change = pair[1] - pair[0];
        if change > 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }

    let avg_gain = gains / window as f64;
    let avg_loss = (losses / window as f64).max(MIN_AVG_LOSS);
    100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
}
