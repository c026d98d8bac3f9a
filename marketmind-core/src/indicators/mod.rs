//! Technical indicators over a close-price series.
//!
//! Every function here is pure and reads only the trailing window it needs,
//! returning a single value for the most recent point. Windows shrink
//! gracefully when the series is shorter than the nominal period.

pub mod macd;
pub mod momentum;
pub mod rsi;
pub mod sma;
pub mod volatility;

pub use macd::{backward_ema, macd};
pub use momentum::momentum;
pub use rsi::rsi;
pub use sma::trailing_mean;
pub use volatility::annualized_volatility;

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
