//! Simple Moving Average (SMA) of the trailing window.
//!
//! When fewer than `window` closes exist, the mean covers all of them.

/// Mean of the last `min(window, n)` closes. NaN for an empty series.
pub fn trailing_mean(closes: &[f64], window: usize) -> f64 {
    let take = window.min(closes.len());
    if take == 0 {
        return f64::NAN;
    }
    let tail = &closes[closes.len() - take..];
    tail.iter().sum::<f64>() / take as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn uses_only_trailing_window() {
        let closes = [10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0];
        // mean(12..=16) = 14.0
        assert_approx(trailing_mean(&closes, 5), 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn short_series_uses_all_points() {
        let closes = [100.0, 200.0, 300.0];
        assert_approx(trailing_mean(&closes, 50), 200.0, DEFAULT_EPSILON);
    }

    #[test]
    fn window_of_one_is_last_close() {
        assert_approx(trailing_mean(&[1.0, 2.0, 9.5], 1), 9.5, DEFAULT_EPSILON);
    }

    #[test]
    fn empty_series_is_nan() {
        assert!(trailing_mean(&[], 20).is_nan());
        assert!(trailing_mean(&[1.0], 0).is_nan());
    }
}
