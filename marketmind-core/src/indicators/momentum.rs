//! Short-horizon momentum: fractional change from `closes[n - lookback]` to the last close.

/// `(last - closes[n - lookback]) / closes[n - lookback]`, or 0 when the series
/// is shorter than `lookback` or the reference close is zero.
pub fn momentum(closes: &[f64], lookback: usize) -> f64 {
    let n = closes.len();
    if lookback == 0 || n < lookback {
        return 0.0;
    }
    let reference = closes[n - lookback];
    if reference == 0.0 {
        return 0.0;
    }
    (closes[n - 1] - reference) / reference
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, DEFAULT_EPSILON};

    #[test]
    fn five_point_lookback() {
        // closes[n-5] = 100, last = 110
        let closes = [90.0, 100.0, 101.0, 102.0, 103.0, 110.0];
        assert_approx(momentum(&closes, 5), 0.1, DEFAULT_EPSILON);
    }

    #[test]
    fn short_series_is_zero() {
        assert_eq!(momentum(&[1.0, 2.0, 3.0, 4.0], 5), 0.0);
    }

    #[test]
    fn zero_reference_is_zero() {
        assert_eq!(momentum(&[0.0, 1.0, 2.0, 3.0, 4.0], 5), 0.0);
    }
}
