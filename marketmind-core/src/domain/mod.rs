//! Domain types for MarketMind

pub mod history;
pub mod holding;
pub mod period;
pub mod quote;
pub mod symbol;

pub use history::{HistorySeries, PricePoint};
pub use holding::Holding;
pub use period::Period;
pub use quote::{Provenance, Quote};
pub use symbol::Symbol;

/// Round to two decimal places (prices, money amounts).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to one decimal place (percent-style statistics).
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to four decimal places (MACD).
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
