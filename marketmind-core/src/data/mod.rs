//! Market data acquisition: live provider, circuit breaker, synthetic generator

pub mod circuit_breaker;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use circuit_breaker::CircuitBreaker;
pub use provider::{DataError, MarketDataProvider};
pub use synthetic::SyntheticMarket;
pub use yahoo::YahooProvider;
