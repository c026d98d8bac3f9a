//! Symbol: normalized ticker with listing rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Suffix marking an instrument listed on India's National Stock Exchange.
const NSE_SUFFIX: &str = ".NS";

/// Case-insensitive ticker, stored trimmed and uppercased.
///
/// No existence check is made: any string is a valid symbol, and unknown
/// symbols resolve through the synthetic data path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `.NS` instruments (INR, NSE).
    pub fn is_nse(&self) -> bool {
        self.0.ends_with(NSE_SUFFIX)
    }

    pub fn currency(&self) -> &'static str {
        if self.is_nse() {
            "INR"
        } else {
            "USD"
        }
    }

    /// Listing exchange: NSE for `.NS`, NASDAQ for the given technology set, else NYSE.
    pub fn exchange(&self, nasdaq_symbols: &BTreeSet<Symbol>) -> &'static str {
        if self.is_nse() {
            "NSE"
        } else if nasdaq_symbols.contains(self) {
            "NASDAQ"
        } else {
            "NYSE"
        }
    }
}

impl From<String> for Symbol {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for Symbol {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nasdaq() -> BTreeSet<Symbol> {
        ["AAPL", "MSFT"].iter().map(|s| Symbol::new(s)).collect()
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        assert_eq!(Symbol::new("  aapl ").as_str(), "AAPL");
        assert_eq!(Symbol::new("reliance.ns"), Symbol::new("RELIANCE.NS"));
    }

    #[test]
    fn nse_suffix_sets_currency_and_exchange() {
        let sym = Symbol::new("tcs.ns");
        assert!(sym.is_nse());
        assert_eq!(sym.currency(), "INR");
        assert_eq!(sym.exchange(&nasdaq()), "NSE");
    }

    #[test]
    fn us_listing_rules() {
        assert_eq!(Symbol::new("AAPL").currency(), "USD");
        assert_eq!(Symbol::new("AAPL").exchange(&nasdaq()), "NASDAQ");
        assert_eq!(Symbol::new("BABA").exchange(&nasdaq()), "NYSE");
    }

    #[test]
    fn deserialization_normalizes() {
        let sym: Symbol = serde_json::from_str("\" nvda\"").unwrap();
        assert_eq!(sym.as_str(), "NVDA");
        assert_eq!(serde_json::to_string(&sym).unwrap(), "\"NVDA\"");
    }
}
