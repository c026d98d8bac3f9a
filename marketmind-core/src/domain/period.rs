//! Lookback period for history requests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Requested history window.
///
/// Parsing never fails: unrecognized strings resolve to the default (`3mo`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1mo")]
    OneMonth,
    #[default]
    #[serde(rename = "3mo")]
    ThreeMonths,
    #[serde(rename = "6mo")]
    SixMonths,
    #[serde(rename = "1y")]
    OneYear,
}

impl Period {
    /// Parse a period string; anything unrecognized is the default period.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "1mo" => Self::OneMonth,
            "3mo" => Self::ThreeMonths,
            "6mo" => Self::SixMonths,
            "1y" => Self::OneYear,
            _ => Self::default(),
        }
    }

    /// Range parameter understood by the live provider.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneMonth => "1mo",
            Self::ThreeMonths => "3mo",
            Self::SixMonths => "6mo",
            Self::OneYear => "1y",
        }
    }

    /// Number of points in a synthetic series.
    ///
    /// `1mo` shares the default length so that the 50-point SMA window is
    /// always filled for portfolio signals.
    pub const fn synthetic_len(self) -> usize {
        match self {
            Self::OneMonth | Self::ThreeMonths => 90,
            Self::SixMonths => 180,
            Self::OneYear => 252,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
