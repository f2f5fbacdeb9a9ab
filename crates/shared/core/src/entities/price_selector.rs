use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Which price of a candle feeds an indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PriceSelector {
    Open,
    High,
    Low,
    #[default]
    Close,
    /// (high + low) / 2
    Median,
}

impl PriceSelector {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceSelector::Open => "Open",
            PriceSelector::High => "High",
            PriceSelector::Low => "Low",
            PriceSelector::Close => "Close",
            PriceSelector::Median => "Median",
        }
    }
}

impl fmt::Display for PriceSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceSelector {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" | "o" => Ok(PriceSelector::Open),
            "high" | "h" => Ok(PriceSelector::High),
            "low" | "l" => Ok(PriceSelector::Low),
            "close" | "c" => Ok(PriceSelector::Close),
            "median" | "m" => Ok(PriceSelector::Median),
            _ => Err(ParseError::new("price selector", s)),
        }
    }
}
