use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Closed set of indicator variants a strategy can configure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    /// Simple moving average
    Simple,
    /// Linearly weighted moving average
    Weighted,
    /// Exponential moving average seeded with an SMA
    Exponential,
    /// Relative strength index (Wilder smoothing)
    Rsi,
}

impl IndicatorKind {
    /// Short code used in names and logs
    pub fn code(&self) -> &'static str {
        match self {
            IndicatorKind::Simple => "SMA",
            IndicatorKind::Weighted => "WMA",
            IndicatorKind::Exponential => "EMA",
            IndicatorKind::Rsi => "RSI",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for IndicatorKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" | "sma" | "simplemovingaverage" => Ok(IndicatorKind::Simple),
            "weighted" | "wma" | "weightedmovingaverage" => Ok(IndicatorKind::Weighted),
            "exponential" | "ema" | "exponentialmovingaverage" => Ok(IndicatorKind::Exponential),
            "rsi" | "relativestrengthindex" => Ok(IndicatorKind::Rsi),
            _ => Err(ParseError::new("indicator type", s)),
        }
    }
}
