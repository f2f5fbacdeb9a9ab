use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::values::Timestamp;

/// Duration each candlestick represents, using broker granularity codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Granularity {
    S5,
    S10,
    S15,
    S30,
    M1,
    M2,
    M4,
    M5,
    M10,
    M15,
    #[default]
    M30,
    H1,
    H2,
    H3,
    H4,
    H6,
    H8,
    H12,
    /// Daily
    D,
}

impl Granularity {
    /// Period length in seconds
    pub fn seconds(&self) -> i64 {
        match self {
            Granularity::S5 => 5,
            Granularity::S10 => 10,
            Granularity::S15 => 15,
            Granularity::S30 => 30,
            Granularity::M1 => 60,
            Granularity::M2 => 2 * 60,
            Granularity::M4 => 4 * 60,
            Granularity::M5 => 5 * 60,
            Granularity::M10 => 10 * 60,
            Granularity::M15 => 15 * 60,
            Granularity::M30 => 30 * 60,
            Granularity::H1 => 3600,
            Granularity::H2 => 2 * 3600,
            Granularity::H3 => 3 * 3600,
            Granularity::H4 => 4 * 3600,
            Granularity::H6 => 6 * 3600,
            Granularity::H8 => 8 * 3600,
            Granularity::H12 => 12 * 3600,
            Granularity::D => 24 * 3600,
        }
    }

    pub fn duration(&self) -> TimeDelta {
        TimeDelta::seconds(self.seconds())
    }

    /// Start of the period containing `timestamp` (aligned to the Unix epoch)
    pub fn period_start(&self, timestamp: Timestamp) -> Timestamp {
        let secs = timestamp.timestamp();
        let start = secs - secs.rem_euclid(self.seconds());
        DateTime::<Utc>::from_timestamp(start, 0).unwrap_or(timestamp)
    }

    /// Whether two timestamps fall in the same period
    pub fn same_period(&self, a: Timestamp, b: Timestamp) -> bool {
        self.period_start(a) == self.period_start(b)
    }

    pub fn code(&self) -> &'static str {
        match self {
            Granularity::S5 => "S5",
            Granularity::S10 => "S10",
            Granularity::S15 => "S15",
            Granularity::S30 => "S30",
            Granularity::M1 => "M1",
            Granularity::M2 => "M2",
            Granularity::M4 => "M4",
            Granularity::M5 => "M5",
            Granularity::M10 => "M10",
            Granularity::M15 => "M15",
            Granularity::M30 => "M30",
            Granularity::H1 => "H1",
            Granularity::H2 => "H2",
            Granularity::H3 => "H3",
            Granularity::H4 => "H4",
            Granularity::H6 => "H6",
            Granularity::H8 => "H8",
            Granularity::H12 => "H12",
            Granularity::D => "D",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Granularity {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let granularity = match s.trim().to_uppercase().as_str() {
            "S5" => Granularity::S5,
            "S10" => Granularity::S10,
            "S15" => Granularity::S15,
            "S30" => Granularity::S30,
            "M1" => Granularity::M1,
            "M2" => Granularity::M2,
            "M4" => Granularity::M4,
            "M5" => Granularity::M5,
            "M10" => Granularity::M10,
            "M15" => Granularity::M15,
            "M30" => Granularity::M30,
            "H1" => Granularity::H1,
            "H2" => Granularity::H2,
            "H3" => Granularity::H3,
            "H4" => Granularity::H4,
            "H6" => Granularity::H6,
            "H8" => Granularity::H8,
            "H12" => Granularity::H12,
            "D" => Granularity::D,
            _ => return Err(ParseError::new("granularity", s)),
        };
        Ok(granularity)
    }
}
