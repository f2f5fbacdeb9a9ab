use serde::{Deserialize, Serialize};

use crate::values::{FixedDecimal, Timestamp};

/// A single price update from the broker feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTick {
    pub instrument: String,
    pub timestamp: Timestamp,
    pub price: FixedDecimal,
    /// Traded volume carried by this update (0 when the feed has none)
    pub volume: u64,
}

impl PriceTick {
    pub fn new(instrument: impl Into<String>, timestamp: Timestamp, price: FixedDecimal) -> Self {
        Self {
            instrument: instrument.into(),
            timestamp,
            price,
            volume: 0,
        }
    }

    /// Builder: set volume
    pub fn with_volume(mut self, volume: u64) -> Self {
        self.volume = volume;
        self
    }
}
