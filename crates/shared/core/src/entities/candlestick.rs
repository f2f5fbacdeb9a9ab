use serde::{Deserialize, Serialize};

use super::PriceSelector;
use crate::values::{FixedDecimal, Timestamp};

/// OHLC price record for one period
///
/// Candles are values: a forming candle is updated by building a new candle
/// and replacing the old one in its series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candlestick {
    /// Start of the period this candle covers
    pub timestamp: Timestamp,
    pub open: FixedDecimal,
    pub high: FixedDecimal,
    pub low: FixedDecimal,
    pub close: FixedDecimal,
    pub volume: u64,
    /// False while the period is still forming
    pub complete: bool,
}

impl Candlestick {
    /// Create a completed candle
    pub fn new(
        timestamp: Timestamp,
        open: FixedDecimal,
        high: FixedDecimal,
        low: FixedDecimal,
        close: FixedDecimal,
        volume: u64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            complete: true,
        }
    }

    /// Open a forming candle at a single price
    pub fn opening(timestamp: Timestamp, price: FixedDecimal, volume: u64) -> Self {
        Self {
            timestamp,
            open: price,
            high: price,
            low: price,
            close: price,
            volume,
            complete: false,
        }
    }

    /// Builder: mark as still forming
    pub fn forming(mut self) -> Self {
        self.complete = false;
        self
    }

    /// Copy of this candle marked complete
    pub fn completed(self) -> Self {
        Self {
            complete: true,
            ..self
        }
    }

    /// Copy of this candle with a new trade price folded in
    pub fn with_tick(&self, price: FixedDecimal, volume: u64) -> Self {
        Self {
            high: self.high.max(price),
            low: self.low.min(price),
            close: price,
            volume: self.volume.saturating_add(volume),
            ..*self
        }
    }

    /// (high + low) / 2, rounded to scale 5
    pub fn median(&self) -> FixedDecimal {
        // Dividing by a non-zero constant cannot fail
        (self.high + self.low)
            .checked_div(FixedDecimal::TWO)
            .unwrap_or(self.close)
    }

    /// The price an indicator reads from this candle
    pub fn price(&self, selector: PriceSelector) -> FixedDecimal {
        match selector {
            PriceSelector::Open => self.open,
            PriceSelector::High => self.high,
            PriceSelector::Low => self.low,
            PriceSelector::Close => self.close,
            PriceSelector::Median => self.median(),
        }
    }
}
