use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::{Candlestick, Granularity, PriceTick};
use crate::error::{SeriesError, SeriesResult};

/// How many candles a series keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Retention {
    /// Keep at most this many candles, dropping the oldest
    Bounded(usize),
    /// Keep everything; trimming is the owner's concern
    #[default]
    Unbounded,
}

/// What a mutation did to the tail of the series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeriesUpdate {
    /// A new candle was added after the previous last candle
    Appended,
    /// The forming last candle was replaced
    Replaced,
}

/// Ordered candles of one instrument at one granularity
///
/// Timestamps are strictly increasing. Only the last candle may be
/// incomplete, and only it can be replaced.
#[derive(Debug, Clone)]
pub struct CandlestickSeries {
    granularity: Granularity,
    retention: Retention,
    candles: VecDeque<Candlestick>,
}

impl CandlestickSeries {
    /// Create an empty series
    pub fn new(granularity: Granularity, retention: Retention) -> Self {
        Self {
            granularity,
            retention,
            candles: VecDeque::new(),
        }
    }

    /// Create a series from historical candles (oldest first)
    pub fn with_candles(
        granularity: Granularity,
        retention: Retention,
        candles: impl IntoIterator<Item = Candlestick>,
    ) -> SeriesResult<Self> {
        if retention == Retention::Bounded(0) {
            return Err(SeriesError::InvalidRetention(
                "bounded series must keep at least one candle".to_string(),
            ));
        }
        let mut series = Self::new(granularity, retention);
        for candle in candles {
            series.push(candle)?;
        }
        Ok(series)
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn retention(&self) -> Retention {
        self.retention
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candlestick> {
        self.candles.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candlestick> {
        self.candles.iter()
    }

    /// Snapshot of every candle, oldest first
    pub fn candles(&self) -> Vec<Candlestick> {
        self.candles.iter().copied().collect()
    }

    /// Snapshot of the newest `count` candles (fewer if the series is shorter)
    pub fn tail(&self, count: usize) -> Vec<Candlestick> {
        let skip = self.candles.len().saturating_sub(count);
        self.candles.iter().skip(skip).copied().collect()
    }

    /// Append a candle, or replace the forming last candle with the same timestamp
    pub fn push(&mut self, candle: Candlestick) -> SeriesResult<SeriesUpdate> {
        if let Some(last) = self.candles.back_mut() {
            if candle.timestamp == last.timestamp {
                if last.complete {
                    return Err(SeriesError::CandleComplete(last.timestamp));
                }
                *last = candle;
                return Ok(SeriesUpdate::Replaced);
            }
            if candle.timestamp < last.timestamp {
                return Err(SeriesError::OutOfOrder {
                    last: last.timestamp,
                    candle: candle.timestamp,
                });
            }
            // A newer candle closes the previous period
            *last = last.completed();
        }

        self.candles.push_back(candle);
        self.enforce_retention();
        Ok(SeriesUpdate::Appended)
    }

    /// Fold a price tick into the series
    ///
    /// A tick inside the forming candle's period replaces that candle with the
    /// tick folded in; a tick in a later period opens a new candle.
    pub fn apply_tick(&mut self, tick: &PriceTick) -> SeriesResult<SeriesUpdate> {
        let period = self.granularity.period_start(tick.timestamp);

        let Some(last) = self.candles.back() else {
            return self.push(Candlestick::opening(period, tick.price, tick.volume));
        };

        if self.granularity.same_period(tick.timestamp, last.timestamp) {
            if last.complete {
                return Err(SeriesError::CandleComplete(last.timestamp));
            }
            let updated = last.with_tick(tick.price, tick.volume);
            return self.push(updated);
        }

        if period < last.timestamp {
            return Err(SeriesError::StaleTick {
                last: last.timestamp,
                tick: tick.timestamp,
            });
        }

        self.push(Candlestick::opening(period, tick.price, tick.volume))
    }

    fn enforce_retention(&mut self) {
        if let Retention::Bounded(max) = self.retention {
            while self.candles.len() > max {
                self.candles.pop_front();
            }
        }
    }
}
