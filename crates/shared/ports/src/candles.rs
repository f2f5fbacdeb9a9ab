use trendline_core::{Candlestick, CandlestickSeries, Granularity};

/// Port for reading candles
///
/// Every call returns a snapshot; indicators never mutate their source.
pub trait CandleSource: Send + Sync {
    /// All candles currently held, oldest first
    fn candles(&self) -> Vec<Candlestick>;

    /// The newest `count` candles, oldest first (fewer if not available)
    fn tail(&self, count: usize) -> Vec<Candlestick>;

    /// Number of candles currently held
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The newest candle, possibly still forming
    fn last(&self) -> Option<Candlestick> {
        self.tail(1).pop()
    }

    fn granularity(&self) -> Granularity;
}

impl CandleSource for CandlestickSeries {
    fn candles(&self) -> Vec<Candlestick> {
        CandlestickSeries::candles(self)
    }

    fn tail(&self, count: usize) -> Vec<Candlestick> {
        CandlestickSeries::tail(self, count)
    }

    fn len(&self) -> usize {
        CandlestickSeries::len(self)
    }

    fn last(&self) -> Option<Candlestick> {
        CandlestickSeries::last(self).copied()
    }

    fn granularity(&self) -> Granularity {
        CandlestickSeries::granularity(self)
    }
}
