use parking_lot::RwLock;
use std::sync::Arc;

use trendline_core::{
    Candlestick, CandlestickSeries, Granularity, PriceTick, SeriesResult, SeriesUpdate,
};
use trendline_ports::CandleSource;

/// Candle series shared between its writer and the indicators reading it
///
/// Cloning gives another handle to the same series.
#[derive(Clone)]
pub struct SharedSeries {
    inner: Arc<RwLock<CandlestickSeries>>,
}

impl SharedSeries {
    pub fn new(series: CandlestickSeries) -> Self {
        Self {
            inner: Arc::new(RwLock::new(series)),
        }
    }

    /// Handle to hand to indicators
    pub fn source(&self) -> Arc<dyn CandleSource> {
        Arc::new(self.clone())
    }

    pub fn apply_tick(&self, tick: &PriceTick) -> SeriesResult<SeriesUpdate> {
        self.inner.write().apply_tick(tick)
    }

    pub fn push(&self, candle: Candlestick) -> SeriesResult<SeriesUpdate> {
        self.inner.write().push(candle)
    }
}

impl CandleSource for SharedSeries {
    fn candles(&self) -> Vec<Candlestick> {
        self.inner.read().candles()
    }

    fn tail(&self, count: usize) -> Vec<Candlestick> {
        self.inner.read().tail(count)
    }

    fn len(&self) -> usize {
        self.inner.read().len()
    }

    fn last(&self) -> Option<Candlestick> {
        self.inner.read().last().copied()
    }

    fn granularity(&self) -> Granularity {
        self.inner.read().granularity()
    }
}
