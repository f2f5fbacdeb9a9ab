//! Linearly weighted moving average

use std::sync::Arc;

use trendline_core::{Candlestick, FixedDecimal, IndicatorKind, PriceSelector};
use trendline_ports::{CandleSource, IndicatorResult};

use crate::rolling::{Recurrence, RollingIndicator};

/// Weights 1..=period from oldest to newest, divided by period(period+1)/2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeightedAverage {
    period: usize,
    selector: PriceSelector,
}

impl WeightedAverage {
    pub fn new(period: usize, selector: PriceSelector) -> Self {
        Self { period, selector }
    }

    fn divisor(&self) -> FixedDecimal {
        FixedDecimal::from(self.period * (self.period + 1) / 2)
    }
}

impl Recurrence for WeightedAverage {
    type State = ();

    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Weighted
    }

    fn period(&self) -> usize {
        self.period
    }

    fn selector(&self) -> PriceSelector {
        self.selector
    }

    fn compute(&self, _previous: Option<&()>, candles: &[Candlestick]) -> Option<(FixedDecimal, ())> {
        let start = candles.len().checked_sub(self.period)?;
        let total: FixedDecimal = candles[start..]
            .iter()
            .zip(1usize..)
            .map(|(candle, weight)| FixedDecimal::from(weight) * candle.price(self.selector))
            .sum();
        total.checked_div(self.divisor()).map(|value| (value, ()))
    }
}

pub type WeightedMovingAverage = RollingIndicator<WeightedAverage>;

impl WeightedMovingAverage {
    pub fn new(
        period: usize,
        selector: PriceSelector,
        source: Arc<dyn CandleSource>,
    ) -> IndicatorResult<Self> {
        Self::with_recurrence(WeightedAverage::new(period, selector), source)
    }
}
