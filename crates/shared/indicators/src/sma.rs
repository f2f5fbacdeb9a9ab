//! Simple moving average

use std::sync::Arc;

use trendline_core::{Candlestick, FixedDecimal, IndicatorKind, PriceSelector};
use trendline_ports::{CandleSource, IndicatorResult};

use crate::rolling::{Recurrence, RollingIndicator};

/// Mean of the last `period` prices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleAverage {
    period: usize,
    selector: PriceSelector,
}

impl SimpleAverage {
    pub fn new(period: usize, selector: PriceSelector) -> Self {
        Self { period, selector }
    }
}

/// Sum of the last `period` selected prices divided by `period`
pub(crate) fn window_mean(
    period: usize,
    selector: PriceSelector,
    candles: &[Candlestick],
) -> Option<FixedDecimal> {
    let start = candles.len().checked_sub(period)?;
    let total: FixedDecimal = candles[start..].iter().map(|c| c.price(selector)).sum();
    total.checked_div(FixedDecimal::from(period))
}

impl Recurrence for SimpleAverage {
    type State = ();

    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Simple
    }

    fn period(&self) -> usize {
        self.period
    }

    fn selector(&self) -> PriceSelector {
        self.selector
    }

    fn compute(&self, _previous: Option<&()>, candles: &[Candlestick]) -> Option<(FixedDecimal, ())> {
        window_mean(self.period, self.selector, candles).map(|value| (value, ()))
    }
}

pub type SimpleMovingAverage = RollingIndicator<SimpleAverage>;

impl SimpleMovingAverage {
    pub fn new(
        period: usize,
        selector: PriceSelector,
        source: Arc<dyn CandleSource>,
    ) -> IndicatorResult<Self> {
        Self::with_recurrence(SimpleAverage::new(period, selector), source)
    }
}
