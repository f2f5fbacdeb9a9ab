//! Exponential moving average
//!
//! Seeded with the simple average of the first window, then
//! `ema = price * k + previous * (1 - k)` with `k = 2 / (period + 1)`.
//! Both products are rounded before they are added.

use std::sync::Arc;

use trendline_core::{Candlestick, FixedDecimal, IndicatorKind, PriceSelector};
use trendline_ports::{CandleSource, IndicatorResult};

use crate::rolling::{Recurrence, RollingIndicator};
use crate::sma::window_mean;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentialAverage {
    period: usize,
    selector: PriceSelector,
}

impl ExponentialAverage {
    pub fn new(period: usize, selector: PriceSelector) -> Self {
        Self { period, selector }
    }

    /// Smoothing factor `2 / (period + 1)`
    pub fn multiplier(&self) -> Option<FixedDecimal> {
        FixedDecimal::TWO.checked_div(FixedDecimal::from(self.period + 1))
    }
}

impl Recurrence for ExponentialAverage {
    /// Previous average
    type State = FixedDecimal;

    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Exponential
    }

    fn period(&self) -> usize {
        self.period
    }

    fn selector(&self) -> PriceSelector {
        self.selector
    }

    fn compute(
        &self,
        previous: Option<&FixedDecimal>,
        candles: &[Candlestick],
    ) -> Option<(FixedDecimal, FixedDecimal)> {
        let value = match previous {
            None => window_mean(self.period, self.selector, candles)?,
            Some(&previous) => {
                let price = candles.last()?.price(self.selector);
                let multiplier = self.multiplier()?;
                price * multiplier + previous * (FixedDecimal::ONE - multiplier)
            }
        };
        Some((value, value))
    }
}

pub type ExponentialMovingAverage = RollingIndicator<ExponentialAverage>;

impl ExponentialMovingAverage {
    pub fn new(
        period: usize,
        selector: PriceSelector,
        source: Arc<dyn CandleSource>,
    ) -> IndicatorResult<Self> {
        Self::with_recurrence(ExponentialAverage::new(period, selector), source)
    }
}
