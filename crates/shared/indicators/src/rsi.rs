//! Relative strength index with Wilder smoothing
//!
//! The seed averages the gains and losses of the first window. The first
//! change of that window has no earlier candle to compare with: a close is
//! measured against its candle's own open, any other price counts as no
//! change. The seed therefore needs exactly `period` candles. After the seed each candle's change
//! is folded in as `avg = (avg * (period - 1) + change) / period`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use trendline_core::{Candlestick, FixedDecimal, IndicatorKind, PriceSelector};
use trendline_ports::{CandleSource, IndicatorResult};

use crate::rolling::{Recurrence, RollingIndicator};

/// Smoothed average gain and loss (both non-negative)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RsiAverages {
    pub gain: FixedDecimal,
    pub loss: FixedDecimal,
}

impl RsiAverages {
    /// RSI on the 0..=100 scale
    ///
    /// No losses reads 100; no movement at all reads 50.
    pub fn index(&self) -> Option<FixedDecimal> {
        if self.loss.is_zero() {
            return Some(if self.gain.is_zero() {
                FixedDecimal::from_int(50)
            } else {
                FixedDecimal::ONE_HUNDRED
            });
        }
        let strength = self.gain.checked_div(self.loss)?;
        let scaled = FixedDecimal::ONE_HUNDRED.checked_div(FixedDecimal::ONE + strength)?;
        Some(FixedDecimal::ONE_HUNDRED - scaled)
    }
}

fn split(change: FixedDecimal) -> (FixedDecimal, FixedDecimal) {
    if change.is_sign_negative() {
        (FixedDecimal::ZERO, change.abs())
    } else {
        (change, FixedDecimal::ZERO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelativeStrength {
    period: usize,
    selector: PriceSelector,
}

impl RelativeStrength {
    pub fn new(period: usize, selector: PriceSelector) -> Self {
        Self { period, selector }
    }

    /// What the first candle's price is compared with when nothing precedes it
    fn opening_reference(&self, candle: &Candlestick) -> FixedDecimal {
        match self.selector {
            PriceSelector::Close => candle.open,
            selector => candle.price(selector),
        }
    }

    fn seed(&self, candles: &[Candlestick]) -> Option<RsiAverages> {
        let start = candles.len().checked_sub(self.period)?;
        let window = &candles[start..];
        let first = window.first()?;

        let mut reference = self.opening_reference(first);
        let mut gains = FixedDecimal::ZERO;
        let mut losses = FixedDecimal::ZERO;
        for candle in window {
            let price = candle.price(self.selector);
            let (gain, loss) = split(price - reference);
            gains = gains + gain;
            losses = losses + loss;
            reference = price;
        }

        let period = FixedDecimal::from(self.period);
        Some(RsiAverages {
            gain: gains.checked_div(period)?,
            loss: losses.checked_div(period)?,
        })
    }

    fn smooth(&self, previous: &RsiAverages, candles: &[Candlestick]) -> Option<RsiAverages> {
        let (last, rest) = candles.split_last()?;
        let reference = match rest.last() {
            Some(candle) => candle.price(self.selector),
            None => self.opening_reference(last),
        };
        let (gain, loss) = split(last.price(self.selector) - reference);

        let period = FixedDecimal::from(self.period);
        let carried = FixedDecimal::from(self.period - 1);
        Some(RsiAverages {
            gain: (previous.gain * carried + gain).checked_div(period)?,
            loss: (previous.loss * carried + loss).checked_div(period)?,
        })
    }
}

impl Recurrence for RelativeStrength {
    type State = RsiAverages;

    fn kind(&self) -> IndicatorKind {
        IndicatorKind::Rsi
    }

    fn period(&self) -> usize {
        self.period
    }

    fn selector(&self) -> PriceSelector {
        self.selector
    }

    fn compute(
        &self,
        previous: Option<&RsiAverages>,
        candles: &[Candlestick],
    ) -> Option<(FixedDecimal, RsiAverages)> {
        let averages = match previous {
            None => self.seed(candles)?,
            Some(previous) => self.smooth(previous, candles)?,
        };
        Some((averages.index()?, averages))
    }
}

pub type RelativeStrengthIndex = RollingIndicator<RelativeStrength>;

impl RelativeStrengthIndex {
    pub fn new(
        period: usize,
        selector: PriceSelector,
        source: Arc<dyn CandleSource>,
    ) -> IndicatorResult<Self> {
        Self::with_recurrence(RelativeStrength::new(period, selector), source)
    }
}
