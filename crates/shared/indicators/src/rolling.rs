//! Incremental engine shared by every indicator
//!
//! A [`Recurrence`] computes one value from the candles ending at it. The
//! [`RollingIndicator`] around it keeps the value series aligned with its
//! candle source: one value per candle once the warm-up period is covered,
//! so `values.len() == source.len() - period + 1` after every update.

use std::sync::Arc;

use trendline_core::{Candlestick, FixedDecimal, IndicatorKind, PriceSelector, Timestamp};
use trendline_ports::{CandleSource, Indicator, IndicatorError, IndicatorResult};

/// One step of an indicator's calculation
pub trait Recurrence: Send + Sync {
    /// Carried from one value to the next (`()` for windowed averages)
    type State: Clone + Send + Sync;

    fn kind(&self) -> IndicatorKind;

    fn period(&self) -> usize;

    fn selector(&self) -> PriceSelector;

    /// Value for the last candle of `candles`
    ///
    /// With no `previous` state the value is seeded from the last `period`
    /// candles. Otherwise `previous` is the state at the candle before the
    /// last one. `candles` always holds at least `period` candles.
    /// Returns `None` on division by zero.
    fn compute(
        &self,
        previous: Option<&Self::State>,
        candles: &[Candlestick],
    ) -> Option<(FixedDecimal, Self::State)>;
}

/// How the source moved since the last update
enum UpdatePlan {
    /// The last seen candle is still the newest (forming candle changed)
    ReplaceLast,
    /// Exactly one candle was appended after the last seen one
    Advance,
}

/// Value series of a [`Recurrence`] over a shared candle source
pub struct RollingIndicator<C: Recurrence> {
    name: String,
    calc: C,
    source: Arc<dyn CandleSource>,
    values: Vec<FixedDecimal>,
    states: Vec<C::State>,
    last_seen: Timestamp,
}

impl<C: Recurrence> RollingIndicator<C> {
    /// Build the indicator and compute its full series from the source
    pub fn with_recurrence(calc: C, source: Arc<dyn CandleSource>) -> IndicatorResult<Self> {
        let name = format!("{}({}, {})", calc.kind().code(), calc.period(), calc.selector());
        let candles = source.candles();
        let period = calc.period();

        let Some(newest) = candles.last() else {
            return Err(IndicatorError::InsufficientData {
                indicator: name,
                required: period,
                available: 0,
            });
        };
        if candles.len() < period {
            return Err(IndicatorError::InsufficientData {
                indicator: name,
                required: period,
                available: candles.len(),
            });
        }
        let last_seen = newest.timestamp;

        let mut indicator = Self {
            name,
            calc,
            source,
            values: Vec::with_capacity(candles.len() - period + 1),
            states: Vec::with_capacity(candles.len() - period + 1),
            last_seen,
        };
        for end in period..=candles.len() {
            indicator.push_value(&candles[..end])?;
        }

        log::debug!(
            "[Indicators] {} computed {} values from {} candles",
            indicator.name,
            indicator.values.len(),
            candles.len()
        );
        Ok(indicator)
    }

    /// State behind the newest value
    pub fn latest_state(&self) -> Option<&C::State> {
        self.states.last()
    }

    /// Compute the value ending at the last candle of `candles` and append it
    fn push_value(&mut self, candles: &[Candlestick]) -> IndicatorResult<()> {
        let period = self.calc.period();
        if candles.len() < period {
            return Err(IndicatorError::InsufficientData {
                indicator: self.name.clone(),
                required: period,
                available: candles.len(),
            });
        }
        let start = candles.len().saturating_sub(period + 1);
        let (value, state) = self
            .calc
            .compute(self.states.last(), &candles[start..])
            .ok_or_else(|| IndicatorError::ZeroDivisor {
                indicator: self.name.clone(),
            })?;

        self.values.push(value);
        self.states.push(state);
        Ok(())
    }

    /// Recompute the newest value against `candles`
    fn replace_last(&mut self, candles: &[Candlestick]) -> IndicatorResult<()> {
        let value = self.values.pop();
        let state = self.states.pop();
        if let Err(err) = self.push_value(candles) {
            // Leave the series as it was
            if let (Some(value), Some(state)) = (value, state) {
                self.values.push(value);
                self.states.push(state);
            }
            return Err(err);
        }
        Ok(())
    }

    fn plan(&self, tail: &[Candlestick]) -> IndicatorResult<UpdatePlan> {
        let Some(newest) = tail.last() else {
            return Err(IndicatorError::InsufficientData {
                indicator: self.name.clone(),
                required: self.calc.period(),
                available: 0,
            });
        };
        if newest.timestamp == self.last_seen {
            return Ok(UpdatePlan::ReplaceLast);
        }
        match tail.len().checked_sub(2).map(|i| tail[i].timestamp) {
            Some(previous) if previous == self.last_seen => Ok(UpdatePlan::Advance),
            _ => Err(IndicatorError::CandleGap {
                indicator: self.name.clone(),
                last_seen: self.last_seen,
                newest: newest.timestamp,
            }),
        }
    }

    /// Drop values whose candles the source no longer holds
    fn trim_to(&mut self, available: usize) {
        let keep = available.saturating_sub(self.calc.period()) + 1;
        if self.values.len() > keep {
            let excess = self.values.len() - keep;
            self.values.drain(..excess);
            self.states.drain(..excess);
        }
    }
}

impl<C: Recurrence> Indicator for RollingIndicator<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> IndicatorKind {
        self.calc.kind()
    }

    fn period(&self) -> usize {
        self.calc.period()
    }

    fn price_selector(&self) -> PriceSelector {
        self.calc.selector()
    }

    fn values(&self) -> &[FixedDecimal] {
        &self.values
    }

    fn update_indicator(&mut self) -> IndicatorResult<()> {
        let available = self.source.len();
        let tail = self.source.tail(self.calc.period() + 2);

        match self.plan(&tail)? {
            UpdatePlan::ReplaceLast => {
                self.replace_last(&tail)?;
            }
            UpdatePlan::Advance => {
                // The previous candle may have moved since it was last seen
                let (newest, settled) = match tail.split_last() {
                    Some(split) => split,
                    None => return Ok(()),
                };
                self.replace_last(settled)?;
                self.push_value(&tail)?;
                self.last_seen = newest.timestamp;
            }
        }

        self.trim_to(available);
        log::trace!(
            "[Indicators] {} updated, latest {:?}",
            self.name,
            self.values.last()
        );
        Ok(())
    }
}
