//! Indicator configuration and validation

use serde::{Deserialize, Serialize};
use trendline_core::{IndicatorKind, PriceSelector};
use trendline_ports::{IndicatorError, IndicatorResult};

/// Allowed range for indicator periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for PeriodBounds {
    fn default() -> Self {
        Self { min: 1, max: 500 }
    }
}

impl PeriodBounds {
    pub fn check(&self, period: usize) -> IndicatorResult<()> {
        if period < self.min.max(1) || period > self.max {
            return Err(IndicatorError::InvalidPeriod {
                period,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// What to compute and from which price
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub kind: IndicatorKind,
    pub period: usize,
    #[serde(default)]
    pub price_selector: PriceSelector,
}

impl IndicatorConfig {
    pub fn new(kind: IndicatorKind, period: usize, price_selector: PriceSelector) -> Self {
        Self {
            kind,
            period,
            price_selector,
        }
    }

    /// Build from configuration strings, failing fast on anything unknown
    pub fn parse(
        kind: &str,
        period: usize,
        price_selector: &str,
        bounds: &PeriodBounds,
    ) -> IndicatorResult<Self> {
        if price_selector.trim().is_empty() {
            return Err(IndicatorError::MissingPriceSelector);
        }
        let config = Self {
            kind: kind.parse()?,
            period,
            price_selector: price_selector.parse()?,
        };
        config.validate(bounds)?;
        Ok(config)
    }

    pub fn validate(&self, bounds: &PeriodBounds) -> IndicatorResult<()> {
        bounds.check(self.period)
    }
}
