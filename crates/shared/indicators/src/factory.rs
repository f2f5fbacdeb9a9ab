use std::sync::Arc;

use trendline_core::IndicatorKind;
use trendline_ports::{CandleSource, Indicator, IndicatorResult};

use crate::config::IndicatorConfig;
use crate::{
    ExponentialMovingAverage, RelativeStrengthIndex, SimpleMovingAverage, WeightedMovingAverage,
};

/// Create an indicator from its configuration and compute its initial series
pub fn create_indicator(
    config: &IndicatorConfig,
    source: Arc<dyn CandleSource>,
) -> IndicatorResult<Box<dyn Indicator>> {
    let IndicatorConfig {
        kind,
        period,
        price_selector,
    } = *config;

    Ok(match kind {
        IndicatorKind::Simple => Box::new(SimpleMovingAverage::new(period, price_selector, source)?),
        IndicatorKind::Weighted => {
            Box::new(WeightedMovingAverage::new(period, price_selector, source)?)
        }
        IndicatorKind::Exponential => {
            Box::new(ExponentialMovingAverage::new(period, price_selector, source)?)
        }
        IndicatorKind::Rsi => Box::new(RelativeStrengthIndex::new(period, price_selector, source)?),
    })
}
