//! Trendline Indicators
//!
//! Rolling technical indicators computed over a candle source at scale-5,
//! round-half-up precision:
//! - Simple, weighted and exponential moving averages
//! - Relative strength index (Wilder smoothing)
//!
//! Every indicator is a [`RollingIndicator`] driven by a [`Recurrence`]: the
//! recurrence knows how to compute one value from the candles ending at it
//! (and the previous state), the rolling wrapper owns the value series and
//! keeps it in step with the source.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trendline_indicators::{create_indicator, IndicatorConfig, SharedSeries};
//!
//! let series = SharedSeries::new(history);
//! let config = IndicatorConfig::parse("Weighted", 20, "Close", &PeriodBounds::default())?;
//! let mut wma = create_indicator(&config, series.source())?;
//!
//! series.apply_tick(&tick)?;
//! wma.update_indicator()?;
//! let points = wma.points();
//! ```

pub mod config;
pub mod ema;
pub mod factory;
pub mod rolling;
pub mod rsi;
pub mod shared;
pub mod sma;
pub mod wma;

#[cfg(test)]
mod test_support;

pub use config::{IndicatorConfig, PeriodBounds};
pub use ema::{ExponentialAverage, ExponentialMovingAverage};
pub use factory::create_indicator;
pub use rolling::{Recurrence, RollingIndicator};
pub use rsi::{RelativeStrength, RelativeStrengthIndex, RsiAverages};
pub use shared::SharedSeries;
pub use sma::{SimpleAverage, SimpleMovingAverage};
pub use wma::{WeightedAverage, WeightedMovingAverage};
