use trendline_core::{FixedDecimal, IndicatorKind, Point, PriceSelector};

use crate::error::IndicatorResult;

/// Number of trailing values exposed as points for crossover tests
pub const POINT_WINDOW: usize = 3;

/// Port for a rolling technical indicator
///
/// An indicator owns its value series and reads candles from an injected
/// [`CandleSource`](crate::CandleSource). Each call to `update_indicator`
/// appends or replaces exactly one trailing value.
pub trait Indicator: Send + Sync {
    /// Display name, e.g. `WMA(20, Close)`
    fn name(&self) -> &str;

    fn kind(&self) -> IndicatorKind;

    fn period(&self) -> usize;

    fn price_selector(&self) -> PriceSelector;

    /// Value series, oldest first
    fn values(&self) -> &[FixedDecimal];

    /// Newest value
    fn latest(&self) -> Option<FixedDecimal> {
        self.values().last().copied()
    }

    /// Last three values as points with ordinals 1..=3, oldest first
    ///
    /// Returns fewer points (never fails) while fewer than three values exist.
    fn points(&self) -> Vec<Point> {
        let values = self.values();
        let start = values.len().saturating_sub(POINT_WINDOW);
        Point::from_values(&values[start..])
    }

    /// Pull the newest candle from the source and roll the series forward
    fn update_indicator(&mut self) -> IndicatorResult<()>;
}
