//! One instrument's signal pipeline
//!
//! tick → candle series → indicators → generator, synchronously.

use trendline_core::{Candlestick, CandlestickSeries, PriceTick, SeriesUpdate, Trade};
use trendline_indicators::SharedSeries;
use trendline_strategy::{IndicatorSet, StrategyConfig, TradeSignalGenerator};

use crate::error::{SessionError, SessionResult};

/// Series, indicators and generator of a single instrument
///
/// Sessions share nothing mutable; one per instrument.
pub struct TradingSession {
    instrument: String,
    config: StrategyConfig,
    series: SharedSeries,
    indicators: IndicatorSet,
    generator: TradeSignalGenerator,
}

impl TradingSession {
    /// Build the session from historical candles (oldest first)
    ///
    /// Fails if the configuration is invalid or the history does not cover
    /// every indicator's warm-up.
    pub fn new(
        instrument: impl Into<String>,
        config: &StrategyConfig,
        history: impl IntoIterator<Item = Candlestick>,
    ) -> SessionResult<Self> {
        let instrument = instrument.into();
        config.validate()?;

        let series = SharedSeries::new(CandlestickSeries::with_candles(
            config.granularity,
            config.retention,
            history,
        )?);
        let indicators = IndicatorSet::from_config(config, series.source())?;
        let generator = TradeSignalGenerator::new(config.signal.clone());
        generator.validate(&indicators)?;

        log::info!(
            "[Session {}] ready with {} indicators at {}",
            instrument,
            indicators.len(),
            config.granularity
        );
        Ok(Self {
            instrument,
            config: config.clone(),
            series,
            indicators,
            generator,
        })
    }

    pub fn instrument(&self) -> &str {
        &self.instrument
    }

    pub fn series(&self) -> &SharedSeries {
        &self.series
    }

    pub fn indicators(&self) -> &IndicatorSet {
        &self.indicators
    }

    pub fn generator(&self) -> &TradeSignalGenerator {
        &self.generator
    }

    /// One pass: fold the tick in, update indicators, evaluate
    ///
    /// Returns the trade only when it is tradable and not already emitted.
    pub fn on_tick(&mut self, tick: &PriceTick) -> SessionResult<Option<Trade>> {
        if tick.instrument != self.instrument {
            return Err(SessionError::WrongInstrument {
                expected: self.instrument.clone(),
                got: tick.instrument.clone(),
            });
        }

        if self.series.apply_tick(tick)? == SeriesUpdate::Appended {
            self.generator.roll_forward();
        }
        self.indicators.update_all()?;

        let trade = self.generator.next_trade(&self.indicators)?;
        Ok(trade.tradable.then_some(trade))
    }

    /// Evaluate the current state without touching the trade memory
    pub fn evaluate(&self) -> SessionResult<Trade> {
        Ok(self.generator.generate_trade(&self.indicators)?)
    }

    /// Recompute every indicator from the current series
    ///
    /// Recovers from a failed update that left indicators behind the series.
    pub fn resync(&mut self) -> SessionResult<()> {
        self.indicators = IndicatorSet::from_config(&self.config, self.series.source())?;
        log::warn!("[Session {}] indicators rebuilt from series", self.instrument);
        Ok(())
    }
}
