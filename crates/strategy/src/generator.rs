//! Crossover signal generation
//!
//! Each cycle reads the last three points of every configured line. For each
//! crossover pair in priority order the two consecutive segments are tested,
//! newest (ordinals 3→2) first. The first segment pair that intersects with a
//! clear direction decides the trade:
//!
//! - Up: the fast line was at or below the slow line at the older end and is
//!   above it at the newer end. Down is the mirror image.
//! - The RSI value at the segment's newer end filters the signal.
//! - Entry and stop-loss are offsets from the intersection price.

use trendline_core::{Direction, FixedDecimal, LineSegment, Point, Trade};
use trendline_geometry::{calculate_intersection_point, do_line_segments_intersect};
use trendline_ports::{POINT_WINDOW, SignalError, SignalResult};

use crate::config::SignalConfig;
use crate::indicator_set::IndicatorSet;

/// Which of the two trailing segments crossed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentPosition {
    /// Between the newest point and the one before it
    Recent,
    /// Between the oldest two points
    Older,
}

impl SegmentPosition {
    /// Point indices (newer, older) within the three-point window
    fn indices(self) -> (usize, usize) {
        match self {
            SegmentPosition::Recent => (2, 1),
            SegmentPosition::Older => (1, 0),
        }
    }

    /// Where the same segment sits once one more candle has been added
    fn aged(self) -> Option<Self> {
        match self {
            SegmentPosition::Recent => Some(SegmentPosition::Older),
            SegmentPosition::Older => None,
        }
    }
}

/// Outcome of the last cycle run through [`TradeSignalGenerator::next_trade`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeneratorState {
    /// No cycle since the last candle roll
    #[default]
    Idle,
    /// The last cycle emitted a tradable trade
    TradableSignal,
    /// The last cycle found nothing new to trade
    NoSignal,
}

/// A detected crossover before filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Crossing {
    pair: usize,
    position: SegmentPosition,
    direction: Direction,
    price: FixedDecimal,
    /// Ordinal of the segment's newer end
    time: u32,
}

struct Evaluation {
    trade: Trade,
    crossing: Option<Crossing>,
}

type CrossingKey = (usize, SegmentPosition);

type Window = [Point; POINT_WINDOW];

/// Direction of the fast line relative to the slow one across a segment
fn crossing_direction(fast: &LineSegment, slow: &LineSegment) -> Direction {
    let (fast_new, slow_new) = (fast.point_a.price, slow.point_a.price);
    let (fast_old, slow_old) = (fast.point_b.price, slow.point_b.price);

    if fast_new > slow_new && fast_old <= slow_old {
        Direction::Up
    } else if fast_new < slow_new && fast_old >= slow_old {
        Direction::Down
    } else {
        Direction::Flat
    }
}

fn window(indicators: &IndicatorSet, name: &str) -> SignalResult<Window> {
    let points = indicators.require(name)?.points();
    Window::try_from(points).map_err(|points| SignalError::NotReady {
        indicator: name.to_string(),
        available: points.len(),
        required: POINT_WINDOW,
    })
}

/// Trade candidates from indicator crossovers
pub struct TradeSignalGenerator {
    config: SignalConfig,
    /// Pair and segment of every emitted crossing still in the window
    traded: Vec<CrossingKey>,
    state: GeneratorState,
}

impl TradeSignalGenerator {
    pub fn new(config: SignalConfig) -> Self {
        Self {
            config,
            traded: Vec::new(),
            state: GeneratorState::Idle,
        }
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    pub fn state(&self) -> GeneratorState {
        self.state
    }

    /// Whether the crossover currently in the window was already emitted
    pub fn is_trade_generated(&self) -> bool {
        !self.traded.is_empty()
    }

    /// Check every referenced line exists
    pub fn validate(&self, indicators: &IndicatorSet) -> SignalResult<()> {
        self.config.validate()?;
        match self
            .config
            .referenced_indicators()
            .find(|name| !indicators.contains(name))
        {
            Some(name) => Err(SignalError::UnknownIndicator(name.to_string())),
            None => Ok(()),
        }
    }

    /// Evaluate the current indicator state
    ///
    /// Pure: repeated calls on unchanged indicators return the same trade.
    /// No crossover is a flat trade, not an error.
    pub fn generate_trade(&self, indicators: &IndicatorSet) -> SignalResult<Trade> {
        self.evaluate(indicators, &[]).map(|evaluation| evaluation.trade)
    }

    /// Evaluate, passing over crossovers that were already emitted
    ///
    /// An emitted crossover does not mask a newer one on a lower priority
    /// pair. When it is the only crossover left the trade is rejected.
    pub fn next_trade(&mut self, indicators: &IndicatorSet) -> SignalResult<Trade> {
        let Evaluation { trade, crossing } = self.evaluate(indicators, &self.traded)?;

        let Some(crossing) = crossing.filter(|_| trade.tradable) else {
            self.state = GeneratorState::NoSignal;
            return Ok(trade);
        };

        log::info!(
            "[Generator] {} signal: entry={}, stop_loss={}",
            trade.direction,
            trade.entry_price,
            trade.stop_loss_price
        );
        self.traded.push((crossing.pair, crossing.position));
        self.state = GeneratorState::TradableSignal;
        Ok(trade)
    }

    /// Age the trade memory by one candle
    ///
    /// Call when the candle series appends a candle: a crossing on the recent
    /// segment moves to the older one, an older crossing leaves the window.
    pub fn roll_forward(&mut self) {
        self.traded = self
            .traded
            .iter()
            .filter_map(|&(pair, position)| position.aged().map(|aged| (pair, aged)))
            .collect();
        self.state = GeneratorState::Idle;
    }

    fn evaluate(
        &self,
        indicators: &IndicatorSet,
        traded: &[CrossingKey],
    ) -> SignalResult<Evaluation> {
        // Every line must be ready before anything is tested
        let pairs = self
            .config
            .crossovers
            .iter()
            .map(|pair| -> SignalResult<(Window, Window)> {
                Ok((window(indicators, &pair.fast)?, window(indicators, &pair.slow)?))
            })
            .collect::<SignalResult<Vec<_>>>()?;
        let rsi = match &self.config.rsi_indicator {
            Some(name) => Some(window(indicators, name)?),
            None => None,
        };

        let (found, suppressed) = Self::find_crossing(&pairs, traded);
        let Some(crossing) = found else {
            let trade = match suppressed {
                Some(direction) => Trade::rejected(direction),
                None => Trade::flat(),
            };
            return Ok(Evaluation {
                trade,
                crossing: None,
            });
        };

        let trade = match rsi {
            Some(rsi) if !self.rsi_allows(&crossing, &rsi) => Trade::rejected(crossing.direction),
            _ => self.build_trade(&crossing)?,
        };
        Ok(Evaluation {
            trade,
            crossing: Some(crossing),
        })
    }

    /// First crossing not in `traded`, and the direction of the first one
    /// passed over
    fn find_crossing(
        pairs: &[(Window, Window)],
        traded: &[CrossingKey],
    ) -> (Option<Crossing>, Option<Direction>) {
        let mut suppressed = None;
        for (index, (fast, slow)) in pairs.iter().enumerate() {
            for position in [SegmentPosition::Recent, SegmentPosition::Older] {
                let (newer, older) = position.indices();
                let fast_segment = LineSegment::new(fast[newer], fast[older]);
                let slow_segment = LineSegment::new(slow[newer], slow[older]);

                if !do_line_segments_intersect(&fast_segment, &slow_segment) {
                    continue;
                }
                let direction = crossing_direction(&fast_segment, &slow_segment);
                if direction.is_flat() {
                    log::trace!("[Generator] pair {} intersects without a direction", index);
                    continue;
                }
                if traded.contains(&(index, position)) {
                    log::debug!(
                        "[Generator] {} crossover on pair {} already traded",
                        direction,
                        index
                    );
                    suppressed = suppressed.or(Some(direction));
                    continue;
                }

                let point = calculate_intersection_point(&fast_segment, &slow_segment);
                log::debug!(
                    "[Generator] pair {} crossed {} at {} ({:?} segment)",
                    index,
                    direction,
                    point.price,
                    position
                );
                let crossing = Crossing {
                    pair: index,
                    position,
                    direction,
                    price: point.price,
                    time: fast_segment.point_a.time,
                };
                return (Some(crossing), suppressed);
            }
        }
        (None, suppressed)
    }

    fn rsi_allows(&self, crossing: &Crossing, rsi: &Window) -> bool {
        let Some(value) = rsi.iter().find(|p| p.time == crossing.time).map(|p| p.price) else {
            return false;
        };
        let allowed = match crossing.direction {
            Direction::Up => value <= self.config.rsi_upper_threshold,
            Direction::Down => value >= self.config.rsi_lower_threshold,
            Direction::Flat => false,
        };
        if !allowed {
            log::debug!(
                "[Generator] {} crossover rejected by RSI {}",
                crossing.direction,
                value
            );
        }
        allowed
    }

    fn build_trade(&self, crossing: &Crossing) -> SignalResult<Trade> {
        let entry = self.config.entry_offset;
        let stop = self.config.stop_loss_offset;
        let price = crossing.price;

        match crossing.direction {
            Direction::Up => Ok(Trade::tradable(Direction::Up, price + entry, price - stop)),
            Direction::Down => Ok(Trade::tradable(Direction::Down, price - entry, price + stop)),
            Direction::Flat => Err(SignalError::InvalidConfig(
                "flat crossover cannot be traded".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CrossoverPair;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::VecDeque;
    use trendline_core::{IndicatorKind, PriceSelector};
    use trendline_ports::{Indicator, IndicatorResult};

    /// Line with scripted values; each update moves to the next frame
    struct ScriptedLine {
        name: String,
        values: Vec<FixedDecimal>,
        frames: VecDeque<Vec<FixedDecimal>>,
    }

    impl ScriptedLine {
        fn boxed(name: &str, frames: &[&[Decimal]]) -> Box<dyn Indicator> {
            let mut frames: VecDeque<Vec<FixedDecimal>> = frames
                .iter()
                .map(|frame| frame.iter().copied().map(FixedDecimal::new).collect())
                .collect();
            let values = frames.pop_front().unwrap_or_default();
            Box::new(Self {
                name: name.to_string(),
                values,
                frames,
            })
        }
    }

    impl Indicator for ScriptedLine {
        fn name(&self) -> &str {
            &self.name
        }

        fn kind(&self) -> IndicatorKind {
            IndicatorKind::Weighted
        }

        fn period(&self) -> usize {
            1
        }

        fn price_selector(&self) -> PriceSelector {
            PriceSelector::Close
        }

        fn values(&self) -> &[FixedDecimal] {
            &self.values
        }

        fn update_indicator(&mut self) -> IndicatorResult<()> {
            if let Some(next) = self.frames.pop_front() {
                self.values = next;
            }
            Ok(())
        }
    }

    const FAST: [Decimal; 3] = [dec!(1.22889), dec!(1.23339), dec!(1.23339)];
    const MIDDLE: [Decimal; 3] = [dec!(1.23119), dec!(1.23196), dec!(1.23196)];

    fn signal_config() -> SignalConfig {
        SignalConfig {
            crossovers: vec![CrossoverPair::new("fast_wma", "middle_wma")],
            ..Default::default()
        }
    }

    fn lines(fast: &[Decimal], middle: &[Decimal], rsi: &[Decimal]) -> IndicatorSet {
        let mut set = IndicatorSet::new();
        set.insert("fast_wma", ScriptedLine::boxed("fast_wma", &[fast])).unwrap();
        set.insert("middle_wma", ScriptedLine::boxed("middle_wma", &[middle])).unwrap();
        set.insert("rsi", ScriptedLine::boxed("rsi", &[rsi])).unwrap();
        set
    }

    fn fx(value: Decimal) -> FixedDecimal {
        FixedDecimal::new(value)
    }

    #[test]
    fn test_upward_crossover_scenario() {
        let indicators = lines(&FAST, &MIDDLE, &[dec!(49), dec!(50), dec!(22)]);
        let generator = TradeSignalGenerator::new(signal_config());

        let trade = generator.generate_trade(&indicators).unwrap();
        assert_eq!(trade.direction, Direction::Up);
        assert_eq!(trade.entry_price, fx(dec!(1.23386)));
        assert_eq!(trade.stop_loss_price, fx(dec!(1.23116)));
        assert!(trade.tradable);
    }

    #[test]
    fn test_rsi_above_upper_threshold_rejects() {
        let indicators = lines(&FAST, &MIDDLE, &[dec!(51), dec!(51), dec!(51)]);
        let generator = TradeSignalGenerator::new(signal_config());

        let trade = generator.generate_trade(&indicators).unwrap();
        assert_eq!(trade, Trade::rejected(Direction::Up));
        assert!(!trade.tradable);
    }

    #[test]
    fn test_downward_crossover_mirrors_offsets() {
        let indicators = lines(&MIDDLE, &FAST, &[dec!(49), dec!(50), dec!(22)]);
        let generator = TradeSignalGenerator::new(signal_config());

        let trade = generator.generate_trade(&indicators).unwrap();
        assert_eq!(trade.direction, Direction::Down);
        assert_eq!(trade.entry_price, fx(dec!(1.22946)));
        assert_eq!(trade.stop_loss_price, fx(dec!(1.23216)));
        assert!(trade.tradable);

        // Down signals are rejected below the lower threshold
        let indicators = lines(&MIDDLE, &FAST, &[dec!(60), dec!(49.99), dec!(60)]);
        let trade = generator.generate_trade(&indicators).unwrap();
        assert_eq!(trade, Trade::rejected(Direction::Down));
    }

    #[test]
    fn test_no_crossover_is_flat() {
        let indicators = lines(
            &[dec!(1.30), dec!(1.31), dec!(1.32)],
            &[dec!(1.20), dec!(1.21), dec!(1.22)],
            &[dec!(50), dec!(50), dec!(50)],
        );
        let mut generator = TradeSignalGenerator::new(signal_config());

        assert_eq!(generator.next_trade(&indicators).unwrap(), Trade::flat());
        assert_eq!(generator.state(), GeneratorState::NoSignal);
        assert!(!generator.is_trade_generated());
    }

    #[test]
    fn test_coincident_start_on_recent_segment() {
        let indicators = lines(
            &[dec!(1.1), dec!(1.2), dec!(1.3)],
            &[dec!(1.0), dec!(1.2), dec!(1.25)],
            &[dec!(70), dec!(70), dec!(40)],
        );
        let generator = TradeSignalGenerator::new(signal_config());

        // RSI is read at the newest point of the crossing segment
        let trade = generator.generate_trade(&indicators).unwrap();
        assert_eq!(
            trade,
            Trade::tradable(Direction::Up, fx(dec!(1.2022)), fx(dec!(1.1995)))
        );
    }

    #[test]
    fn test_generate_trade_is_idempotent() {
        let indicators = lines(&FAST, &MIDDLE, &[dec!(49), dec!(50), dec!(22)]);
        let generator = TradeSignalGenerator::new(signal_config());

        let first = generator.generate_trade(&indicators).unwrap();
        let second = generator.generate_trade(&indicators).unwrap();
        assert_eq!(first, second);
        assert_eq!(generator.state(), GeneratorState::Idle);
        assert!(!generator.is_trade_generated());
    }

    #[test]
    fn test_pair_priority() {
        let mut indicators = IndicatorSet::new();
        let flat_line: &[Decimal] = &[dec!(1.1), dec!(1.1), dec!(1.1)];
        indicators
            .insert("fast_wma", ScriptedLine::boxed("fast_wma", &[&[dec!(1.3), dec!(1.3), dec!(1.3)]]))
            .unwrap();
        indicators.insert("middle_wma", ScriptedLine::boxed("middle_wma", &[flat_line])).unwrap();
        // Price falls through the middle line and rises through the slow line
        indicators
            .insert("price_sma", ScriptedLine::boxed("price_sma", &[&[dec!(1.1), dec!(1.2), dec!(1.0)]]))
            .unwrap();
        indicators
            .insert("slow_wma", ScriptedLine::boxed("slow_wma", &[&[dec!(1.3), dec!(1.1), dec!(0.9)]]))
            .unwrap();
        indicators
            .insert("rsi", ScriptedLine::boxed("rsi", &[&[dec!(50), dec!(50), dec!(50)]]))
            .unwrap();

        let generator = TradeSignalGenerator::new(SignalConfig::default());
        let trade = generator.generate_trade(&indicators).unwrap();
        assert_eq!(trade.direction, Direction::Down);
    }

    #[test]
    fn test_duplicate_signal_suppressed_until_it_leaves_the_window() {
        let rsi: &[Decimal] = &[dec!(50), dec!(50), dec!(50)];
        let mut indicators = IndicatorSet::new();
        indicators
            .insert(
                "fast_wma",
                ScriptedLine::boxed(
                    "fast_wma",
                    &[
                        &[dec!(1.22000), dec!(1.22889), dec!(1.23339)],
                        &FAST,
                        &[dec!(1.23339), dec!(1.23339), dec!(1.23400)],
                    ],
                ),
            )
            .unwrap();
        indicators
            .insert(
                "middle_wma",
                ScriptedLine::boxed(
                    "middle_wma",
                    &[
                        &[dec!(1.24000), dec!(1.23119), dec!(1.23196)],
                        &MIDDLE,
                        &[dec!(1.23196), dec!(1.23196), dec!(1.23200)],
                    ],
                ),
            )
            .unwrap();
        indicators.insert("rsi", ScriptedLine::boxed("rsi", &[rsi, rsi, rsi])).unwrap();

        let mut generator = TradeSignalGenerator::new(signal_config());

        // Crossing on the recent segment is traded once
        let trade = generator.next_trade(&indicators).unwrap();
        assert!(trade.tradable);
        assert_eq!(trade.entry_price, fx(dec!(1.23386)));
        assert_eq!(generator.state(), GeneratorState::TradableSignal);
        assert!(generator.is_trade_generated());

        let again = generator.next_trade(&indicators).unwrap();
        assert_eq!(again, Trade::rejected(Direction::Up));
        assert_eq!(generator.state(), GeneratorState::NoSignal);

        // One candle later the same crossing sits on the older segment
        indicators.update_all().unwrap();
        generator.roll_forward();
        assert_eq!(generator.state(), GeneratorState::Idle);
        assert!(!generator.next_trade(&indicators).unwrap().tradable);
        assert!(generator.is_trade_generated());

        // And then it is gone
        indicators.update_all().unwrap();
        generator.roll_forward();
        assert!(!generator.is_trade_generated());
        assert_eq!(generator.next_trade(&indicators).unwrap(), Trade::flat());
    }

    #[test]
    fn test_traded_crossing_does_not_mask_a_newer_one() {
        let mut indicators = IndicatorSet::new();
        let level: &[Decimal] = &[dec!(1.20), dec!(1.20), dec!(1.20)];
        indicators.insert("slow", ScriptedLine::boxed("slow", &[level, level, level])).unwrap();
        indicators
            .insert(
                "fast",
                ScriptedLine::boxed(
                    "fast",
                    &[
                        &[dec!(1.18), dec!(1.19), dec!(1.21)],
                        &[dec!(1.19), dec!(1.21), dec!(1.22)],
                        &[dec!(1.21), dec!(1.22), dec!(1.23)],
                    ],
                ),
            )
            .unwrap();
        indicators
            .insert(
                "price",
                ScriptedLine::boxed(
                    "price",
                    &[
                        &[dec!(1.25), dec!(1.25), dec!(1.25)],
                        &[dec!(1.25), dec!(1.25), dec!(1.18)],
                        &[dec!(1.25), dec!(1.18), dec!(1.17)],
                    ],
                ),
            )
            .unwrap();

        let mut generator = TradeSignalGenerator::new(SignalConfig {
            crossovers: vec![
                CrossoverPair::new("fast", "slow"),
                CrossoverPair::new("price", "slow"),
            ],
            rsi_indicator: None,
            ..Default::default()
        });

        // Fast line rises through the level
        assert_eq!(
            generator.next_trade(&indicators).unwrap(),
            Trade::tradable(Direction::Up, fx(dec!(1.2022)), fx(dec!(1.1995)))
        );

        // Next candle: the traded crossing sits on the older segment while the
        // price line falls through the level on the recent one
        indicators.update_all().unwrap();
        generator.roll_forward();
        assert_eq!(
            generator.next_trade(&indicators).unwrap(),
            Trade::tradable(Direction::Down, fx(dec!(1.1978)), fx(dec!(1.2005)))
        );
        assert_eq!(generator.state(), GeneratorState::TradableSignal);

        // Only the already traded price crossing is left
        indicators.update_all().unwrap();
        generator.roll_forward();
        assert_eq!(
            generator.next_trade(&indicators).unwrap(),
            Trade::rejected(Direction::Down)
        );
        assert!(generator.is_trade_generated());

        // The pure evaluation still reports the crossing itself
        assert_eq!(
            generator.generate_trade(&indicators).unwrap(),
            Trade::tradable(Direction::Down, fx(dec!(1.1978)), fx(dec!(1.2005)))
        );
    }

    #[test]
    fn test_lines_must_be_ready() {
        let indicators = lines(&FAST[1..], &MIDDLE, &[dec!(50), dec!(50), dec!(50)]);
        let generator = TradeSignalGenerator::new(signal_config());

        assert_eq!(
            generator.generate_trade(&indicators),
            Err(SignalError::NotReady {
                indicator: "fast_wma".to_string(),
                available: 2,
                required: 3,
            })
        );

        // RSI readiness is checked even when no line crosses
        let indicators = lines(&FAST, &MIDDLE, &[dec!(50)]);
        assert!(matches!(
            generator.generate_trade(&indicators),
            Err(SignalError::NotReady { .. })
        ));
    }

    #[test]
    fn test_unknown_line() {
        let indicators = lines(&FAST, &MIDDLE, &[dec!(50), dec!(50), dec!(50)]);
        let generator = TradeSignalGenerator::new(SignalConfig::default());

        assert_eq!(
            generator.generate_trade(&indicators),
            Err(SignalError::UnknownIndicator("price_sma".to_string()))
        );
        assert!(generator.validate(&indicators).is_err());
        assert!(
            TradeSignalGenerator::new(signal_config())
                .validate(&indicators)
                .is_ok()
        );
    }

    #[test]
    fn test_no_rsi_filter() {
        let indicators = lines(&FAST, &MIDDLE, &[dec!(99), dec!(99), dec!(99)]);
        let generator = TradeSignalGenerator::new(SignalConfig {
            rsi_indicator: None,
            ..signal_config()
        });
        assert!(generator.generate_trade(&indicators).unwrap().tradable);
    }
}
