//! Trendline Strategy
//!
//! Turns indicator lines into trade candidates:
//! - Named indicator sets built from configuration
//! - Strategy and signal configuration with defaults
//! - Crossover detection with RSI filtering and duplicate-signal memory
//!
//! ## Architecture
//!
//! ```text
//!  CandleSource ──► IndicatorSet ──► points (last 3 per line)
//!                                        │
//!                                        ▼
//!                              TradeSignalGenerator
//!                      (segments → intersection → direction
//!                         → RSI filter → entry / stop-loss)
//!                                        │
//!                                        ▼
//!                                      Trade
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trendline_strategy::{IndicatorSet, StrategyConfig, TradeSignalGenerator};
//!
//! let config = StrategyConfig::default();
//! let indicators = IndicatorSet::from_config(&config, series.source())?;
//! let mut generator = TradeSignalGenerator::new(config.signal.clone());
//!
//! let trade = generator.next_trade(&indicators)?;
//! ```

pub mod config;
pub mod generator;
pub mod indicator_set;

pub use config::{CrossoverPair, NamedIndicatorConfig, SignalConfig, StrategyConfig};
pub use generator::{GeneratorState, SegmentPosition, TradeSignalGenerator};
pub use indicator_set::IndicatorSet;
