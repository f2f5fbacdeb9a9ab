//! Trendline Runner - Per-Instrument Signal Sessions
//!
//! Connects the signal core to its collaborators:
//!
//! - **Session**: one instrument's candle series, indicators and generator
//! - **Feeds**: tick replay and a seeded random walk
//! - **Sinks**: mpsc channel and log output
//! - **Runner**: async loop from feed to sink, one task per instrument
//!
//! ## Architecture
//!
//! ```text
//!   PriceFeed ──► SessionRunner ──────────────────────────► TradeSink
//!                      │                                        ▲
//!                      ▼                                        │
//!               TradingSession                                  │
//!     tick ──► CandlestickSeries ──► IndicatorSet ──► TradeSignalGenerator
//! ```

pub mod error;
pub mod feed;
pub mod runner;
pub mod session;
pub mod sink;

pub use error::{SessionError, SessionResult};
pub use feed::{RandomWalkConfig, RandomWalkFeed, ReplayFeed};
pub use runner::{RunSummary, SessionRunner, run_instruments};
pub use session::TradingSession;
pub use sink::{ChannelSink, EmittedTrade, LogSink};
