//! Trendline Ports
//!
//! Port definitions (traits) for the Trendline signal engine.
//! These define the boundaries between the signal core and its collaborators:
//! the candle source indicators read from, the broker price feed, and the
//! order-placement layer that consumes trades.

mod candles;
mod error;
mod feed;
mod indicator;
mod sink;

pub use candles::CandleSource;
pub use error::{
    FeedError, FeedResult, IndicatorError, IndicatorResult, SignalError, SignalResult, SinkError,
    SinkResult,
};
pub use feed::PriceFeed;
pub use indicator::{Indicator, POINT_WINDOW};
pub use sink::TradeSink;
