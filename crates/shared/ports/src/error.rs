use thiserror::Error;
use trendline_core::{ParseError, SeriesError, Timestamp};

/// Errors raised while building or updating an indicator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    #[error("Period {period} outside allowed range [{min}, {max}]")]
    InvalidPeriod {
        period: usize,
        min: usize,
        max: usize,
    },

    #[error("Price selector must not be empty")]
    MissingPriceSelector,

    #[error("Invalid price selector: {0}")]
    InvalidPriceSelector(String),

    #[error("Unsupported indicator type: {0}")]
    UnsupportedKind(String),

    #[error("{indicator} needs {required} candles, source has {available}")]
    InsufficientData {
        indicator: String,
        required: usize,
        available: usize,
    },

    #[error("{indicator} skipped candles: last seen {last_seen}, source now ends at {newest}")]
    CandleGap {
        indicator: String,
        last_seen: Timestamp,
        newest: Timestamp,
    },

    #[error("{indicator}: division by zero")]
    ZeroDivisor { indicator: String },

    #[error("Series error: {0}")]
    Series(#[from] SeriesError),
}

pub type IndicatorResult<T> = std::result::Result<T, IndicatorError>;

impl From<ParseError> for IndicatorError {
    fn from(err: ParseError) -> Self {
        match err.what {
            "price selector" if err.value.trim().is_empty() => IndicatorError::MissingPriceSelector,
            "price selector" => IndicatorError::InvalidPriceSelector(err.value),
            _ => IndicatorError::UnsupportedKind(err.value),
        }
    }
}

/// Errors raised by a signal-generation cycle
///
/// "No signal" is not an error: it is a flat, non-tradable trade.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignalError {
    #[error("Unknown indicator: {0}")]
    UnknownIndicator(String),

    #[error("Indicator {indicator} not ready: {available} points, need {required}")]
    NotReady {
        indicator: String,
        available: usize,
        required: usize,
    },

    #[error("Duplicate indicator name: {0}")]
    DuplicateIndicator(String),

    #[error("Invalid signal configuration: {0}")]
    InvalidConfig(String),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),
}

pub type SignalResult<T> = std::result::Result<T, SignalError>;

/// Errors from the broker price feed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    #[error("Feed disconnected: {0}")]
    Disconnected(String),

    #[error("Malformed price update: {0}")]
    Malformed(String),
}

pub type FeedResult<T> = std::result::Result<T, FeedError>;

/// Errors from the order-placement layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("Channel closed")]
    ChannelClosed,

    #[error("Trade rejected: {0}")]
    Rejected(String),
}

pub type SinkResult<T> = std::result::Result<T, SinkError>;
