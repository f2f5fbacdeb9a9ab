use thiserror::Error;

use crate::values::Timestamp;

/// Errors raised while maintaining a candlestick series
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Candle at {candle} is not after the last candle at {last}")]
    OutOfOrder { last: Timestamp, candle: Timestamp },

    #[error("Candle at {0} is complete and cannot be replaced")]
    CandleComplete(Timestamp),

    #[error("Tick at {tick} precedes the forming candle at {last}")]
    StaleTick { last: Timestamp, tick: Timestamp },

    #[error("Invalid retention: {0}")]
    InvalidRetention(String),
}

pub type SeriesResult<T> = std::result::Result<T, SeriesError>;

/// Error for configuration vocabulary that cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {what}: '{value}'")]
pub struct ParseError {
    pub what: &'static str,
    pub value: String,
}

impl ParseError {
    pub fn new(what: &'static str, value: impl Into<String>) -> Self {
        Self {
            what,
            value: value.into(),
        }
    }
}
