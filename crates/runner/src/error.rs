use thiserror::Error;
use trendline_core::SeriesError;
use trendline_ports::{FeedError, IndicatorError, SignalError, SinkError};

/// Errors raised while driving a trading session
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Tick for {got} delivered to the {expected} session")]
    WrongInstrument { expected: String, got: String },

    #[error("Series error: {0}")]
    Series(#[from] SeriesError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Signal error: {0}")]
    Signal(#[from] SignalError),

    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("Session task failed: {0}")]
    Task(String),
}

impl SessionError {
    /// Indicators may have fallen out of step with the series
    pub fn needs_resync(&self) -> bool {
        matches!(
            self,
            SessionError::Indicator(_) | SessionError::Signal(SignalError::Indicator(_))
        )
    }
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;
