//! Trendline Core Domain
//!
//! Pure domain types for the Trendline signal engine.
//! No async and no I/O: everything here is plain data and arithmetic.

pub mod entities;
pub mod error;
pub mod geometry;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{
    // Market data
    Candlestick,
    CandlestickSeries,
    Granularity,
    PriceTick,
    Retention,
    SeriesUpdate,
    // Indicator configuration vocabulary
    IndicatorKind,
    PriceSelector,
    // Signal output
    Direction,
    Trade,
};
pub use error::{ParseError, SeriesError, SeriesResult};
pub use geometry::{LineSegment, Point};
pub use values::{FixedDecimal, SCALE, Timestamp};
