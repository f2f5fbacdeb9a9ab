mod candlestick;
mod granularity;
mod indicator_kind;
mod price_selector;
mod series;
mod tick;
mod trade;

pub use candlestick::Candlestick;
pub use granularity::Granularity;
pub use indicator_kind::IndicatorKind;
pub use price_selector::PriceSelector;
pub use series::{CandlestickSeries, Retention, SeriesUpdate};
pub use tick::PriceTick;
pub use trade::{Direction, Trade};
