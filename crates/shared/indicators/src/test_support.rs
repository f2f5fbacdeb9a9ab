//! Candle fixtures for unit tests

use std::sync::Arc;

use chrono::{TimeDelta, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use trendline_core::{
    Candlestick, CandlestickSeries, FixedDecimal, Granularity, Retention, Timestamp,
};
use trendline_ports::CandleSource;

pub(crate) const CLOSES: [Decimal; 10] = [
    dec!(1.10000),
    dec!(1.10250),
    dec!(1.10100),
    dec!(1.10400),
    dec!(1.10350),
    dec!(1.10600),
    dec!(1.10550),
    dec!(1.10300),
    dec!(1.10450),
    dec!(1.10800),
];

pub(crate) fn start() -> Timestamp {
    Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap()
}

pub(crate) fn fx(values: &[Decimal]) -> Vec<FixedDecimal> {
    values.iter().copied().map(FixedDecimal::new).collect()
}

/// M30 candles closing at `closes`, each opening at the previous close
///
/// The first candle opens 0.0005 below its close.
pub(crate) fn candles(closes: &[Decimal]) -> Vec<Candlestick> {
    let mut open = closes.first().copied().unwrap_or_default() - dec!(0.0005);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let candle = Candlestick::new(
                start() + TimeDelta::minutes(30 * i as i64),
                FixedDecimal::new(open),
                FixedDecimal::new(open.max(close)),
                FixedDecimal::new(open.min(close)),
                FixedDecimal::new(close),
                100,
            );
            open = close;
            candle
        })
        .collect()
}

pub(crate) fn source(closes: &[Decimal]) -> Arc<dyn CandleSource> {
    Arc::new(
        CandlestickSeries::with_candles(Granularity::M30, Retention::Unbounded, candles(closes))
            .unwrap(),
    )
}
