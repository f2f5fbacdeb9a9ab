use async_trait::async_trait;
use trendline_core::Trade;

use crate::error::SinkResult;

/// Port for the order-placement layer that consumes trades
#[async_trait]
pub trait TradeSink: Send + Sync {
    async fn submit(&self, instrument: &str, trade: Trade) -> SinkResult<()>;
}
