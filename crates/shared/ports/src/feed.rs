use async_trait::async_trait;
use trendline_core::PriceTick;

use crate::error::FeedResult;

/// Port for the broker price feed
///
/// Polling, authentication and wire formats live behind this trait.
#[async_trait]
pub trait PriceFeed: Send {
    /// Next price update, or `None` when the feed is exhausted
    async fn next_tick(&mut self) -> FeedResult<Option<PriceTick>>;

    /// Feed name for logging
    fn name(&self) -> &str {
        "PriceFeed"
    }
}
