//! Bundled trade sinks

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use trendline_core::Trade;
use trendline_ports::{SinkError, SinkResult, TradeSink};

/// A trade tagged with the instrument it was generated for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmittedTrade {
    pub instrument: String,
    pub trade: Trade,
}

/// Forwards trades to an mpsc channel
#[derive(Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<EmittedTrade>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<EmittedTrade>) -> Self {
        Self { tx }
    }

    /// Sink plus the receiving end of a bounded channel
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<EmittedTrade>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self::new(tx), rx)
    }
}

#[async_trait]
impl TradeSink for ChannelSink {
    async fn submit(&self, instrument: &str, trade: Trade) -> SinkResult<()> {
        self.tx
            .send(EmittedTrade {
                instrument: instrument.to_string(),
                trade,
            })
            .await
            .map_err(|_| SinkError::ChannelClosed)
    }
}

/// Writes each trade to the log as JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl TradeSink for LogSink {
    async fn submit(&self, instrument: &str, trade: Trade) -> SinkResult<()> {
        let json = serde_json::to_string(&trade).map_err(|e| SinkError::Rejected(e.to_string()))?;
        log::info!("[LogSink] {} {}", instrument, json);
        Ok(())
    }
}
