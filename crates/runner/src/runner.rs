//! Async driver: price feed → session → trade sink

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use trendline_ports::{FeedError, PriceFeed, SinkError, TradeSink};

use crate::error::{SessionError, SessionResult};
use crate::session::TradingSession;

/// Counters for one finished run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub instrument: String,
    /// Ticks received from the feed
    pub ticks: u64,
    /// Trades handed to the sink
    pub trades: u64,
    /// Cycles abandoned after an error
    pub skipped: u64,
}

/// Drives one session until its feed is exhausted
pub struct SessionRunner<F: PriceFeed, S: TradeSink> {
    session: TradingSession,
    feed: F,
    sink: Arc<S>,
    poll_interval: Option<Duration>,
}

impl<F: PriceFeed, S: TradeSink> SessionRunner<F, S> {
    pub fn new(session: TradingSession, feed: F, sink: Arc<S>) -> Self {
        Self {
            session,
            feed,
            sink,
            poll_interval: None,
        }
    }

    /// Builder: wait this long between feed polls
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = Some(interval);
        self
    }

    pub fn session(&self) -> &TradingSession {
        &self.session
    }

    /// Run until the feed reports no more ticks
    ///
    /// A failed cycle is logged and skipped. A disconnected feed or a closed
    /// sink ends the run with an error.
    pub async fn run(mut self) -> SessionResult<RunSummary> {
        let mut summary = RunSummary {
            instrument: self.session.instrument().to_string(),
            ..Default::default()
        };
        let mut ticker = self.poll_interval.map(|period| {
            let mut ticker = time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker
        });

        log::info!(
            "[Runner {}] starting on feed {}",
            summary.instrument,
            self.feed.name()
        );

        loop {
            if let Some(ticker) = ticker.as_mut() {
                ticker.tick().await;
            }

            let tick = match self.feed.next_tick().await {
                Ok(Some(tick)) => tick,
                Ok(None) => break,
                Err(FeedError::Malformed(reason)) => {
                    log::warn!("[Runner {}] malformed update: {}", summary.instrument, reason);
                    summary.skipped += 1;
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            summary.ticks += 1;

            let trade = match self.session.on_tick(&tick) {
                Ok(Some(trade)) => trade,
                Ok(None) => continue,
                Err(err) => {
                    log::warn!("[Runner {}] cycle skipped: {}", summary.instrument, err);
                    summary.skipped += 1;
                    if err.needs_resync() {
                        self.session.resync()?;
                    }
                    continue;
                }
            };

            match self.sink.submit(&summary.instrument, trade).await {
                Ok(()) => summary.trades += 1,
                Err(SinkError::Rejected(reason)) => {
                    log::warn!("[Runner {}] trade rejected: {}", summary.instrument, reason);
                }
                Err(err) => return Err(err.into()),
            }
        }

        log::info!(
            "[Runner {}] finished: {} ticks, {} trades, {} skipped",
            summary.instrument,
            summary.ticks,
            summary.trades,
            summary.skipped
        );
        Ok(summary)
    }
}

/// Run each session on its own task
///
/// Results come back in the order the runners were given.
pub async fn run_instruments<F, S>(runners: Vec<SessionRunner<F, S>>) -> Vec<SessionResult<RunSummary>>
where
    F: PriceFeed + 'static,
    S: TradeSink + 'static,
{
    let handles: Vec<_> = runners
        .into_iter()
        .map(|runner| tokio::spawn(runner.run()))
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(match handle.await {
            Ok(result) => result,
            Err(err) => Err(SessionError::Task(err.to_string())),
        });
    }
    results
}
