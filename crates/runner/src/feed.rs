//! Bundled price feeds

use async_trait::async_trait;
use chrono::TimeDelta;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use trendline_core::{FixedDecimal, PriceTick, Timestamp};
use trendline_ports::{FeedError, FeedResult, PriceFeed};

/// Replays a fixed list of ticks, then reports exhaustion
pub struct ReplayFeed {
    name: String,
    ticks: VecDeque<PriceTick>,
}

impl ReplayFeed {
    pub fn new(name: impl Into<String>, ticks: impl IntoIterator<Item = PriceTick>) -> Self {
        Self {
            name: name.into(),
            ticks: ticks.into_iter().collect(),
        }
    }

    /// One JSON-encoded tick per non-empty line
    pub fn from_json_lines(name: impl Into<String>, text: &str) -> FeedResult<Self> {
        let ticks = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                serde_json::from_str::<PriceTick>(line)
                    .map_err(|e| FeedError::Malformed(format!("{}: {}", e, line)))
            })
            .collect::<FeedResult<Vec<_>>>()?;
        Ok(Self::new(name, ticks))
    }

    pub fn remaining(&self) -> usize {
        self.ticks.len()
    }
}

#[async_trait]
impl PriceFeed for ReplayFeed {
    async fn next_tick(&mut self) -> FeedResult<Option<PriceTick>> {
        Ok(self.ticks.pop_front())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Smallest price increment at scale 5
const UNITS_PER_PRICE: i64 = 100_000;

/// Configuration for the random walk feed
#[derive(Debug, Clone)]
pub struct RandomWalkConfig {
    pub instrument: String,
    pub start_price: FixedDecimal,
    pub start_time: Timestamp,
    /// Time between ticks
    pub interval: TimeDelta,
    /// Largest price move per tick
    pub max_step: FixedDecimal,
    /// Number of ticks before the feed is exhausted
    pub ticks: usize,
}

/// Synthetic feed walking the price by random steps
///
/// Seeded for reproducible sessions.
pub struct RandomWalkFeed {
    config: RandomWalkConfig,
    price: FixedDecimal,
    timestamp: Timestamp,
    emitted: usize,
    rng: StdRng,
}

impl RandomWalkFeed {
    pub fn new(config: RandomWalkConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: RandomWalkConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: RandomWalkConfig, rng: StdRng) -> Self {
        Self {
            price: config.start_price,
            timestamp: config.start_time,
            emitted: 0,
            rng,
            config,
        }
    }

    fn step(&mut self) -> FixedDecimal {
        // Whole multiples of 0.00001 keep the walk on the price grid
        let max_units = (self.config.max_step.to_f64() * UNITS_PER_PRICE as f64).round() as i64;
        if max_units <= 0 {
            return FixedDecimal::ZERO;
        }
        let units = self.rng.gen_range(-max_units..=max_units);
        FixedDecimal::from_int(units)
            .checked_div(FixedDecimal::from_int(UNITS_PER_PRICE))
            .unwrap_or(FixedDecimal::ZERO)
    }
}

#[async_trait]
impl PriceFeed for RandomWalkFeed {
    async fn next_tick(&mut self) -> FeedResult<Option<PriceTick>> {
        if self.emitted >= self.config.ticks {
            return Ok(None);
        }

        let next = self.price + self.step();
        if next > FixedDecimal::ZERO {
            self.price = next;
        }
        if self.emitted > 0 {
            self.timestamp += self.config.interval;
        }
        self.emitted += 1;

        Ok(Some(
            PriceTick::new(self.config.instrument.clone(), self.timestamp, self.price)
                .with_volume(1),
        ))
    }

    fn name(&self) -> &str {
        "RandomWalk"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn walk_config(ticks: usize) -> RandomWalkConfig {
        RandomWalkConfig {
            instrument: "EUR_USD".to_string(),
            start_price: FixedDecimal::new(dec!(1.1)),
            start_time: Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap(),
            interval: TimeDelta::minutes(10),
            max_step: FixedDecimal::new(dec!(0.0005)),
            ticks,
        }
    }

    #[tokio::test]
    async fn test_replay_feed_drains_in_order() {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
        let ticks = vec![
            PriceTick::new("EUR_USD", start, FixedDecimal::ONE),
            PriceTick::new("EUR_USD", start + TimeDelta::minutes(1), FixedDecimal::TWO),
        ];
        let mut feed = ReplayFeed::new("replay", ticks);

        assert_eq!(feed.name(), "replay");
        assert_eq!(feed.next_tick().await.unwrap().unwrap().price, FixedDecimal::ONE);
        assert_eq!(feed.next_tick().await.unwrap().unwrap().price, FixedDecimal::TWO);
        assert_eq!(feed.next_tick().await, Ok(None));
    }

    #[test]
    fn test_replay_feed_from_json_lines() {
        let text = r#"
            {"instrument":"EUR_USD","timestamp":"2024-01-02T09:00:00Z","price":"1.10250","volume":3}

            {"instrument":"EUR_USD","timestamp":"2024-01-02T09:05:00Z","price":"1.10300","volume":1}
        "#;
        let feed = ReplayFeed::from_json_lines("file", text).unwrap();
        assert_eq!(feed.remaining(), 2);

        let err = ReplayFeed::from_json_lines("file", "{\"price\": 1}").err();
        assert!(matches!(err, Some(FeedError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_random_walk_is_reproducible() {
        let mut first = RandomWalkFeed::with_seed(walk_config(20), 7);
        let mut second = RandomWalkFeed::with_seed(walk_config(20), 7);

        let mut count = 0;
        while let Some(tick) = first.next_tick().await.unwrap() {
            let other = second.next_tick().await.unwrap().unwrap();
            assert_eq!(tick, other);
            assert!(tick.price > FixedDecimal::ZERO);
            count += 1;
        }
        assert_eq!(count, 20);
        assert_eq!(second.next_tick().await, Ok(None));
    }

    #[tokio::test]
    async fn test_random_walk_steps_are_bounded() {
        let mut feed = RandomWalkFeed::with_seed(walk_config(50), 42);
        let mut previous = FixedDecimal::new(dec!(1.1));
        let mut last_time = None;
        while let Some(tick) = feed.next_tick().await.unwrap() {
            assert!((tick.price - previous).abs() <= FixedDecimal::new(dec!(0.0005)));
            if let Some(last) = last_time {
                assert_eq!(tick.timestamp - last, TimeDelta::minutes(10));
            }
            previous = tick.price;
            last_time = Some(tick.timestamp);
        }
    }
}
