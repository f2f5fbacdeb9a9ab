use std::sync::Arc;

use trendline_indicators::create_indicator;
use trendline_ports::{CandleSource, Indicator, IndicatorResult, SignalError, SignalResult};

use crate::config::StrategyConfig;

/// Indicators of one instrument, looked up by configured name
///
/// Insertion order is kept so updates and logs are deterministic.
#[derive(Default)]
pub struct IndicatorSet {
    entries: Vec<(String, Box<dyn Indicator>)>,
}

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every configured indicator over one candle source
    pub fn from_config(
        config: &StrategyConfig,
        source: Arc<dyn CandleSource>,
    ) -> SignalResult<Self> {
        let mut set = Self::new();
        for named in &config.indicators {
            named.config.validate(&config.period_bounds)?;
            let indicator = create_indicator(&named.config, Arc::clone(&source))?;
            set.insert(named.name.clone(), indicator)?;
        }
        log::debug!("[IndicatorSet] built {} indicators", set.len());
        Ok(set)
    }

    pub fn insert(
        &mut self,
        name: impl Into<String>,
        indicator: Box<dyn Indicator>,
    ) -> SignalResult<()> {
        let name = name.into();
        if self.contains(&name) {
            return Err(SignalError::DuplicateIndicator(name));
        }
        self.entries.push((name, indicator));
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Indicator> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, indicator)| indicator.as_ref())
    }

    /// Like [`get`](Self::get) but an unknown name is an error
    pub fn require(&self, name: &str) -> SignalResult<&dyn Indicator> {
        self.get(name)
            .ok_or_else(|| SignalError::UnknownIndicator(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Roll every indicator forward to the source's newest candle
    ///
    /// Stops at the first failure; indicators before it have been updated.
    pub fn update_all(&mut self) -> IndicatorResult<()> {
        for (_, indicator) in self.entries.iter_mut() {
            indicator.update_indicator()?;
        }
        Ok(())
    }
}
