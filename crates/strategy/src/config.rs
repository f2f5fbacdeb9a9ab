//! Strategy configuration
//!
//! Plain structs with defaults; the loader that reads them from YAML or
//! JSON lives outside this crate. [`StrategyConfig::from_json`] covers the
//! JSON case for tools and tests.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use trendline_core::{FixedDecimal, Granularity, IndicatorKind, PriceSelector, Retention};
use trendline_indicators::{IndicatorConfig, PeriodBounds};
use trendline_ports::{POINT_WINDOW, SignalError, SignalResult};

/// An indicator and the name the signal configuration refers to it by
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedIndicatorConfig {
    pub name: String,
    #[serde(flatten)]
    pub config: IndicatorConfig,
}

impl NamedIndicatorConfig {
    pub fn new(
        name: impl Into<String>,
        kind: IndicatorKind,
        period: usize,
        price_selector: PriceSelector,
    ) -> Self {
        Self {
            name: name.into(),
            config: IndicatorConfig::new(kind, period, price_selector),
        }
    }
}

/// Two lines tested for a crossover; `fast` crossing above `slow` is Up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossoverPair {
    pub fast: String,
    pub slow: String,
}

impl CrossoverPair {
    pub fn new(fast: impl Into<String>, slow: impl Into<String>) -> Self {
        Self {
            fast: fast.into(),
            slow: slow.into(),
        }
    }
}

/// Crossover priority, RSI filter and price offsets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Pairs in priority order; the first crossing pair decides
    pub crossovers: Vec<CrossoverPair>,
    /// Indicator read by the RSI filter (no filter if `None`)
    pub rsi_indicator: Option<String>,
    /// Up signals are rejected above this RSI
    pub rsi_upper_threshold: FixedDecimal,
    /// Down signals are rejected below this RSI
    pub rsi_lower_threshold: FixedDecimal,
    /// Distance from the intersection price to the entry price
    pub entry_offset: FixedDecimal,
    /// Distance from the intersection price to the stop-loss price
    pub stop_loss_offset: FixedDecimal,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            crossovers: vec![
                CrossoverPair::new("fast_wma", "middle_wma"),
                CrossoverPair::new("price_sma", "middle_wma"),
                CrossoverPair::new("price_sma", "slow_wma"),
            ],
            rsi_indicator: Some("rsi".to_string()),
            rsi_upper_threshold: FixedDecimal::new(dec!(50)),
            rsi_lower_threshold: FixedDecimal::new(dec!(50)),
            entry_offset: FixedDecimal::new(dec!(0.0022)),
            stop_loss_offset: FixedDecimal::new(dec!(0.0005)),
        }
    }
}

impl SignalConfig {
    /// Every indicator name the generator will look up
    pub fn referenced_indicators(&self) -> impl Iterator<Item = &str> {
        self.crossovers
            .iter()
            .flat_map(|pair| [pair.fast.as_str(), pair.slow.as_str()])
            .chain(self.rsi_indicator.as_deref())
    }

    pub fn validate(&self) -> SignalResult<()> {
        if self.crossovers.is_empty() {
            return Err(SignalError::InvalidConfig(
                "at least one crossover pair is required".to_string(),
            ));
        }
        if let Some(pair) = self.crossovers.iter().find(|p| p.fast == p.slow) {
            return Err(SignalError::InvalidConfig(format!(
                "crossover pair compares {} with itself",
                pair.fast
            )));
        }
        if self.entry_offset.is_sign_negative() || self.stop_loss_offset.is_sign_negative() {
            return Err(SignalError::InvalidConfig(
                "price offsets must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Everything one trading session needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    pub granularity: Granularity,
    pub retention: Retention,
    pub period_bounds: PeriodBounds,
    pub indicators: Vec<NamedIndicatorConfig>,
    pub signal: SignalConfig,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            granularity: Granularity::M30,
            retention: Retention::Bounded(500),
            period_bounds: PeriodBounds::default(),
            indicators: vec![
                NamedIndicatorConfig::new("fast_wma", IndicatorKind::Weighted, 5, PriceSelector::Close),
                NamedIndicatorConfig::new("middle_wma", IndicatorKind::Weighted, 20, PriceSelector::Close),
                NamedIndicatorConfig::new("slow_wma", IndicatorKind::Weighted, 50, PriceSelector::Close),
                NamedIndicatorConfig::new("price_sma", IndicatorKind::Simple, 1, PriceSelector::Close),
                NamedIndicatorConfig::new("trend_ema", IndicatorKind::Exponential, 100, PriceSelector::Close),
                NamedIndicatorConfig::new("rsi", IndicatorKind::Rsi, 14, PriceSelector::Close),
            ],
            signal: SignalConfig::default(),
        }
    }
}

impl StrategyConfig {
    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(text: &str) -> SignalResult<Self> {
        let config: Self =
            serde_json::from_str(text).map_err(|e| SignalError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Longest warm-up among the configured indicators
    pub fn warm_up(&self) -> usize {
        self.indicators
            .iter()
            .map(|named| named.config.period)
            .max()
            .unwrap_or(0)
    }

    /// Fewest candles a bounded series may keep
    ///
    /// The warm-up plus enough settled candles for every line to carry a
    /// full point window.
    pub fn min_retention(&self) -> usize {
        self.warm_up() + POINT_WINDOW - 1
    }

    pub fn validate(&self) -> SignalResult<()> {
        let mut names = HashSet::new();
        for named in &self.indicators {
            if !names.insert(named.name.as_str()) {
                return Err(SignalError::DuplicateIndicator(named.name.clone()));
            }
            named.config.validate(&self.period_bounds)?;
        }

        self.signal.validate()?;
        if let Some(unknown) = self
            .signal
            .referenced_indicators()
            .find(|name| !names.contains(name))
        {
            return Err(SignalError::UnknownIndicator(unknown.to_string()));
        }

        match self.retention {
            Retention::Bounded(max) if max < self.min_retention() => {
                Err(SignalError::InvalidConfig(format!(
                    "retention of {} candles is below the {} candles needed for a {} candle warm-up",
                    max,
                    self.min_retention(),
                    self.warm_up()
                )))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trendline_ports::IndicatorError;

    #[test]
    fn test_default_config_is_valid() {
        let config = StrategyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.indicators.len(), 6);
        assert_eq!(config.warm_up(), 100);
        assert_eq!(config.signal.entry_offset, FixedDecimal::new(dec!(0.0022)));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = StrategyConfig::from_json(
            r#"{
                "granularity": "H1",
                "signal": { "entry_offset": "0.0030" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.granularity, Granularity::H1);
        assert_eq!(config.signal.entry_offset, FixedDecimal::new(dec!(0.003)));
        assert_eq!(config.signal.stop_loss_offset, FixedDecimal::new(dec!(0.0005)));
        assert_eq!(config.indicators.len(), 6);
    }

    #[test]
    fn test_from_json_indicator_list() {
        let config = StrategyConfig::from_json(
            r#"{
                "retention": "Unbounded",
                "indicators": [
                    { "name": "fast", "kind": "Weighted", "period": 3 },
                    { "name": "slow", "kind": "Simple", "period": 8, "price_selector": "Median" }
                ],
                "signal": {
                    "crossovers": [ { "fast": "fast", "slow": "slow" } ],
                    "rsi_indicator": null
                }
            }"#,
        )
        .unwrap();
        assert_eq!(config.indicators[0].config.price_selector, PriceSelector::Close);
        assert_eq!(config.indicators[1].config.price_selector, PriceSelector::Median);
        assert_eq!(config.signal.rsi_indicator, None);
    }

    #[test]
    fn test_unknown_crossover_indicator() {
        let mut config = StrategyConfig::default();
        config.signal.crossovers.push(CrossoverPair::new("fast_wma", "hull"));
        assert_eq!(
            config.validate(),
            Err(SignalError::UnknownIndicator("hull".to_string()))
        );
    }

    #[test]
    fn test_duplicate_names_and_bad_periods() {
        let mut config = StrategyConfig::default();
        config.indicators.push(NamedIndicatorConfig::new(
            "rsi",
            IndicatorKind::Rsi,
            7,
            PriceSelector::Close,
        ));
        assert_eq!(
            config.validate(),
            Err(SignalError::DuplicateIndicator("rsi".to_string()))
        );

        let mut config = StrategyConfig::default();
        config.indicators[0].config.period = 0;
        assert_eq!(
            config.validate(),
            Err(SignalError::Indicator(IndicatorError::InvalidPeriod {
                period: 0,
                min: 1,
                max: 500
            }))
        );
    }

    #[test]
    fn test_retention_must_cover_warm_up() {
        let config = StrategyConfig {
            retention: Retention::Bounded(50),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SignalError::InvalidConfig(_))));
    }

    #[test]
    fn test_retention_must_leave_room_for_three_points() {
        let config = |max| StrategyConfig {
            retention: Retention::Bounded(max),
            ..Default::default()
        };
        assert_eq!(config(0).min_retention(), 102);

        // Warm-up alone leaves one value per line, one more leaves two
        for max in [100, 101] {
            assert!(matches!(
                config(max).validate(),
                Err(SignalError::InvalidConfig(_))
            ));
        }
        assert_eq!(config(102).validate(), Ok(()));
    }

    #[test]
    fn test_signal_config_rules() {
        let config = SignalConfig {
            crossovers: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SignalConfig {
            crossovers: vec![CrossoverPair::new("a", "a")],
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
