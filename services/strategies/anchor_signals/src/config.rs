//! Strategy configuration

use crate::error::{Result, StrategyError};
use crate::indicators::VOLATILITY_EPSILON;
use coin_config::{load_layered, CoinMetadata, CoinSpec};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Moving average periods for the crossover
    pub fast_window: usize,
    pub slow_window: usize,

    /// Trailing returns in the volatility estimate
    pub volatility_window: usize,

    /// Moving average periods for the anchor trend
    pub anchor_fast_window: usize,
    pub anchor_slow_window: usize,

    /// Added to volatility before inverting it into a size
    pub volatility_epsilon: Decimal,

    /// Upper clip on the unsigned position size
    pub max_position_size: Decimal,

    /// Anchor whose trend gates signals. When unset, a `[metadata]` section
    /// supplies its first anchor, otherwise BTC/1H.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_anchor: Option<CoinSpec>,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            fast_window: 5,
            slow_window: 15,
            volatility_window: 10,
            anchor_fast_window: 10,
            anchor_slow_window: 20,
            volatility_epsilon: VOLATILITY_EPSILON,
            max_position_size: Decimal::ONE,
            primary_anchor: None,
        }
    }
}

impl StrategyConfig {
    /// Default parameters gated by the metadata's primary anchor
    pub fn from_metadata(metadata: &CoinMetadata) -> Result<Self> {
        let primary_anchor = metadata
            .primary_anchor()
            .cloned()
            .ok_or_else(|| configuration("coin metadata lists no anchors"))?;

        Ok(Self {
            primary_anchor: Some(primary_anchor),
            ..Self::default()
        })
    }

    /// The configured primary anchor, or BTC/1H
    pub fn gating_anchor(&self) -> CoinSpec {
        self.primary_anchor
            .clone()
            .unwrap_or_else(|| CoinSpec::new("BTC", "1H"))
    }

    /// Wide-table column holding the primary anchor's closes
    pub fn anchor_column(&self) -> String {
        self.gating_anchor().anchor_column()
    }

    pub fn validate(&self) -> Result<()> {
        if self.fast_window == 0 || self.anchor_fast_window == 0 {
            return Err(configuration("moving average windows must be non-zero"));
        }
        if self.fast_window >= self.slow_window {
            return Err(configuration(format!(
                "fast_window ({}) must be shorter than slow_window ({})",
                self.fast_window, self.slow_window
            )));
        }
        if self.anchor_fast_window >= self.anchor_slow_window {
            return Err(configuration(format!(
                "anchor_fast_window ({}) must be shorter than anchor_slow_window ({})",
                self.anchor_fast_window, self.anchor_slow_window
            )));
        }
        if self.volatility_window < 2 {
            return Err(configuration(
                "volatility_window needs at least two returns for a sample deviation",
            ));
        }
        if self.volatility_epsilon <= Decimal::ZERO {
            return Err(configuration("volatility_epsilon must be positive"));
        }
        if self.max_position_size <= Decimal::ZERO || self.max_position_size > Decimal::ONE {
            return Err(configuration("max_position_size must be in (0, 1]"));
        }
        if let Some(anchor) = &self.primary_anchor {
            if anchor.symbol.trim().is_empty() || anchor.timeframe.trim().is_empty() {
                return Err(configuration("primary_anchor needs a symbol and a timeframe"));
            }
        }
        Ok(())
    }
}

impl strategy_shared::StrategyConfig for StrategyConfig {
    fn validate(&self) -> anyhow::Result<()> {
        Ok(StrategyConfig::validate(self)?)
    }
}

fn configuration(message: impl Into<String>) -> StrategyError {
    StrategyError::Configuration {
        message: message.into(),
    }
}

/// File layout of `config/signals.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalsConfig {
    pub metadata: Option<CoinMetadata>,
    pub strategy: StrategyConfig,
}

impl SignalsConfig {
    /// Load through file, environment file and `SIGNALS__` variables
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> anyhow::Result<Self> {
        let config: Self = load_layered(base_path, environment)?;
        if let Some(metadata) = &config.metadata {
            metadata.validate()?;
        }
        Ok(config)
    }

    /// Coin universe, falling back to the built-in one
    pub fn metadata(&self) -> CoinMetadata {
        self.metadata.clone().unwrap_or_default()
    }

    /// Strategy parameters. An explicit `strategy.primary_anchor` wins over
    /// the first anchor of a `[metadata]` section.
    pub fn strategy_config(&self) -> Result<StrategyConfig> {
        let mut strategy = self.strategy.clone();
        if strategy.primary_anchor.is_none() {
            if let Some(metadata) = &self.metadata {
                strategy.primary_anchor = StrategyConfig::from_metadata(metadata)?.primary_anchor;
            }
        }
        strategy.validate()?;
        Ok(strategy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_is_valid() {
        let config = StrategyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.anchor_column(), "close_BTC_1H");
        assert_eq!(config.volatility_epsilon, dec!(0.000001));
    }

    #[test]
    fn test_from_builtin_metadata_matches_default() {
        let config = StrategyConfig::from_metadata(&coin_config::get_coin_metadata()).unwrap();
        assert_eq!(config.primary_anchor, Some(CoinSpec::new("BTC", "1H")));
        assert_eq!(config.anchor_column(), StrategyConfig::default().anchor_column());
    }

    #[test]
    fn test_invalid_windows() {
        let config = StrategyConfig {
            fast_window: 15,
            slow_window: 5,
            ..StrategyConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(StrategyError::Configuration { .. })
        ));

        let config = StrategyConfig {
            volatility_window: 1,
            ..StrategyConfig::default()
        };
        assert!(config.validate().is_err());

        let config = StrategyConfig {
            max_position_size: dec!(1.5),
            ..StrategyConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_signals_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("signals.toml");
        fs::write(
            &path,
            r#"
[strategy]
fast_window = 3
slow_window = 8

[[metadata.targets]]
symbol = "WIF"
timeframe = "1H"

[[metadata.anchors]]
symbol = "ETH"
timeframe = "1H"
"#,
        )
        .unwrap();

        let config = SignalsConfig::load(Some(&path), None).unwrap();
        let strategy = config.strategy_config().unwrap();

        assert_eq!(strategy.fast_window, 3);
        assert_eq!(strategy.slow_window, 8);
        assert_eq!(strategy.volatility_window, 10);
        assert_eq!(strategy.anchor_column(), "close_ETH_1H");
        assert_eq!(config.metadata().targets, vec![CoinSpec::new("WIF", "1H")]);
    }

    #[test]
    fn test_strategy_section_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("signals.toml");
        fs::write(&path, "[strategy]\nmax_position_size = 0.5\n").unwrap();

        let config = SignalsConfig::load(Some(&path), None).unwrap();
        let strategy = config.strategy_config().unwrap();

        assert_eq!(strategy.max_position_size, dec!(0.5));
        assert_eq!(strategy.primary_anchor, None);
        assert_eq!(strategy.gating_anchor(), CoinSpec::new("BTC", "1H"));
        assert_eq!(config.metadata(), coin_config::get_coin_metadata());
    }

    #[test]
    fn test_explicit_primary_anchor_beats_metadata() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("signals.toml");
        fs::write(
            &path,
            r#"
[strategy.primary_anchor]
symbol = "SOL"
timeframe = "4H"

[[metadata.targets]]
symbol = "BONK"
timeframe = "1H"

[[metadata.anchors]]
symbol = "ETH"
timeframe = "1H"
"#,
        )
        .unwrap();

        let config = SignalsConfig::load(Some(&path), None).unwrap();
        let strategy = config.strategy_config().unwrap();

        assert_eq!(strategy.anchor_column(), "close_SOL_4H");
        assert_eq!(config.metadata().primary_anchor(), Some(&CoinSpec::new("ETH", "1H")));
    }

    #[test]
    fn test_blank_primary_anchor_rejected() {
        let config = StrategyConfig {
            primary_anchor: Some(CoinSpec::new("", "1H")),
            ..StrategyConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
