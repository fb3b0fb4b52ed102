//! Target and anchor coin metadata
//!
//! Targets are the assets signals are generated for. Anchors are liquid
//! reference assets whose trend confirms or suppresses those signals; the
//! first anchor listed is the primary one.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoinSpec {
    pub symbol: String,
    pub timeframe: String,
}

impl CoinSpec {
    pub fn new(symbol: impl Into<String>, timeframe: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            timeframe: timeframe.into(),
        }
    }

    /// Wide-table close column carrying this series, e.g. `close_BTC_1H`
    pub fn anchor_column(&self) -> String {
        types::anchor_column_name(&self.symbol, &self.timeframe)
    }
}

impl fmt::Display for CoinSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.symbol, self.timeframe)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinMetadata {
    pub targets: Vec<CoinSpec>,
    pub anchors: Vec<CoinSpec>,
}

impl Default for CoinMetadata {
    fn default() -> Self {
        get_coin_metadata()
    }
}

impl CoinMetadata {
    /// Anchor whose trend gates target signals
    pub fn primary_anchor(&self) -> Option<&CoinSpec> {
        self.anchors.first()
    }

    pub fn validate(&self) -> Result<()> {
        if self.anchors.is_empty() {
            bail!("at least one anchor must be configured");
        }
        validate_list("targets", &self.targets)?;
        validate_list("anchors", &self.anchors)?;
        Ok(())
    }
}

fn validate_list(name: &str, specs: &[CoinSpec]) -> Result<()> {
    let mut seen = HashSet::new();
    for spec in specs {
        if spec.symbol.trim().is_empty() || spec.timeframe.trim().is_empty() {
            bail!("{name} contains an entry with an empty symbol or timeframe");
        }
        if !seen.insert(spec) {
            bail!("{name} lists {spec} more than once");
        }
    }
    Ok(())
}

/// Built-in coin universe
pub fn get_coin_metadata() -> CoinMetadata {
    CoinMetadata {
        targets: vec![
            CoinSpec::new("BONK", "1H"),
            CoinSpec::new("DOGE", "2H"),
            CoinSpec::new("PEPE", "4H"),
        ],
        anchors: vec![
            CoinSpec::new("BTC", "1H"),
            CoinSpec::new("ETH", "1H"),
            CoinSpec::new("BNB", "2H"),
            CoinSpec::new("SOL", "4H"),
            CoinSpec::new("USDT", "1D"),
        ],
    }
}
