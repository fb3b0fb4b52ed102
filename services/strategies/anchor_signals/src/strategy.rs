//! Anchor-filtered SMA crossover signal generation
//!
//! Each target symbol is processed independently over its own sorted series:
//! crossover of a fast and a slow close average gives the direction, inverse
//! return volatility gives the size, and the primary anchor's trend decides
//! whether the direction survives.

use crate::config::StrategyConfig;
use crate::error::Result;
use crate::filter::AnchorTrend;
use crate::indicators::{CompositeIndicator, IndicatorSignal};
use rust_decimal::Decimal;
use serde_json::Value;
use strategy_shared::{SignalGenerator, SignalStats};
use tracing::{debug, info, warn};
use types::{AnchorTable, CandleRow, Signal, SignalRow, SignalTable, TargetCandles};

/// Indicator values and sizing for one row of a symbol's sorted series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolSnapshot {
    pub timestamp: i64,
    pub indicators: IndicatorSignal,
    /// Unsigned volatility-scaled size, `None` until volatility is defined
    pub base_position_size: Option<Decimal>,
    /// Crossover signal before the anchor filter
    pub raw_signal: Signal,
}

#[derive(Debug, Clone, Default)]
pub struct AnchorSignalStrategy {
    config: StrategyConfig,
}

impl AnchorSignalStrategy {
    pub fn new(config: StrategyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Generate one signal row per target candle row
    pub fn generate(&self, targets: &TargetCandles, anchors: &AnchorTable) -> Result<SignalTable> {
        let anchor_column = self.config.anchor_column();
        let trend = AnchorTrend::from_table(
            anchors,
            &anchor_column,
            self.config.anchor_fast_window,
            self.config.anchor_slow_window,
        );
        if trend.is_none() && !targets.is_empty() {
            warn!(
                "Anchor column {} not present, signals are not trend-filtered",
                anchor_column
            );
        }

        let mut table = SignalTable::default();
        for symbol in targets.symbols() {
            let series = targets.series_for(symbol);
            let block = self.symbol_block(symbol, &series, trend.as_ref())?;
            table.extend_block(block);
        }

        let stats = SignalStats::from_rows(table.rows());
        info!(
            rows = stats.total_rows,
            long = stats.long_signals,
            short = stats.short_signals,
            missing_sizes = stats.missing_sizes,
            "Generated signals"
        );

        Ok(table)
    }

    /// [`generate`](Self::generate) over JSON record arrays, checking the column contract first
    pub fn generate_from_records(&self, targets: &[Value], anchors: &[Value]) -> Result<SignalTable> {
        let targets = TargetCandles::from_json_records(targets)?;
        let anchors = AnchorTable::from_json_records(anchors)?;
        self.generate(&targets, &anchors)
    }

    /// Indicator snapshots for one symbol's series, already sorted by timestamp
    pub fn snapshots(&self, series: &[&CandleRow]) -> Vec<SymbolSnapshot> {
        let mut indicator = CompositeIndicator::new(
            self.config.fast_window,
            self.config.slow_window,
            self.config.volatility_window,
        );

        series
            .iter()
            .map(|row| {
                let indicators = indicator.update(row.close);
                SymbolSnapshot {
                    timestamp: row.timestamp,
                    base_position_size: indicators.base_position_size(
                        self.config.volatility_epsilon,
                        self.config.max_position_size,
                    ),
                    raw_signal: indicators.crossover_signal(),
                    indicators,
                }
            })
            .collect()
    }

    fn symbol_block(
        &self,
        symbol: &str,
        series: &[&CandleRow],
        trend: Option<&AnchorTrend>,
    ) -> Result<Vec<SignalRow>> {
        let snapshots = self.snapshots(series);
        let mut signals: Vec<Signal> = snapshots.iter().map(|s| s.raw_signal).collect();

        if let Some(trend) = trend {
            trend.apply(symbol, &mut signals)?;
        }

        debug!(
            symbol,
            rows = series.len(),
            active = signals.iter().filter(|s| !s.is_flat()).count(),
            "Computed symbol block"
        );

        Ok(snapshots
            .iter()
            .zip(signals)
            .map(|(snapshot, signal)| SignalRow {
                timestamp: snapshot.timestamp,
                symbol: symbol.to_string(),
                signal,
                position_size: snapshot
                    .base_position_size
                    .map(|size| signal.as_decimal() * size),
            })
            .collect())
    }
}

impl SignalGenerator for AnchorSignalStrategy {
    fn name(&self) -> &'static str {
        "anchor_sma_crossover"
    }

    fn generate(&self, targets: &TargetCandles, anchors: &AnchorTable) -> anyhow::Result<SignalTable> {
        Ok(AnchorSignalStrategy::generate(self, targets, anchors)?)
    }
}

/// Signals with the default parameters, gated by the BTC/1H anchor
pub fn generate_signals(targets: &TargetCandles, anchors: &AnchorTable) -> Result<SignalTable> {
    AnchorSignalStrategy::default().generate(targets, anchors)
}
