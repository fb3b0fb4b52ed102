//! Target candle table
//!
//! Long format: one row per (timestamp, symbol) observation, several symbols
//! interleaved in any order. Only the close price is carried.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Column names of the target table
pub mod columns {
    pub const TIMESTAMP: &str = "timestamp";
    pub const SYMBOL: &str = "symbol";
    pub const CLOSE: &str = "close";
}

/// Single close observation for one target symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandleRow {
    pub timestamp: i64,
    pub symbol: String,
    pub close: Decimal,
}

impl CandleRow {
    pub fn new(timestamp: i64, symbol: impl Into<String>, close: Decimal) -> Self {
        Self {
            timestamp,
            symbol: symbol.into(),
            close,
        }
    }
}

/// Interleaved candles for every target symbol of one computation cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetCandles {
    rows: Vec<CandleRow>,
}

impl TargetCandles {
    pub fn new(rows: Vec<CandleRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CandleRow] {
        &self.rows
    }

    pub fn push(&mut self, row: CandleRow) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct symbols in order of first appearance
    pub fn symbols(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.symbol.as_str()) {
                seen.push(row.symbol.as_str());
            }
        }
        seen
    }

    /// Rows of one symbol, stable-sorted ascending by timestamp
    pub fn series_for(&self, symbol: &str) -> Vec<&CandleRow> {
        let mut series: Vec<&CandleRow> =
            self.rows.iter().filter(|row| row.symbol == symbol).collect();
        series.sort_by_key(|row| row.timestamp);
        series
    }
}

impl FromIterator<CandleRow> for TargetCandles {
    fn from_iter<I: IntoIterator<Item = CandleRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
