//! Anchor trend filter
//!
//! The primary anchor's own fast/slow moving-average trend gates target
//! signals: where the anchor is not trending up, target signals are forced
//! flat.
//!
//! Alignment is by row position, not timestamp. The first `n` trend values
//! gate a symbol's `n` sorted rows, whatever timestamps either side carries.
//! An anchor series shorter than the symbol's series is an error.

use crate::error::{Result, StrategyError};
use crate::indicators::MovingAverage;
use types::{AnchorTable, Signal};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorTrend {
    column: String,
    bullish: Vec<bool>,
}

impl AnchorTrend {
    /// Trend of `column`, or `None` when the table does not carry it
    pub fn from_table(
        anchors: &AnchorTable,
        column: &str,
        fast_period: usize,
        slow_period: usize,
    ) -> Option<Self> {
        let closes = anchors.column(column)?;
        Some(Self::from_closes(column, closes, fast_period, slow_period))
    }

    pub fn from_closes(
        column: &str,
        closes: &[Option<rust_decimal::Decimal>],
        fast_period: usize,
        slow_period: usize,
    ) -> Self {
        let mut fast = MovingAverage::new(fast_period);
        let mut slow = MovingAverage::new(slow_period);

        let bullish = closes
            .iter()
            .map(|close| {
                // Undefined averages count as not bullish
                match (fast.update(*close), slow.update(*close)) {
                    (Some(f), Some(s)) => f > s,
                    _ => false,
                }
            })
            .collect();

        Self {
            column: column.to_string(),
            bullish,
        }
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn len(&self) -> usize {
        self.bullish.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullish.is_empty()
    }

    pub fn is_bullish(&self, position: usize) -> Option<bool> {
        self.bullish.get(position).copied()
    }

    /// Gate `signals` position by position with the leading trend values
    pub fn apply(&self, symbol: &str, signals: &mut [Signal]) -> Result<()> {
        if self.bullish.len() < signals.len() {
            return Err(StrategyError::AnchorLengthMismatch {
                symbol: symbol.to_string(),
                anchor_column: self.column.clone(),
                required: signals.len(),
                available: self.bullish.len(),
            });
        }

        for (signal, bullish) in signals.iter_mut().zip(&self.bullish) {
            *signal = signal.gated(*bullish);
        }
        Ok(())
    }
}
