//! Per-cycle signal statistics

use rust_decimal::Decimal;
use types::{Signal, SignalRow};

/// Counts and sizing summary over one output table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignalStats {
    pub total_rows: u64,
    pub long_signals: u64,
    pub short_signals: u64,
    pub flat_signals: u64,
    /// Rows whose position size is still undefined (volatility warm-up)
    pub missing_sizes: u64,
    sized_rows: u64,
    sum_abs_size: Decimal,
}

impl SignalStats {
    pub fn from_rows(rows: &[SignalRow]) -> Self {
        let mut stats = Self::default();
        for row in rows {
            stats.record(row);
        }
        stats
    }

    /// Update stats with a new output row
    pub fn record(&mut self, row: &SignalRow) {
        self.total_rows += 1;

        match row.signal {
            Signal::Long => self.long_signals += 1,
            Signal::Short => self.short_signals += 1,
            Signal::Flat => self.flat_signals += 1,
        }

        match row.position_size {
            Some(size) => {
                self.sized_rows += 1;
                self.sum_abs_size += size.abs();
            }
            None => self.missing_sizes += 1,
        }
    }

    /// Rows with a non-flat signal
    pub fn active_signals(&self) -> u64 {
        self.long_signals + self.short_signals
    }

    /// Mean absolute position size over rows where it is defined
    pub fn avg_abs_size(&self) -> Option<Decimal> {
        if self.sized_rows == 0 {
            None
        } else {
            Some(self.sum_abs_size / Decimal::from(self.sized_rows))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn row(signal: Signal, position_size: Option<Decimal>) -> SignalRow {
        SignalRow {
            timestamp: 0,
            symbol: "PEPE".to_string(),
            signal,
            position_size,
        }
    }

    #[test]
    fn test_signal_stats() {
        let stats = SignalStats::from_rows(&[
            row(Signal::Flat, None),
            row(Signal::Long, Some(dec!(0.5))),
            row(Signal::Short, Some(dec!(-1))),
            row(Signal::Flat, Some(dec!(0))),
        ]);

        assert_eq!(stats.total_rows, 4);
        assert_eq!(stats.long_signals, 1);
        assert_eq!(stats.short_signals, 1);
        assert_eq!(stats.flat_signals, 2);
        assert_eq!(stats.missing_sizes, 1);
        assert_eq!(stats.active_signals(), 2);
        assert_eq!(stats.avg_abs_size(), Some(dec!(0.5)));
    }

    #[test]
    fn test_empty_stats() {
        let stats = SignalStats::from_rows(&[]);
        assert_eq!(stats.total_rows, 0);
        assert_eq!(stats.avg_abs_size(), None);
    }
}
