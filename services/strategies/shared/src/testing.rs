//! Fixture builders for strategy tests

use rust_decimal::Decimal;
use types::{AnchorTable, CandleRow, TargetCandles};

/// One hour in milliseconds, the spacing used by every fixture
pub const HOUR_MS: i64 = 3_600_000;

pub const FIXTURE_START_MS: i64 = 1_700_000_000_000;

fn ts(i: usize) -> i64 {
    FIXTURE_START_MS + i as i64 * HOUR_MS
}

/// Candles for `symbol` with the given closes at hourly timestamps
pub fn series(symbol: &str, closes: &[Decimal]) -> Vec<CandleRow> {
    closes
        .iter()
        .enumerate()
        .map(|(i, close)| CandleRow::new(ts(i), symbol, *close))
        .collect()
}

/// `len` closes starting at `start`, each `step` higher than the last
pub fn rising_closes(len: usize, start: Decimal, step: Decimal) -> Vec<Decimal> {
    (0..len).map(|i| start + step * Decimal::from(i)).collect()
}

pub fn flat_closes(len: usize, price: Decimal) -> Vec<Decimal> {
    vec![price; len]
}

pub fn single_symbol(symbol: &str, closes: &[Decimal]) -> TargetCandles {
    TargetCandles::new(series(symbol, closes))
}

/// Interleave two symbols row by row, the way a multi-coin fetch returns them
pub fn interleaved(a: Vec<CandleRow>, b: Vec<CandleRow>) -> TargetCandles {
    let mut rows = Vec::with_capacity(a.len() + b.len());
    let mut a = a.into_iter();
    let mut b = b.into_iter();
    loop {
        match (a.next(), b.next()) {
            (None, None) => break,
            (x, y) => rows.extend(x.into_iter().chain(y)),
        }
    }
    TargetCandles::new(rows)
}

/// Anchor table with one fully populated close column
pub fn anchor_table(column: &str, closes: &[Decimal]) -> AnchorTable {
    let timestamps = (0..closes.len()).map(ts).collect();
    AnchorTable::new(timestamps)
        .with_column(column, closes.iter().copied().map(Some).collect())
        .expect("fixture column length matches timestamps")
}

/// Anchor table without any close column
pub fn empty_anchor_table(len: usize) -> AnchorTable {
    AnchorTable::new((0..len).map(ts).collect())
}
