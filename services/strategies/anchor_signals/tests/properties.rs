//! Signal Table Property Tests
//!
//! Invariants that must hold for any candle input, regardless of the
//! specific price path.

use anchor_signals::{generate_signals, AnchorSignalStrategy};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::HashMap;
use types::{AnchorTable, CandleRow, Signal, TargetCandles};

const SYMBOLS: [&str; 3] = ["BONK", "DOGE", "PEPE"];

/// Closes in (0, 10000] with four decimal places
fn close_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000).prop_map(|raw| Decimal::new(raw, 4))
}

/// Shuffled, interleaved rows across up to three symbols with unique timestamps per symbol
fn candles_strategy() -> impl Strategy<Value = TargetCandles> {
    prop::collection::vec((0usize..3, close_strategy()), 0..120)
        .prop_map(|draws| {
            let mut next_ts = [0i64; 3];
            draws
                .into_iter()
                .map(|(symbol, close)| {
                    next_ts[symbol] += 1;
                    CandleRow::new(next_ts[symbol] * 60_000, SYMBOLS[symbol], close)
                })
                .collect::<Vec<_>>()
        })
        .prop_shuffle()
        .prop_map(TargetCandles::new)
}

fn anchor_strategy(len: usize) -> impl Strategy<Value = AnchorTable> {
    prop::collection::vec(prop::option::weighted(0.95, close_strategy()), len..len + 30).prop_map(
        |closes| {
            let timestamps = (0..closes.len() as i64).collect();
            AnchorTable::new(timestamps)
                .with_column("close_BTC_1H", closes)
                .expect("column length matches")
        },
    )
}

proptest! {
    #[test]
    fn prop_row_counts_preserved_per_symbol(candles in candles_strategy()) {
        let table = generate_signals(&candles, &AnchorTable::default()).unwrap();

        let mut input: HashMap<&str, usize> = HashMap::new();
        for row in candles.rows() {
            *input.entry(row.symbol.as_str()).or_default() += 1;
        }
        let mut output: HashMap<&str, usize> = HashMap::new();
        for row in table.rows() {
            *output.entry(row.symbol.as_str()).or_default() += 1;
        }

        prop_assert_eq!(input, output);
        prop_assert_eq!(table.len(), candles.len());
    }

    #[test]
    fn prop_blocks_contiguous_and_sorted(candles in candles_strategy()) {
        let table = generate_signals(&candles, &AnchorTable::default()).unwrap();

        let mut finished: Vec<&str> = Vec::new();
        for pair in table.rows().windows(2) {
            if pair[0].symbol == pair[1].symbol {
                prop_assert!(pair[0].timestamp <= pair[1].timestamp);
            } else {
                finished.push(pair[0].symbol.as_str());
                prop_assert!(!finished.contains(&pair[1].symbol.as_str()));
            }
        }
    }

    #[test]
    fn prop_size_matches_signal_and_base(candles in candles_strategy()) {
        let strategy = AnchorSignalStrategy::default();
        let table = strategy.generate(&candles, &AnchorTable::default()).unwrap();

        for symbol in candles.symbols() {
            let snapshots = strategy.snapshots(&candles.series_for(symbol));
            let rows: Vec<_> = table.rows_for(symbol).collect();
            prop_assert_eq!(snapshots.len(), rows.len());

            for (snapshot, row) in snapshots.iter().zip(rows) {
                match snapshot.base_position_size {
                    None => prop_assert!(row.position_size.is_none()),
                    Some(base) => {
                        prop_assert!(base > Decimal::ZERO);
                        prop_assert!(base <= Decimal::ONE);
                        prop_assert_eq!(row.position_size, Some(row.signal.as_decimal() * base));
                    }
                }
                prop_assert!(matches!(row.signal.as_i8(), -1..=1));
            }
        }
    }

    #[test]
    fn prop_anchor_only_flattens(
        closes in prop::collection::vec(close_strategy(), 1..60),
        anchors in anchor_strategy(60),
    ) {
        let candles: TargetCandles = closes
            .iter()
            .enumerate()
            .map(|(i, close)| CandleRow::new(i as i64, "BONK", *close))
            .collect();

        let unfiltered = generate_signals(&candles, &AnchorTable::default()).unwrap();
        let filtered = generate_signals(&candles, &anchors).unwrap();

        for (raw, gated) in unfiltered.rows().iter().zip(filtered.rows()) {
            prop_assert!(gated.signal == raw.signal || gated.signal == Signal::Flat);
            prop_assert_eq!(gated.position_size.is_some(), raw.position_size.is_some());
        }
    }

    #[test]
    fn prop_generation_is_deterministic(candles in candles_strategy()) {
        let first = generate_signals(&candles, &AnchorTable::default()).unwrap();
        let second = generate_signals(&candles, &AnchorTable::default()).unwrap();
        prop_assert_eq!(first, second);
    }
}
