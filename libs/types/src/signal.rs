//! Output signal table

use num_enum::{IntoPrimitive, TryFromPrimitive};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Directional signal, serialised as -1 / 0 / 1
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
#[repr(i8)]
#[serde(into = "i8", try_from = "i8")]
pub enum Signal {
    Short = -1,
    Flat = 0,
    Long = 1,
}

impl Default for Signal {
    fn default() -> Self {
        Signal::Flat
    }
}

impl Signal {
    pub fn as_i8(self) -> i8 {
        self.into()
    }

    pub fn as_decimal(self) -> Decimal {
        Decimal::from(self.as_i8())
    }

    /// Keep the signal where `allowed`, otherwise flatten it
    pub fn gated(self, allowed: bool) -> Self {
        if allowed {
            self
        } else {
            Signal::Flat
        }
    }

    pub fn is_flat(self) -> bool {
        self == Signal::Flat
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalRow {
    pub timestamp: i64,
    pub symbol: String,
    pub signal: Signal,
    /// `None` until the volatility window is filled; a JSON number on the wire
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub position_size: Option<Decimal>,
}

/// Concatenated per-symbol results of one computation cycle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignalTable {
    rows: Vec<SignalRow>,
}

impl SignalTable {
    pub fn new(rows: Vec<SignalRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[SignalRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<SignalRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a symbol block, keeping the block contiguous
    pub fn extend_block(&mut self, block: Vec<SignalRow>) {
        self.rows.extend(block);
    }

    pub fn rows_for<'a>(&'a self, symbol: &'a str) -> impl Iterator<Item = &'a SignalRow> + 'a {
        self.rows.iter().filter(move |row| row.symbol == symbol)
    }
}
