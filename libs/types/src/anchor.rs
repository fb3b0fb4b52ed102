//! Wide anchor table
//!
//! One row per timestamp, one close column per anchor series. Columns are
//! named `close_<SYMBOL>_<TIMEFRAME>`; a cell is `None` where the series has
//! no observation at that timestamp.

use crate::error::{Result, TableError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const CLOSE_PREFIX: &str = "close_";

/// Name of the wide close column holding an anchor series
pub fn anchor_column_name(symbol: &str, timeframe: &str) -> String {
    format!("{CLOSE_PREFIX}{symbol}_{timeframe}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorTable {
    timestamps: Vec<i64>,
    columns: BTreeMap<String, Vec<Option<Decimal>>>,
}

impl AnchorTable {
    pub fn new(timestamps: Vec<i64>) -> Self {
        Self {
            timestamps,
            columns: BTreeMap::new(),
        }
    }

    /// Add or replace a close column; its length must match the row count
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: Vec<Option<Decimal>>,
    ) -> Result<Self> {
        let name = name.into();
        if values.len() != self.timestamps.len() {
            return Err(TableError::InvalidValue {
                reason: format!(
                    "column has {} values but the table has {} rows",
                    values.len(),
                    self.timestamps.len()
                ),
                column: name,
                row: values.len().min(self.timestamps.len()),
            });
        }
        self.columns.insert(name, values);
        Ok(self)
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&[Option<Decimal>]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }
}
