//! Table ingestion from JSON record arrays
//!
//! External fetchers hand over `[{"timestamp": .., "symbol": .., "close": ..}, ..]`
//! style records. The column contract is enforced here so the generator only
//! ever sees typed tables.

use crate::anchor::AnchorTable;
use crate::candle::{columns, CandleRow, TargetCandles};
use crate::error::{Result, TableError};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::str::FromStr;

impl TargetCandles {
    pub fn from_json_records(records: &[Value]) -> Result<Self> {
        records
            .iter()
            .enumerate()
            .map(|(row, record)| {
                let object = as_object(record, row)?;
                Ok(CandleRow {
                    timestamp: parse_timestamp(required(object, columns::TIMESTAMP, row)?, row)?,
                    symbol: parse_symbol(required(object, columns::SYMBOL, row)?, row)?,
                    close: parse_decimal(required(object, columns::CLOSE, row)?, columns::CLOSE, row)?
                        .ok_or_else(|| invalid(columns::CLOSE, row, "close is null"))?,
                })
            })
            .collect()
    }
}

impl AnchorTable {
    /// Every key other than `timestamp` becomes a close column. Keys absent
    /// from a record, or null, become missing cells.
    pub fn from_json_records(records: &[Value]) -> Result<Self> {
        let mut timestamps = Vec::with_capacity(records.len());
        let mut cells: BTreeMap<String, Vec<Option<Decimal>>> = BTreeMap::new();

        for (row, record) in records.iter().enumerate() {
            let object = as_object(record, row)?;
            timestamps.push(parse_timestamp(required(object, columns::TIMESTAMP, row)?, row)?);

            for (name, value) in object.iter().filter(|(k, _)| k.as_str() != columns::TIMESTAMP) {
                let cell = parse_decimal(value, name, row)?;
                let column = cells
                    .entry(name.clone())
                    .or_insert_with(|| vec![None; row]);
                column.push(cell);
            }

            // Pad columns this record did not mention
            for column in cells.values_mut() {
                if column.len() < row + 1 {
                    column.push(None);
                }
            }
        }

        cells
            .into_iter()
            .try_fold(AnchorTable::new(timestamps), |table, (name, values)| {
                table.with_column(name, values)
            })
    }
}

fn as_object(record: &Value, row: usize) -> Result<&Map<String, Value>> {
    record.as_object().ok_or(TableError::NotAnObject { row })
}

fn required<'a>(
    object: &'a Map<String, Value>,
    column: &'static str,
    row: usize,
) -> Result<&'a Value> {
    object
        .get(column)
        .ok_or(TableError::MissingColumn { column, row })
}

fn invalid(column: &str, row: usize, reason: impl Into<String>) -> TableError {
    TableError::InvalidValue {
        column: column.to_string(),
        row,
        reason: reason.into(),
    }
}

fn parse_timestamp(value: &Value, row: usize) -> Result<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| invalid(columns::TIMESTAMP, row, format!("{n} is not an integer"))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| invalid(columns::TIMESTAMP, row, e.to_string())),
        other => Err(invalid(
            columns::TIMESTAMP,
            row,
            format!("expected integer, got {other}"),
        )),
    }
}

fn parse_symbol(value: &Value, row: usize) -> Result<String> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(columns::SYMBOL, row, format!("expected string, got {value}")))
}

fn parse_decimal(value: &Value, column: &str, row: usize) -> Result<Option<Decimal>> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(Some(Decimal::from(i)));
            }
            n.as_f64()
                .and_then(|f| Decimal::try_from(f).ok())
                .map(Some)
                .ok_or_else(|| invalid(column, row, format!("{n} is not representable")))
        }
        Value::String(s) => Decimal::from_str(s.trim())
            .or_else(|_| Decimal::from_scientific(s.trim()))
            .map(Some)
            .map_err(|e| invalid(column, row, e.to_string())),
        other => Err(invalid(column, row, format!("expected number, got {other}"))),
    }
}
