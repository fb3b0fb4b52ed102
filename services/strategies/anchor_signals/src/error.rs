//! Error types for the anchor signals strategy

use thiserror::Error;
use types::TableError;

#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    #[error(
        "Anchor length mismatch for {symbol}: '{anchor_column}' has {available} rows, {required} required"
    )]
    AnchorLengthMismatch {
        symbol: String,
        anchor_column: String,
        required: usize,
        available: usize,
    },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, StrategyError>;
