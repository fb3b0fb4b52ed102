//! # Signal Strategy Table Types
//!
//! In-memory tables exchanged between candle fetchers, the signal strategies
//! and their consumers:
//!
//! - [`TargetCandles`]: long-format close prices, several symbols interleaved
//! - [`AnchorTable`]: wide-format anchor closes, one `close_<SYMBOL>_<TIMEFRAME>` column per series
//! - [`SignalTable`]: per-row signal and signed position size
//!
//! Missing numeric cells are `Option<Decimal>` throughout. Tables can be
//! built directly or from JSON record arrays, which is where the column
//! contract is checked.
//!
//! ```rust
//! use types::{CandleRow, TargetCandles};
//! use rust_decimal::Decimal;
//!
//! let candles = TargetCandles::new(vec![
//!     CandleRow::new(1_700_000_000_000, "BONK", Decimal::new(21, 6)),
//! ]);
//! assert_eq!(candles.symbols(), vec!["BONK"]);
//! ```

pub mod anchor;
pub mod candle;
pub mod error;
pub mod records;
pub mod signal;

pub use anchor::{anchor_column_name, AnchorTable};
pub use candle::{CandleRow, TargetCandles};
pub use error::{Result, TableError};
pub use signal::{Signal, SignalRow, SignalTable};
