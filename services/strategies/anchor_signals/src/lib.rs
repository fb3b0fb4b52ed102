//! # Anchor Signals Strategy - SMA Crossover With Anchor Trend Confirmation
//!
//! ## Purpose
//!
//! Batch signal generation for low-liquidity target coins. Every computation
//! cycle an external runner fetches target candles and wide anchor closes,
//! calls [`generate_signals`], and forwards the resulting table of
//! `(timestamp, symbol, signal, position_size)` rows to execution.
//!
//! ## Pipeline
//!
//! ```text
//! TargetCandles ─┬─ per symbol: sort ─→ SMA(5) vs SMA(15) ─→ raw signal ─┐
//!                │                     pct returns ─→ std(10) ─→ size ───┤
//! AnchorTable ───┴─ close_BTC_1H ─→ SMA(10) > SMA(20) ─→ trend gate ─────┴─→ SignalTable
//! ```
//!
//! - Signal is `1` when the fast average is above the slow one, `-1` when
//!   below, `0` otherwise or while either is undefined.
//! - Size is `min(1 / (volatility + 1e-6), 1)` scaled by the signal, and stays
//!   undefined until ten returns exist.
//! - The anchor gate is positional: trend row `i` gates the symbol's `i`-th
//!   sorted row. An anchor shorter than a symbol's series is an error.
//!
//! ## Examples
//!
//! ```rust
//! use anchor_signals::generate_signals;
//! use rust_decimal::Decimal;
//! use types::{AnchorTable, CandleRow, TargetCandles};
//!
//! let candles: TargetCandles = (0..20)
//!     .map(|i| CandleRow::new(i, "BONK", Decimal::from(100 + i)))
//!     .collect();
//!
//! let table = generate_signals(&candles, &AnchorTable::default()).unwrap();
//! assert_eq!(table.len(), 20);
//! ```
//!
//! Parameters and the gating anchor come from [`StrategyConfig`], usually
//! loaded with [`SignalsConfig::load`].

pub mod config;
pub mod error;
pub mod filter;
pub mod indicators;
pub mod strategy;

pub use config::{SignalsConfig, StrategyConfig};
pub use error::{Result, StrategyError};
pub use filter::AnchorTrend;
pub use strategy::{generate_signals, AnchorSignalStrategy, SymbolSnapshot};

/// Re-export key table types
pub use rust_decimal::Decimal;
pub use types::{AnchorTable, Signal, SignalRow, SignalTable, TargetCandles};
