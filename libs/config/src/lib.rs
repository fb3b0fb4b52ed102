//! # Signal Coin Configuration
//!
//! Centralised description of which coins the signal strategies trade and
//! which anchors confirm their trend.
//!
//! ## Usage
//!
//! ```rust
//! use coin_config::get_coin_metadata;
//!
//! let metadata = get_coin_metadata();
//! let btc = metadata.primary_anchor().unwrap();
//! assert_eq!(btc.anchor_column(), "close_BTC_1H");
//! ```
//!
//! Deployments can replace the built-in universe with a `[metadata]` section
//! in `config/signals.toml`, see [`CoinMetadata::load`].

pub mod metadata;
pub mod service_config;

pub use metadata::{get_coin_metadata, CoinMetadata, CoinSpec};
pub use service_config::{load_layered, DEFAULT_CONFIG_PATH, ENV_PREFIX};
