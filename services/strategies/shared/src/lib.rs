//! Shared Strategy Framework
//!
//! Common utilities and traits for signal strategy implementations.

pub mod logging;
pub mod metrics;
pub mod testing;
pub mod traits;

pub use logging::*;
pub use metrics::*;
pub use traits::*;
