//! Strategy traits and interfaces

use anyhow::Result;
use types::{AnchorTable, SignalTable, TargetCandles};

/// Batch signal generator over one cycle's candle tables
///
/// Implementations hold no per-call state, so one instance may serve
/// concurrent callers.
pub trait SignalGenerator: Send + Sync {
    /// Strategy name for identification
    fn name(&self) -> &'static str;

    /// Produce one output row per target candle row
    fn generate(&self, targets: &TargetCandles, anchors: &AnchorTable) -> Result<SignalTable>;
}

/// Strategy configuration trait
pub trait StrategyConfig: Send + Sync + Clone {
    /// Validate configuration
    fn validate(&self) -> Result<()>;
}
