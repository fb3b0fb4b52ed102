//! Technical indicators for signal generation
//!
//! All indicators are streaming: feed one observation, get the value at that
//! position. A window that is not yet full, or that holds a missing
//! observation, yields `None`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::VecDeque;
use types::Signal;

/// Default epsilon added to volatility before inversion
pub const VOLATILITY_EPSILON: Decimal = dec!(0.000001);

/// Fixed-length trailing window over possibly-missing values
#[derive(Debug, Clone)]
struct Window {
    period: usize,
    values: VecDeque<Option<Decimal>>,
}

impl Window {
    fn new(period: usize) -> Self {
        Self {
            period,
            values: VecDeque::with_capacity(period),
        }
    }

    fn push(&mut self, value: Option<Decimal>) {
        self.values.push_back(value);
        if self.values.len() > self.period {
            self.values.pop_front();
        }
    }

    /// Window contents, only once full and free of missing values
    fn complete(&self) -> Option<Vec<Decimal>> {
        if self.values.len() < self.period {
            return None;
        }
        self.values.iter().copied().collect()
    }

    fn is_full(&self) -> bool {
        self.values.len() == self.period
    }
}

/// Simple Moving Average calculator
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window: Window,
}

impl MovingAverage {
    pub fn new(period: usize) -> Self {
        Self {
            window: Window::new(period),
        }
    }

    /// Add a new value and return current MA
    pub fn update(&mut self, value: Option<Decimal>) -> Option<Decimal> {
        self.window.push(value);
        self.current()
    }

    /// Get current moving average without adding new value
    pub fn current(&self) -> Option<Decimal> {
        let values = self.window.complete()?;
        mean(&values)
    }

    /// Check if indicator has seen a full window of observations
    pub fn is_ready(&self) -> bool {
        self.window.is_full()
    }
}

/// One-step percentage change, `close[i] / close[i-1] - 1`
#[derive(Debug, Clone, Default)]
pub struct PctChange {
    prev: Option<Decimal>,
}

impl PctChange {
    pub fn new() -> Self {
        Self::default()
    }

    /// Missing on the first observation and after a zero close
    pub fn update(&mut self, value: Decimal) -> Option<Decimal> {
        let change = self
            .prev
            .and_then(|prev| value.checked_div(prev))
            .and_then(|ratio| ratio.checked_sub(Decimal::ONE));
        self.prev = Some(value);
        change
    }
}

/// Rolling sample standard deviation (n - 1 denominator)
#[derive(Debug, Clone)]
pub struct Volatility {
    window: Window,
}

impl Volatility {
    pub fn new(period: usize) -> Self {
        Self {
            window: Window::new(period),
        }
    }

    /// Add new value and return volatility (standard deviation)
    pub fn update(&mut self, value: Option<Decimal>) -> Option<Decimal> {
        self.window.push(value);
        let values = self.window.complete()?;
        sample_std_dev(&values)
    }

    /// Check if indicator is ready
    pub fn is_ready(&self) -> bool {
        self.window.is_full()
    }
}

fn sample_std_dev(values: &[Decimal]) -> Option<Decimal> {
    if values.len() < 2 {
        return None;
    }

    // Identical values are exactly zero
    if values.iter().all(|v| *v == values[0]) {
        return Some(Decimal::ZERO);
    }

    let variance = decimal_variance(values).or_else(|| float_variance(values))?;

    // Decimal has no sqrt; go through f64
    let std_dev_f64 = variance.sqrt();
    Decimal::try_from(std_dev_f64).ok()
}

/// Exact sample variance, `None` once a squared deviation leaves Decimal range
fn decimal_variance(values: &[Decimal]) -> Option<f64> {
    let avg = mean(values)?;
    let squares = values.iter().try_fold(Decimal::ZERO, |acc, &x| {
        let diff = x.checked_sub(avg)?;
        acc.checked_add(diff.checked_mul(diff)?)
    })?;
    squares
        .checked_div(Decimal::from(values.len() - 1))?
        .to_f64()
}

fn float_variance(values: &[Decimal]) -> Option<f64> {
    let floats = values.iter().map(|v| v.to_f64()).collect::<Option<Vec<f64>>>()?;
    let n = floats.len() as f64;
    let mean = floats.iter().sum::<f64>() / n;
    let variance = floats.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.is_finite().then_some(variance)
}

/// Window mean. A sum past Decimal range averages the offsets from the
/// first value instead, which keeps identical values exact.
fn mean(values: &[Decimal]) -> Option<Decimal> {
    let n = Decimal::from(values.len());
    if let Some(sum) = checked_sum(values.iter().copied()) {
        return sum.checked_div(n);
    }

    let first = *values.first()?;
    let offsets = values
        .iter()
        .map(|v| v.checked_sub(first))
        .collect::<Option<Vec<_>>>()?;
    checked_sum(offsets)?
        .checked_div(n)
        .and_then(|offset| first.checked_add(offset))
}

fn checked_sum(values: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
}

/// Volatility-scaled size: `min(1 / (volatility + epsilon), cap)`
pub fn base_position_size(volatility: Decimal, epsilon: Decimal, cap: Decimal) -> Option<Decimal> {
    volatility
        .checked_add(epsilon)
        .and_then(|denominator| Decimal::ONE.checked_div(denominator))
        .map(|size| size.min(cap))
}

/// Composite indicator feeding every per-symbol indicator from one close
#[derive(Debug, Clone)]
pub struct CompositeIndicator {
    pub fast_ma: MovingAverage,
    pub slow_ma: MovingAverage,
    pub returns: PctChange,
    pub volatility: Volatility,
}

impl CompositeIndicator {
    pub fn new(fast_period: usize, slow_period: usize, volatility_period: usize) -> Self {
        Self {
            fast_ma: MovingAverage::new(fast_period),
            slow_ma: MovingAverage::new(slow_period),
            returns: PctChange::new(),
            volatility: Volatility::new(volatility_period),
        }
    }

    /// Update all indicators with new close price
    pub fn update(&mut self, close: Decimal) -> IndicatorSignal {
        let fast_ma = self.fast_ma.update(Some(close));
        let slow_ma = self.slow_ma.update(Some(close));
        let pct_return = self.returns.update(close);
        let volatility = self.volatility.update(pct_return);

        IndicatorSignal {
            fast_ma,
            slow_ma,
            pct_return,
            volatility,
            close,
        }
    }

    /// Check if all indicators are ready
    pub fn is_ready(&self) -> bool {
        self.fast_ma.is_ready() && self.slow_ma.is_ready() && self.volatility.is_ready()
    }
}

/// Indicator values at one position of a symbol's series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorSignal {
    pub fast_ma: Option<Decimal>,
    pub slow_ma: Option<Decimal>,
    pub pct_return: Option<Decimal>,
    pub volatility: Option<Decimal>,
    pub close: Decimal,
}

impl IndicatorSignal {
    /// Determine trend direction from moving averages
    pub fn trend_direction(&self) -> Option<TrendDirection> {
        match (self.fast_ma, self.slow_ma) {
            (Some(fast), Some(slow)) => {
                if fast > slow {
                    Some(TrendDirection::Up)
                } else if fast < slow {
                    Some(TrendDirection::Down)
                } else {
                    Some(TrendDirection::Sideways)
                }
            }
            _ => None,
        }
    }

    /// Crossover signal; flat while either average is undefined
    pub fn crossover_signal(&self) -> Signal {
        match self.trend_direction() {
            Some(TrendDirection::Up) => Signal::Long,
            Some(TrendDirection::Down) => Signal::Short,
            Some(TrendDirection::Sideways) | None => Signal::Flat,
        }
    }

    pub fn base_position_size(&self, epsilon: Decimal, cap: Decimal) -> Option<Decimal> {
        self.volatility
            .and_then(|vol| base_position_size(vol, epsilon, cap))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
    Sideways,
}
