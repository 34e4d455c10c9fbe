//! Signal rules: price series in, target-position series out.
//!
//! Every rule implements [`SignalRule`]. Rule parameters are validated when
//! their config is constructed, so `generate` never sees an invalid config.

use std::fmt;

use tracing::debug;

use crate::domain::error::Error;
use crate::domain::indicator::roc::calculate_roc;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::time_series::TimeSeries;

/// Fully long.
pub const LONG: f64 = 1.0;
/// No position.
pub const FLAT: f64 = 0.0;

/// A long/flat signal rule.
///
/// `generate` returns one value in `[0, 1]` per input date, with the same
/// index as `prices`. Dates before the rule has enough history are flat.
pub trait SignalRule {
    fn name(&self) -> &str;

    /// Number of leading observations that are always flat.
    fn warmup(&self) -> usize;

    fn generate(&self, prices: &TimeSeries) -> Result<TimeSeries, Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovingAverageCrossConfig {
    short_window: usize,
    long_window: usize,
}

impl MovingAverageCrossConfig {
    pub fn new(short_window: usize, long_window: usize) -> Result<Self, Error> {
        if short_window == 0 {
            return Err(Error::config_invalid(
                "strategy",
                "short_window",
                "short_window must be a positive integer",
            ));
        }
        if long_window == 0 {
            return Err(Error::config_invalid(
                "strategy",
                "long_window",
                "long_window must be a positive integer",
            ));
        }
        if short_window >= long_window {
            return Err(Error::config_invalid(
                "strategy",
                "short_window",
                format!("short_window ({short_window}) must be smaller than long_window ({long_window})"),
            ));
        }
        Ok(Self {
            short_window,
            long_window,
        })
    }

    pub fn short_window(&self) -> usize {
        self.short_window
    }

    pub fn long_window(&self) -> usize {
        self.long_window
    }
}

impl Default for MovingAverageCrossConfig {
    fn default() -> Self {
        Self {
            short_window: 10,
            long_window: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MomentumConfig {
    lookback: usize,
}

impl MomentumConfig {
    pub fn new(lookback: usize) -> Result<Self, Error> {
        if lookback == 0 {
            return Err(Error::config_invalid(
                "strategy",
                "lookback",
                "lookback must be a positive integer",
            ));
        }
        Ok(Self { lookback })
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self { lookback: 20 }
    }
}

/// Long when the short SMA is strictly above the long SMA, flat otherwise.
#[derive(Debug, Clone)]
pub struct MovingAverageCross {
    config: MovingAverageCrossConfig,
}

impl MovingAverageCross {
    pub fn new(config: MovingAverageCrossConfig) -> Self {
        Self { config }
    }
}

impl SignalRule for MovingAverageCross {
    fn name(&self) -> &str {
        "ma_cross"
    }

    fn warmup(&self) -> usize {
        self.config.long_window - 1
    }

    fn generate(&self, prices: &TimeSeries) -> Result<TimeSeries, Error> {
        if prices.is_empty() {
            return Err(Error::empty_input("moving average cross"));
        }

        let short = calculate_sma(prices, self.config.short_window);
        let long = calculate_sma(prices, self.config.long_window);

        let signal = prices
            .iter()
            .enumerate()
            .map(|(i, (date, _))| {
                let value = match (short.valid_value(i), long.valid_value(i)) {
                    (Some(s), Some(l)) if s > l => LONG,
                    _ => FLAT,
                };
                (date, value)
            })
            .collect();

        debug!(
            rule = self.name(),
            short_window = self.config.short_window,
            long_window = self.config.long_window,
            observations = prices.len(),
            "generated signal"
        );
        Ok(signal)
    }
}

/// Long when the price is strictly above its level `lookback` periods ago.
#[derive(Debug, Clone)]
pub struct Momentum {
    config: MomentumConfig,
}

impl Momentum {
    pub fn new(config: MomentumConfig) -> Self {
        Self { config }
    }
}

impl SignalRule for Momentum {
    fn name(&self) -> &str {
        "momentum"
    }

    fn warmup(&self) -> usize {
        self.config.lookback
    }

    fn generate(&self, prices: &TimeSeries) -> Result<TimeSeries, Error> {
        if prices.is_empty() {
            return Err(Error::empty_input("momentum"));
        }

        let roc = calculate_roc(prices, self.config.lookback);

        let signal = prices
            .iter()
            .enumerate()
            .map(|(i, (date, _))| {
                let value = match roc.valid_value(i) {
                    Some(change) if change > 0.0 => LONG,
                    _ => FLAT,
                };
                (date, value)
            })
            .collect();

        debug!(
            rule = self.name(),
            lookback = self.config.lookback,
            observations = prices.len(),
            "generated signal"
        );
        Ok(signal)
    }
}

/// Validated parameter set for one of the supported rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyConfig {
    MovingAverageCross(MovingAverageCrossConfig),
    Momentum(MomentumConfig),
}

impl StrategyConfig {
    pub fn rule(&self) -> Box<dyn SignalRule> {
        match *self {
            StrategyConfig::MovingAverageCross(c) => Box::new(MovingAverageCross::new(c)),
            StrategyConfig::Momentum(c) => Box::new(Momentum::new(c)),
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        StrategyConfig::MovingAverageCross(MovingAverageCrossConfig::default())
    }
}

impl fmt::Display for StrategyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyConfig::MovingAverageCross(c) => write!(
                f,
                "ma_cross(short_window={}, long_window={})",
                c.short_window, c.long_window
            ),
            StrategyConfig::Momentum(c) => write!(f, "momentum(lookback={})", c.lookback),
        }
    }
}

/// Turn `prices` into a signal series under the rule described by `config`.
pub fn generate(prices: &TimeSeries, config: &StrategyConfig) -> Result<TimeSeries, Error> {
    config.rule().generate(prices)
}
