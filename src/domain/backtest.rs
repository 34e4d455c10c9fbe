//! Backtest engine: prices + signal in, lagged returns and equity curve out.
//!
//! BacktestConfig defines backtest parameters.

use tracing::{debug, warn};

use crate::domain::error::Error;
use crate::domain::strategy::FLAT;
use crate::domain::time_series::TimeSeries;

pub const DEFAULT_INITIAL_CAPITAL: f64 = 1_000_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub initial_capital: f64,
    pub risk_free_rate: f64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            risk_free_rate: 0.0,
        }
    }
}

/// All series share the sorted price index.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub prices: TimeSeries,
    pub signal: TimeSeries,
    pub position: TimeSeries,
    pub period_return: TimeSeries,
    pub strategy_return: TimeSeries,
    pub equity_curve: TimeSeries,
}

impl BacktestResult {
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn final_equity(&self) -> Option<f64> {
        self.equity_curve.last().map(|(_, v)| v)
    }
}

/// Run a long/flat backtest.
///
/// The position held on each date is the previous date's signal, so no
/// return is ever earned on a signal that was not yet observable. The first
/// date has no prior price or signal: its period return and position are 0.
/// A missing (NaN) close earns 0 and the next return runs from the last
/// valid close, so the equity curve stays finite.
/// `initial_capital` is not checked; it only scales the equity curve.
pub fn run_backtest(
    prices: &TimeSeries,
    signal: &TimeSeries,
    initial_capital: f64,
) -> Result<BacktestResult, Error> {
    if prices.is_empty() {
        return Err(Error::empty_input("backtest"));
    }

    let prices = if prices.is_sorted() {
        prices.clone()
    } else {
        prices.sorted()
    };
    let dates = prices.dates();
    let closes = prices.values();

    let signal = signal.reindex(&dates, FLAT);
    let targets = signal.values();

    let out_of_range = targets.iter().filter(|v| !(0.0..=1.0).contains(*v)).count();
    if out_of_range > 0 {
        warn!(out_of_range, "signal values outside [0, 1] passed through");
    }

    // Measured from the last valid close; a missing close earns 0.
    let period_return: Vec<f64> = closes
        .iter()
        .scan(None::<f64>, |last_valid, &close| {
            if close.is_nan() {
                return Some(0.0);
            }
            let r = match *last_valid {
                Some(prev) => close / prev - 1.0,
                None => 0.0,
            };
            *last_valid = Some(close);
            Some(if r.is_finite() { r } else { 0.0 })
        })
        .collect();

    let position: Vec<f64> = std::iter::once(FLAT)
        .chain(targets.iter().take(targets.len() - 1).copied())
        .collect();

    let strategy_return: Vec<f64> = position
        .iter()
        .zip(&period_return)
        .map(|(p, r)| p * r)
        .collect();

    let equity_curve: Vec<f64> = strategy_return
        .iter()
        .scan(initial_capital, |equity, r| {
            *equity *= 1.0 + r;
            Some(*equity)
        })
        .collect();

    debug!(
        observations = dates.len(),
        initial_capital,
        final_equity = equity_curve.last().copied().unwrap_or(initial_capital),
        "backtest complete"
    );

    Ok(BacktestResult {
        position: TimeSeries::from_parts(&dates, position),
        period_return: TimeSeries::from_parts(&dates, period_return),
        strategy_return: TimeSeries::from_parts(&dates, strategy_return),
        equity_curve: TimeSeries::from_parts(&dates, equity_curve),
        signal,
        prices,
    })
}
