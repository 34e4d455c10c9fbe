//! Performance metrics and statistics.
//!
//! Each metric is an independent function over a slice of per-period values.
//! Missing (NaN) entries are dropped first, and an empty input yields 0.0
//! rather than an error.

use super::backtest::BacktestResult;

pub const PERIODS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsReport {
    pub annualized_return: f64,
    pub annualized_vol: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
}

impl MetricsReport {
    /// Return-based metrics come from `strategy_return`, drawdown from
    /// `equity_curve`.
    pub fn compute(result: &BacktestResult, risk_free_rate: f64) -> Self {
        let returns = result.strategy_return.values();
        let equity = result.equity_curve.values();

        MetricsReport {
            annualized_return: annualized_return(&returns),
            annualized_vol: annualized_vol(&returns),
            sharpe_ratio: sharpe_ratio(&returns, risk_free_rate),
            max_drawdown: max_drawdown(&equity),
        }
    }
}

fn present(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|v| !v.is_nan()).collect()
}

/// Compound growth over all observations, scaled to one year.
pub fn annualized_return(returns: &[f64]) -> f64 {
    let r = present(returns);
    if r.is_empty() {
        return 0.0;
    }
    let cumulative: f64 = r.iter().map(|x| 1.0 + x).product();
    let n = r.len() as f64;
    cumulative.powf(PERIODS_PER_YEAR / n) - 1.0
}

/// Sample standard deviation (n - 1) scaled by sqrt(periods per year).
/// Fewer than two observations give 0.0.
pub fn annualized_vol(returns: &[f64]) -> f64 {
    let r = present(returns);
    if r.len() < 2 {
        return 0.0;
    }
    let n = r.len() as f64;
    let mean: f64 = r.iter().sum::<f64>() / n;
    let variance: f64 = r.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt() * PERIODS_PER_YEAR.sqrt()
}

/// `risk_free_rate` is annual; it is spread evenly over the periods of a year.
pub fn sharpe_ratio(returns: &[f64], risk_free_rate: f64) -> f64 {
    let r = present(returns);
    if r.is_empty() {
        return 0.0;
    }

    let per_period_rf = risk_free_rate / PERIODS_PER_YEAR;
    let excess: Vec<f64> = r.iter().map(|x| x - per_period_rf).collect();

    let vol = annualized_vol(&excess);
    if vol == 0.0 {
        return 0.0;
    }
    annualized_return(&excess) / vol
}

/// Worst decline from a running peak, as a non-positive fraction.
pub fn max_drawdown(equity_curve: &[f64]) -> f64 {
    let eq = present(equity_curve);
    if eq.is_empty() {
        return 0.0;
    }

    let mut peak = f64::NEG_INFINITY;
    let mut worst = 0.0_f64;
    for value in eq {
        peak = peak.max(value);
        let drawdown = value / peak - 1.0;
        if drawdown < worst {
            worst = drawdown;
        }
    }
    worst
}
