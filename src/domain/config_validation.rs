//! Configuration validation.
//!
//! Builds validated strategy and backtest configs from a [`ConfigPort`]
//! before any series computation runs. Absent keys take defaults; present but
//! malformed keys are rejected.

use crate::domain::backtest::{BacktestConfig, DEFAULT_INITIAL_CAPITAL};
use crate::domain::error::Error;
use crate::domain::strategy::{
    MomentumConfig, MovingAverageCrossConfig, StrategyConfig,
};
use crate::ports::config_port::ConfigPort;

pub const RULE_MA_CROSS: &str = "ma_cross";
pub const RULE_MOMENTUM: &str = "momentum";

pub fn build_strategy_config(config: &dyn ConfigPort) -> Result<StrategyConfig, Error> {
    let rule = config
        .get_string("strategy", "rule")
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| RULE_MA_CROSS.to_string());

    match rule.as_str() {
        RULE_MA_CROSS => {
            let defaults = MovingAverageCrossConfig::default();
            let short = config
                .get_usize("strategy", "short_window")?
                .unwrap_or(defaults.short_window());
            let long = config
                .get_usize("strategy", "long_window")?
                .unwrap_or(defaults.long_window());
            Ok(StrategyConfig::MovingAverageCross(
                MovingAverageCrossConfig::new(short, long)?,
            ))
        }
        RULE_MOMENTUM => {
            let lookback = config
                .get_usize("strategy", "lookback")?
                .unwrap_or(MomentumConfig::default().lookback());
            Ok(StrategyConfig::Momentum(MomentumConfig::new(lookback)?))
        }
        other => Err(Error::config_invalid(
            "strategy",
            "rule",
            format!(
                "unknown rule '{}' (expected {} or {})",
                other, RULE_MA_CROSS, RULE_MOMENTUM
            ),
        )),
    }
}

/// `initial_capital` is deliberately not range-checked: any finite value is
/// passed to the engine as-is.
pub fn build_backtest_config(config: &dyn ConfigPort) -> Result<BacktestConfig, Error> {
    let initial_capital = config
        .get_f64("backtest", "initial_capital")?
        .unwrap_or(DEFAULT_INITIAL_CAPITAL);
    let risk_free_rate = config.get_f64("backtest", "risk_free_rate")?.unwrap_or(0.0);

    Ok(BacktestConfig {
        initial_capital,
        risk_free_rate,
    })
}
