//! Core domain types and logic: series, signal rules, backtest, metrics.

pub mod time_series;
pub mod indicator;
pub mod strategy;
pub mod backtest;
pub mod metrics;
pub mod config_validation;
pub mod error;
