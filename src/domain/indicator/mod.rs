//! Technical indicators computed over a price [`TimeSeries`].
//!
//! - `IndicatorPoint`: a single point in an indicator time series
//! - `IndicatorType`: indicator identity + parameters
//! - `IndicatorSeries`: a time series of indicator values, one point per
//!   input date, with warmup points flagged invalid

pub mod roc;
pub mod sma;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Roc(usize),
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Value at position `i`, or `None` during warmup.
    pub fn valid_value(&self, i: usize) -> Option<f64> {
        self.values.get(i).filter(|p| p.valid).map(|p| p.value)
    }

    pub fn valid_count(&self) -> usize {
        self.values.iter().filter(|p| p.valid).count()
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Roc(period) => write!(f, "ROC({})", period),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_type_display() {
        assert_eq!(IndicatorType::Sma(20).to_string(), "SMA(20)");
        assert_eq!(IndicatorType::Roc(5).to_string(), "ROC(5)");
    }

    #[test]
    fn valid_value_skips_warmup() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let series = IndicatorSeries {
            indicator_type: IndicatorType::Sma(2),
            values: vec![
                IndicatorPoint {
                    date,
                    valid: false,
                    value: 0.0,
                },
                IndicatorPoint {
                    date: date.succ_opt().unwrap(),
                    valid: true,
                    value: 1.5,
                },
            ],
        };
        assert_eq!(series.valid_value(0), None);
        assert_eq!(series.valid_value(1), Some(1.5));
        assert_eq!(series.valid_value(2), None);
        assert_eq!(series.valid_count(), 1);
    }
}
