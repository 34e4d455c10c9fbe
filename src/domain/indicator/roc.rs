//! ROC (Rate of Change) indicator.
//!
//! ROC(n)[i] = ((C[i] - C[i-n]) / C[i-n]) * 100
//! If C[i-n] == 0: ROC = 0
//! Warmup: first n points invalid. Missing (NaN) endpoints are invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::time_series::TimeSeries;

pub fn calculate_roc(prices: &TimeSeries, period: usize) -> IndicatorSeries {
    let points = prices.points();
    let mut values = Vec::with_capacity(points.len());

    for (i, &(date, curr_close)) in points.iter().enumerate() {
        let prev_close = if i >= period && period > 0 {
            Some(points[i - period].1)
        } else {
            None
        };

        let (valid, value) = match prev_close {
            Some(prev) if !prev.is_nan() && !curr_close.is_nan() => {
                if prev == 0.0 {
                    (true, 0.0)
                } else {
                    (true, ((curr_close - prev) / prev) * 100.0)
                }
            }
            _ => (false, 0.0),
        };

        values.push(IndicatorPoint { date, valid, value });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Roc(period),
        values,
    }
}
