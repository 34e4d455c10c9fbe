//! Simple Moving Average indicator.
//!
//! O(n) sliding window over closing prices.
//! SMA(n)[i] = (C[i-n+1] + ... + C[i]) / n
//! Warmup: first (n-1) points are invalid. A window holding a missing (NaN)
//! price is invalid as well.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::time_series::TimeSeries;

pub fn calculate_sma(prices: &TimeSeries, period: usize) -> IndicatorSeries {
    if period == 0 || prices.is_empty() {
        return IndicatorSeries {
            indicator_type: IndicatorType::Sma(period),
            values: Vec::new(),
        };
    }

    let points = prices.points();
    let mut values = Vec::with_capacity(points.len());
    let mut window_sum = 0.0_f64;
    let mut missing_in_window = 0usize;

    for (i, &(date, close)) in points.iter().enumerate() {
        if close.is_nan() {
            missing_in_window += 1;
        } else {
            window_sum += close;
        }

        if i >= period {
            let dropped = points[i - period].1;
            if dropped.is_nan() {
                missing_in_window -= 1;
            } else {
                window_sum -= dropped;
            }
        }

        let valid = i + 1 >= period && missing_in_window == 0;
        let sma = if valid { window_sum / period as f64 } else { 0.0 };

        values.push(IndicatorPoint {
            date,
            valid,
            value: sma,
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Sma(period),
        values,
    }
}
