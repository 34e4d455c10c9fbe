#![allow(dead_code)]

use chrono::NaiveDate;
use longflat::domain::error::Error;
pub use longflat::domain::time_series::TimeSeries;
use longflat::ports::chart_port::ChartPort;
use longflat::ports::data_port::DataPort;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct MockDataPort {
    pub data: HashMap<String, TimeSeries>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    pub fn with_series(mut self, source: &str, series: TimeSeries) -> Self {
        self.data.insert(source.to_string(), series);
        self
    }
}

impl DataPort for MockDataPort {
    fn load_series(&self, source: &str) -> Result<TimeSeries, Error> {
        self.data.get(source).cloned().ok_or_else(|| Error::Schema {
            input: source.to_string(),
            reason: "missing 'close' column".to_string(),
        })
    }
}

/// Records every render call; fails them all when `fail` is set.
#[derive(Default)]
pub struct MockChartPort {
    pub fail: bool,
    pub rendered: RefCell<Vec<(PathBuf, usize)>>,
}

impl MockChartPort {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl ChartPort for MockChartPort {
    fn render_equity(&self, equity_curve: &TimeSeries, output_path: &Path) -> Result<(), Error> {
        self.rendered
            .borrow_mut()
            .push((output_path.to_path_buf(), equity_curve.len()));
        if self.fail {
            return Err(Error::Chart {
                reason: "display unavailable".to_string(),
            });
        }
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Consecutive calendar days from 2024-01-01.
pub fn series(values: &[f64]) -> TimeSeries {
    let start = date(2024, 1, 1);
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| (start + chrono::Duration::days(i as i64), v))
        .collect()
}

/// Deterministic zig-zag uptrend, always positive.
pub fn generate_prices(count: usize, start_price: f64) -> TimeSeries {
    let values: Vec<f64> = (0..count)
        .map(|i| start_price + i as f64 * 0.5 + if i % 3 == 0 { 2.0 } else { -1.0 })
        .collect();
    series(&values)
}

pub fn prices_csv(values: &[f64]) -> String {
    let mut csv = String::from("Date,Open,Close\n");
    for (d, v) in series(values).iter() {
        csv.push_str(&format!("{},{},{}\n", d, v, v));
    }
    csv
}
