//! Date-indexed series of `f64` values.
//!
//! A missing value is `f64::NAN`; a date absent from the series is also
//! treated as missing. Gaps are never interpolated, only filled with a
//! constant at alignment boundaries (see [`TimeSeries::reindex`]).

use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeSeries {
    points: Vec<(NaiveDate, f64)>,
}

impl TimeSeries {
    /// Build a series from `(date, value)` pairs in the given order.
    pub fn new(points: Vec<(NaiveDate, f64)>) -> Self {
        Self { points }
    }

    /// Build a series sharing `dates` as its index. Lengths must match.
    pub fn from_parts(dates: &[NaiveDate], values: Vec<f64>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self {
            points: dates.iter().copied().zip(values).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[(NaiveDate, f64)] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points.iter().copied()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|(d, _)| *d).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, v)| *v).collect()
    }

    pub fn first(&self) -> Option<(NaiveDate, f64)> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        self.points.last().copied()
    }

    /// Value at `date`, if the date is in the index.
    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .iter()
            .rev()
            .find(|(d, _)| *d == date)
            .map(|(_, v)| *v)
    }

    pub fn is_sorted(&self) -> bool {
        self.points.windows(2).all(|w| w[0].0 < w[1].0)
    }

    /// Stable ascending sort by date.
    pub fn sorted(&self) -> Self {
        let mut points = self.points.clone();
        points.sort_by_key(|(d, _)| *d);
        Self { points }
    }

    /// Re-index onto `dates`. Dates absent from `self`, and NaN values, take
    /// `fill`; entries of `self` outside `dates` are dropped. When `self`
    /// repeats a date the last value wins.
    pub fn reindex(&self, dates: &[NaiveDate], fill: f64) -> Self {
        let lookup: BTreeMap<NaiveDate, f64> = self.points.iter().copied().collect();
        let points = dates
            .iter()
            .map(|d| {
                let v = match lookup.get(d) {
                    Some(v) if !v.is_nan() => *v,
                    _ => fill,
                };
                (*d, v)
            })
            .collect();
        Self { points }
    }
}

impl FromIterator<(NaiveDate, f64)> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}
