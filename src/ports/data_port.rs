//! Data access port trait.

use crate::domain::error::Error;
use crate::domain::time_series::TimeSeries;

pub trait DataPort {
    /// Load a closing-price series, sorted ascending by date.
    ///
    /// Fails with [`Error::Schema`] when the source lacks a date or close
    /// column.
    fn load_series(&self, source: &str) -> Result<TimeSeries, Error>;
}
