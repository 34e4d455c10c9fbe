//! Chart rendering port trait.

use crate::domain::error::Error;
use crate::domain::time_series::TimeSeries;
use std::path::Path;

/// Port for plotting an equity curve. Failures are reported to the caller,
/// which decides whether they are fatal.
pub trait ChartPort {
    fn render_equity(&self, equity_curve: &TimeSeries, output_path: &Path) -> Result<(), Error>;
}
