//! CSV file data adapter.
//!
//! Expects a headered file with (case-insensitive) `date` and `close`
//! columns; any other columns are ignored.

use crate::domain::error::Error;
use crate::domain::time_series::TimeSeries;
use crate::ports::data_port::DataPort;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Default)]
pub struct CsvAdapter {
    base_path: Option<PathBuf>,
}

impl CsvAdapter {
    pub fn new() -> Self {
        Self { base_path: None }
    }

    /// Resolve relative sources against `base_path`.
    pub fn with_base_path(base_path: PathBuf) -> Self {
        Self {
            base_path: Some(base_path),
        }
    }

    fn csv_path(&self, source: &str) -> PathBuf {
        match &self.base_path {
            Some(base) => base.join(source),
            None => PathBuf::from(source),
        }
    }

    /// Parse CSV text; `source` only labels errors.
    pub fn parse(content: &str, source: &str) -> Result<TimeSeries, Error> {
        let schema = |reason: String| Error::Schema {
            input: source.to_string(),
            reason,
        };
        let invalid = |line: u64, reason: String| Error::InvalidData {
            input: source.to_string(),
            reason: format!("line {}: {}", line, reason),
        };

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| schema(format!("unreadable header: {}", e)))?
            .iter()
            .map(|h| h.to_lowercase())
            .collect();

        let date_idx = headers
            .iter()
            .position(|h| h == "date")
            .ok_or_else(|| schema("missing 'date' column".to_string()))?;
        let close_idx = headers
            .iter()
            .position(|h| h == "close")
            .ok_or_else(|| schema("missing 'close' column".to_string()))?;

        let mut points = Vec::new();
        let mut seen = HashSet::new();

        for result in rdr.records() {
            let record = result.map_err(|e| Error::InvalidData {
                input: source.to_string(),
                reason: format!("CSV parse error: {}", e),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let date_str = record.get(date_idx).unwrap_or_default();
            let date = parse_date(date_str)
                .ok_or_else(|| invalid(line, format!("invalid date '{}'", date_str)))?;

            let close_str = record.get(close_idx).unwrap_or_default();
            let close: f64 = close_str
                .parse()
                .map_err(|_| invalid(line, format!("invalid close '{}'", close_str)))?;
            if !(close.is_finite() && close > 0.0) {
                return Err(invalid(line, format!("close must be positive, got {}", close)));
            }

            if !seen.insert(date) {
                return Err(invalid(line, format!("duplicate date {}", date)));
            }
            points.push((date, close));
        }

        points.sort_by_key(|(d, _)| *d);
        debug!(source, rows = points.len(), "loaded price series");
        Ok(TimeSeries::new(points))
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
                .map(|dt| dt.date())
        })
}

impl DataPort for CsvAdapter {
    fn load_series(&self, source: &str) -> Result<TimeSeries, Error> {
        let path = self.csv_path(source);
        let content = fs::read_to_string(&path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("failed to read {}: {}", path.display(), e),
            ))
        })?;
        Self::parse(&content, &path.display().to_string())
    }
}
