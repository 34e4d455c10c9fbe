//! Configuration access port trait.

use crate::domain::error::Error;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;

    /// `Ok(None)` when the key is absent or blank; `ConfigInvalid` when it is
    /// present but not a non-negative integer.
    fn get_usize(&self, section: &str, key: &str) -> Result<Option<usize>, Error> {
        match self.get_string(section, key) {
            Some(s) if !s.trim().is_empty() => s.trim().parse().map(Some).map_err(|_| {
                Error::config_invalid(section, key, format!("expected an integer, got '{}'", s))
            }),
            _ => Ok(None),
        }
    }

    /// `Ok(None)` when the key is absent or blank; `ConfigInvalid` when it is
    /// present but not a finite number.
    fn get_f64(&self, section: &str, key: &str) -> Result<Option<f64>, Error> {
        match self.get_string(section, key) {
            Some(s) if !s.trim().is_empty() => match s.trim().parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(Some(v)),
                _ => Err(Error::config_invalid(
                    section,
                    key,
                    format!("expected a finite number, got '{}'", s),
                )),
            },
            _ => Ok(None),
        }
    }
}
