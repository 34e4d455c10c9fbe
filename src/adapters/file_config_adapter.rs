//! INI file configuration adapter.

use crate::domain::error::Error;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

#[derive(Debug)]
pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| Error::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, Error> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| Error::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_config() {
        let content = r#"
[strategy]
rule = ma_cross
short_window = 3

[backtest]
initial_capital = 100000.0
"#;
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        assert_eq!(
            adapter.get_string("strategy", "rule"),
            Some("ma_cross".to_string())
        );
        assert_eq!(adapter.get_usize("strategy", "short_window").unwrap(), Some(3));
        assert_eq!(
            adapter.get_f64("backtest", "initial_capital").unwrap(),
            Some(100000.0)
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter =
            FileConfigAdapter::from_string("[backtest]\ninitial_capital = 100\n").unwrap();
        assert_eq!(adapter.get_string("backtest", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn keys_are_case_insensitive() {
        let adapter = FileConfigAdapter::from_string("[Strategy]\nLong_Window = 7\n").unwrap();
        assert_eq!(adapter.get_usize("strategy", "long_window").unwrap(), Some(7));
    }

    #[test]
    fn get_usize_missing_is_none() {
        let adapter = FileConfigAdapter::from_string("[strategy]\n").unwrap();
        assert_eq!(adapter.get_usize("strategy", "lookback").unwrap(), None);
    }

    #[test]
    fn get_usize_rejects_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[strategy]\nlookback = abc\n").unwrap();
        let err = adapter.get_usize("strategy", "lookback").unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { section, key, .. }
            if section == "strategy" && key == "lookback"));
    }

    #[test]
    fn get_f64_rejects_nan() {
        let adapter = FileConfigAdapter::from_string("[backtest]\nrisk_free_rate = NaN\n").unwrap();
        assert!(adapter.get_f64("backtest", "risk_free_rate").is_err());
    }

    #[test]
    fn get_f64_missing_is_none() {
        let adapter = FileConfigAdapter::from_string("[backtest]\n").unwrap();
        assert_eq!(adapter.get_f64("backtest", "risk_free_rate").unwrap(), None);
    }

    #[test]
    fn from_file_reads_config() {
        let content = "[report]\nchart_path = /tmp/equity.svg\n";
        let file = create_temp_config(content);
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("report", "chart_path"),
            Some("/tmp/equity.svg".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/config.ini");
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }
}
