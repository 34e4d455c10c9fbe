//! Domain error types.

/// Top-level error type for longflat.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("{operation}: input series is empty")]
    EmptyInput { operation: String },

    #[error("schema error in {input}: {reason}")]
    Schema { input: String, reason: String },

    #[error("invalid data in {input}: {reason}")]
    InvalidData { input: String, reason: String },

    #[error("chart rendering failed: {reason}")]
    Chart { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        Error::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn empty_input(operation: &str) -> Self {
        Error::EmptyInput {
            operation: operation.to_string(),
        }
    }

    /// True for the configuration family: invalid values or an unreadable
    /// config file.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::ConfigParse { .. } | Error::ConfigInvalid { .. }
        )
    }
}

impl From<&Error> for std::process::ExitCode {
    fn from(err: &Error) -> Self {
        let code: u8 = match err {
            Error::Io(_) | Error::Chart { .. } => 1,
            Error::ConfigParse { .. } | Error::ConfigInvalid { .. } => 2,
            Error::Schema { .. } | Error::InvalidData { .. } => 3,
            Error::EmptyInput { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
