use thiserror::Error;

#[derive(Error, Debug)]
pub enum DesignError {
    #[error("Failed to read '{path}': {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration parse error: {message}")]
    ConfigParseError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Indicator '{name}' has {found} points, expected {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl DesignError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DesignError::ReadError { .. }
            | DesignError::WriteError { .. }
            | DesignError::IoError(_)
            | DesignError::CsvError(_) => ErrorCategory::Io,
            DesignError::ConfigParseError { .. }
            | DesignError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DesignError::LengthMismatch { .. } => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::High,
            ErrorCategory::Data => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DesignError::ReadError { .. } => {
                "Check that the subject list exists relative to the working directory"
            }
            DesignError::WriteError { .. } | DesignError::IoError(_) => {
                "Check that the output directory exists and is writable"
            }
            DesignError::CsvError(_) => "Check that the indicator table path is writable",
            DesignError::ConfigParseError { .. } => "Make sure the config file is valid TOML",
            DesignError::InvalidConfigValueError { .. } => "Fix the reported option and run again",
            DesignError::LengthMismatch { .. } => {
                "This is an internal error, please report it with the subject list used"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DesignError::ReadError { path, .. } => format!("Cannot read subject list '{}'", path),
            DesignError::WriteError { path, .. } => format!("Cannot write design file '{}'", path),
            other => other.to_string(),
        }
    }

    /// Exit code used by the binary.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, DesignError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_is_io_and_high_severity() {
        let err = DesignError::ReadError {
            path: "subs".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.exit_code(), 1);
        assert!(err.user_friendly_message().contains("subs"));
    }

    #[test]
    fn test_config_errors_exit_with_two() {
        let err = DesignError::InvalidConfigValueError {
            field: "markers.factor_a".to_string(),
            value: String::new(),
            reason: "Value cannot be empty".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.exit_code(), 2);
    }
}
