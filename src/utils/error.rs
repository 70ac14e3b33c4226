use thiserror::Error;

#[derive(Error, Debug)]
pub enum GnssError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required setting: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid date: {message}")]
    InvalidDateError { message: String },

    #[error("Cannot parse '{input}' with pattern '{pattern}' at position {position}: {reason}")]
    PatternParseError {
        pattern: String,
        input: String,
        position: usize,
        reason: String,
    },

    #[error("Unknown {kind}: '{value}'")]
    UnknownIdentifierError { kind: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl GnssError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDateError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            GnssError::IoError(_) | GnssError::SerializationError(_) => ErrorCategory::Io,
            GnssError::ConfigError { .. }
            | GnssError::InvalidConfigValueError { .. }
            | GnssError::MissingConfigError { .. } => ErrorCategory::Configuration,
            GnssError::InvalidDateError { .. }
            | GnssError::PatternParseError { .. }
            | GnssError::UnknownIdentifierError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Input => ErrorSeverity::Medium,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GnssError::IoError(_) => "Check that the file exists and is readable",
            GnssError::SerializationError(_) => "Retry without --json",
            GnssError::ConfigError { .. } => "Check the settings file is valid TOML",
            GnssError::InvalidConfigValueError { .. } => "Fix the value named in the message",
            GnssError::MissingConfigError { .. } => "Add the missing setting to the settings file",
            GnssError::InvalidDateError { .. } => "Use a calendar date that exists (month 1-12, valid day)",
            GnssError::PatternParseError { .. } => {
                "Make sure the text matches the pattern exactly; escape literal letters with '\\'"
            }
            GnssError::UnknownIdentifierError { .. } => {
                "Run 'gnss-kit systems' or 'gnss-kit signals' to list known names"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GnssError::IoError(e) => format!("Could not access a file: {}", e),
            GnssError::PatternParseError {
                input, position, ..
            } => {
                let rest = input.get(*position..).unwrap_or("");
                format!("Could not read the date-time near '{}'", rest)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GnssError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_follows_category() {
        let io = GnssError::IoError(std::io::Error::new(std::io::ErrorKind::NotFound, "x"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);
        assert_eq!(GnssError::config("bad").severity(), ErrorSeverity::High);
        assert_eq!(
            GnssError::invalid_date("2001-02-30").severity(),
            ErrorSeverity::Medium
        );
    }

    #[test]
    fn test_parse_error_message_points_at_rest_of_input() {
        let e = GnssError::PatternParseError {
            pattern: "YYYY-MM".to_string(),
            input: "2001/02".to_string(),
            position: 4,
            reason: "expected '-'".to_string(),
        };
        assert_eq!(e.category(), ErrorCategory::Input);
        assert!(e.user_friendly_message().contains("'/02'"));
        assert!(e.to_string().contains("position 4"));
    }
}
