use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvestError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Page not ready: {url} ({reason})")]
    PageNotReady { url: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Page,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl HarvestError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HarvestError::HttpError(_) => ErrorCategory::Network,
            HarvestError::PageNotReady { .. } => ErrorCategory::Page,
            HarvestError::ConfigError { .. }
            | HarvestError::InvalidConfigValueError { .. }
            | HarvestError::MissingConfigError { .. }
            | HarvestError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            HarvestError::CsvError(_)
            | HarvestError::IoError(_)
            | HarvestError::SerializationError(_) => ErrorCategory::Output,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network | ErrorCategory::Page => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Output => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and retry later",
            ErrorCategory::Page => {
                "The listing layout may have changed; check the card selectors or retry the page"
            }
            ErrorCategory::Configuration => "Fix the configuration value and run again",
            ErrorCategory::Output => "Check that the output directory exists and is writable",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            HarvestError::HttpError(e) => format!("Could not download the listing page: {}", e),
            HarvestError::PageNotReady { url, .. } => {
                format!("No listing cards could be read from {}", url)
            }
            HarvestError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            HarvestError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
            HarvestError::ConfigError { message } => {
                format!("The configuration file could not be read: {}", message)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_faults_are_retryable() {
        let err = HarvestError::PageNotReady {
            url: "https://car.encar.com/list/car?page=1".to_string(),
            reason: "no cards".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Page);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.user_friendly_message().contains("page=1"));
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = HarvestError::MissingConfigError {
            field: "source.start_url".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
    }

    #[test]
    fn test_unreadable_toml_is_a_config_error() {
        let err = crate::TomlConfig::from_toml_str("[harvest\nname = ").unwrap_err();
        assert!(matches!(err, HarvestError::ConfigError { .. }));
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.user_friendly_message().starts_with("The configuration file could not be read"));
    }

    #[test]
    fn test_output_errors_are_critical() {
        let err = HarvestError::IoError(std::io::Error::other("disk full"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
