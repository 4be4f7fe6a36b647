use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrugNetError {
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Backend returned HTTP {status}: {detail}")]
    Http { status: u16, detail: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("No view registered for route '{path}'")]
    UnknownRoute { path: String },

    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
}

pub type Result<T> = std::result::Result<T, DrugNetError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Backend,
    Input,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DrugNetError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DrugNetError::Request(_) => ErrorCategory::Network,
            DrugNetError::Http { .. } | DrugNetError::Serialization(_) => ErrorCategory::Backend,
            DrugNetError::UnknownRoute { .. } | DrugNetError::InvalidInput { .. } => {
                ErrorCategory::Input
            }
            DrugNetError::Url(_)
            | DrugNetError::ConfigError { .. }
            | DrugNetError::ConfigValidationError { .. }
            | DrugNetError::InvalidConfigValueError { .. }
            | DrugNetError::MissingConfigError { .. } => ErrorCategory::Configuration,
            DrugNetError::Csv(_) | DrugNetError::Io(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DrugNetError::Request(_) => ErrorSeverity::Medium,
            DrugNetError::Http { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            DrugNetError::Http { .. }
            | DrugNetError::Serialization(_)
            | DrugNetError::UnknownRoute { .. }
            | DrugNetError::InvalidInput { .. } => ErrorSeverity::High,
            _ => ErrorSeverity::Critical,
        }
    }

    /// 給終端使用者看的訊息，不含內部細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            DrugNetError::Request(e) if e.is_connect() => {
                "Could not connect to the drug service".to_string()
            }
            DrugNetError::Request(e) if e.is_timeout() => {
                "The drug service did not answer in time".to_string()
            }
            DrugNetError::Request(_) => "Request to the drug service failed".to_string(),
            DrugNetError::Http { status: 404, detail } => format!("Not found: {}", detail),
            DrugNetError::Http { status, detail } => {
                format!("The drug service rejected the request ({}): {}", status, detail)
            }
            DrugNetError::Serialization(_) => {
                "The drug service returned data in an unexpected shape".to_string()
            }
            DrugNetError::UnknownRoute { path } => format!("Unknown view '{}'", path),
            DrugNetError::InvalidInput { field, reason } => format!("{}: {}", field, reason),
            DrugNetError::Csv(_) | DrugNetError::Io(_) => {
                format!("Could not write output: {}", self)
            }
            _ => format!("Invalid configuration: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => {
                "Check that the backend is running and that --base-url points at it"
            }
            ErrorCategory::Backend => match self {
                DrugNetError::Http { status: 404, .. } => {
                    "Use `drugnet details <partial name>` to find the exact drug name"
                }
                DrugNetError::Http { status, .. } if *status >= 500 => {
                    "The backend failed internally; check its logs and retry later"
                }
                _ => "Check the request arguments against the backend's API",
            },
            ErrorCategory::Input => "Run `drugnet routes` or `drugnet --help` for valid usage",
            ErrorCategory::Configuration => {
                "Check the config file, CLI flags and any ${VAR} environment variables"
            }
            ErrorCategory::System => "Check the output path and its permissions",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_severity_depends_on_status() {
        let not_found = DrugNetError::Http {
            status: 404,
            detail: "Medicamento no encontrado".to_string(),
        };
        let server = DrugNetError::Http {
            status: 500,
            detail: "boom".to_string(),
        };

        assert_eq!(not_found.category(), ErrorCategory::Backend);
        assert_eq!(not_found.severity(), ErrorSeverity::High);
        assert_eq!(server.severity(), ErrorSeverity::Medium);
        assert!(not_found.user_friendly_message().contains("Medicamento no encontrado"));
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = DrugNetError::MissingConfigError {
            field: "api.base_url".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_input_errors() {
        let err = DrugNetError::UnknownRoute {
            path: "/nowhere".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.user_friendly_message(), "Unknown view '/nowhere'");
    }
}
