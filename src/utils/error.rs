use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrendError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} returned by {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Response parse error: {message}")]
    Parse { message: String },

    #[error("Wiki API error [{code}]: {info}")]
    Api { code: String, info: String },

    #[error("Article not found: {title}")]
    ArticleNotFound { title: String },

    #[error("Chart rendering failed: {message}")]
    Render { message: String },

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Parse,
    Api,
    Render,
    Output,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl TrendError {
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Network(_) | Self::HttpStatus { .. } => ErrorCategory::Network,
            Self::Parse { .. } => ErrorCategory::Parse,
            Self::Api { .. } | Self::ArticleNotFound { .. } => ErrorCategory::Api,
            Self::Render { .. } => ErrorCategory::Render,
            Self::Csv(_) | Self::Io(_) => ErrorCategory::Output,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    /// 網路類錯誤可能是暫時性的，其餘都視為處理失敗
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Parse | ErrorCategory::Api | ErrorCategory::Render => {
                ErrorSeverity::High
            }
            ErrorCategory::Output | ErrorCategory::Configuration => ErrorSeverity::Critical,
        }
    }

    pub fn is_network_error(&self) -> bool {
        self.category() == ErrorCategory::Network
    }

    pub fn is_parse_error(&self) -> bool {
        self.category() == ErrorCategory::Parse
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::Network(_) => {
                "Check network connectivity and that the API endpoint is reachable".to_string()
            }
            Self::HttpStatus { status, .. } if *status >= 500 => {
                "The wiki API is failing on its side; try again later".to_string()
            }
            Self::HttpStatus { .. } => {
                "Verify the API endpoint URL and request parameters".to_string()
            }
            Self::Parse { .. } => {
                "Make sure the endpoint is a MediaWiki api.php that supports formatversion=2"
                    .to_string()
            }
            Self::Api { code, .. } => format!("Fix the request rejected by the API ({})", code),
            Self::ArticleNotFound { .. } => {
                "Check the article title spelling (use underscores or spaces)".to_string()
            }
            Self::Render { .. } => "Check chart dimensions and margins".to_string(),
            Self::Csv(_) | Self::Io(_) => {
                "Make sure the output directory exists and is writable".to_string()
            }
            Self::ConfigValidationError { field, .. }
            | Self::InvalidConfigValueError { field, .. }
            | Self::MissingConfigError { field } => {
                format!("Review the '{}' setting", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not fetch revisions: {}", self),
            ErrorCategory::Parse => format!("Unexpected response from the wiki API: {}", self),
            ErrorCategory::Api => format!("The wiki API rejected the request: {}", self),
            ErrorCategory::Render => format!("Could not draw the chart: {}", self),
            ErrorCategory::Output => format!("Could not write output: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_is_network_error() {
        let err = TrendError::HttpStatus {
            status: 503,
            url: "https://example.org/w/api.php".to_string(),
        };
        assert!(err.is_network_error());
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.recovery_suggestion().contains("try again later"));
    }

    #[test]
    fn test_missing_shape_is_parse_error() {
        let err = TrendError::parse("missing query.pages");
        assert!(err.is_parse_error());
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("missing query.pages"));
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = TrendError::MissingConfigError {
            field: "source.title".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.recovery_suggestion().contains("source.title"));
    }
}
