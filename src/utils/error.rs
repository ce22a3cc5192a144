use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Unexpected HTTP status {status}: {body}")]
    StatusError { status: u16, body: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
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

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::ApiError(_) | ClientError::StatusError { .. } => ErrorCategory::Network,
            ClientError::SerializationError(_) => ErrorCategory::Data,
            ClientError::ConfigError { .. }
            | ClientError::InvalidConfigValueError { .. }
            | ClientError::ConfigValidationError { .. } => ErrorCategory::Configuration,
            ClientError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 網路與伺服器錯誤通常可重試
            ClientError::ApiError(_) => ErrorSeverity::Medium,
            ClientError::StatusError { status, .. } if *status >= 500 => ErrorSeverity::Medium,
            ClientError::StatusError { .. } | ClientError::SerializationError(_) => {
                ErrorSeverity::High
            }
            _ => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ClientError::ApiError(e) if e.is_timeout() => {
                "The request timed out; try again or raise http.timeout_seconds".to_string()
            }
            ClientError::ApiError(_) => {
                "Check network connectivity and that the service is reachable".to_string()
            }
            ClientError::StatusError { status: 401, .. }
            | ClientError::StatusError { status: 403, .. } => {
                "Log in first with `prices login`".to_string()
            }
            ClientError::StatusError { status, .. } if *status >= 500 => {
                "The service reported an internal error; retry later".to_string()
            }
            ClientError::StatusError { .. } => {
                "Check the request parameters against the service documentation".to_string()
            }
            ClientError::SerializationError(_) => {
                "The response or input was not valid JSON; check the payload".to_string()
            }
            ClientError::IoError(_) => "Check file paths and permissions".to_string(),
            ClientError::ConfigError { .. } => {
                "Set PRICES_API_URL or PRICES_API_LOCAL_URL, or pass --prices-url".to_string()
            }
            ClientError::InvalidConfigValueError { field, .. }
            | ClientError::ConfigValidationError { field, .. } => {
                format!("Fix the value of `{}` in the configuration", field)
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::ApiError(_) => "Could not reach the remote service".to_string(),
            ClientError::StatusError { status, .. } => {
                format!("The service answered with HTTP {}", status)
            }
            ClientError::SerializationError(_) => "Received malformed JSON".to_string(),
            ClientError::IoError(e) => format!("File operation failed: {}", e),
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
