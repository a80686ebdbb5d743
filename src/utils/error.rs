use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// 後端回應非 2xx，message 為可直接顯示給使用者的訊息
    #[error("{message}")]
    ApiStatusError { status: u16, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Clipboard error: {message}")]
    ClipboardError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Api,
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code; every failure exits non-zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl ClientError {
    pub fn validation(message: impl Into<String>) -> Self {
        ClientError::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::HttpError(_) => ErrorCategory::Network,
            ClientError::ApiStatusError { .. } | ClientError::SerializationError(_) => {
                ErrorCategory::Api
            }
            ClientError::ConfigValidationError { .. }
            | ClientError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ClientError::ValidationError { .. } => ErrorCategory::Input,
            ClientError::IoError(_) | ClientError::ClipboardError { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ClientError::ValidationError { .. } | ClientError::ClipboardError { .. } => {
                ErrorSeverity::Low
            }
            ClientError::HttpError(_) | ClientError::ApiStatusError { .. } => {
                ErrorSeverity::Medium
            }
            ClientError::SerializationError(_)
            | ClientError::ConfigValidationError { .. }
            | ClientError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            ClientError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Message shown in the error view.
    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::HttpError(e) if e.is_timeout() => {
                "The request timed out. The backend may be waking up.".to_string()
            }
            ClientError::HttpError(e) if e.is_connect() => {
                "Could not connect to the search API.".to_string()
            }
            ClientError::HttpError(_) => "Network request failed.".to_string(),
            ClientError::ApiStatusError { message, .. } => message.clone(),
            ClientError::SerializationError(_) => {
                "The API returned a response that could not be read.".to_string()
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check the API base URL and your connection, then retry",
            ErrorCategory::Api => "Retry in a moment; run `health` to check the backend status",
            ErrorCategory::Configuration => "Fix the configuration value and run again",
            ErrorCategory::Input => "Check the command arguments (see `help`)",
            ErrorCategory::System => "Check file permissions and the output directory",
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
