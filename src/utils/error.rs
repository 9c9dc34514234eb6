use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KahinError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Content not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read content {}: {reason}", path.display())]
    ReadError { path: PathBuf, reason: String },

    #[error("Upstream call failed: {message}")]
    UpstreamError { message: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Content,
    Upstream,
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

impl KahinError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArgument { .. } => ErrorCategory::Input,
            Self::NotFound { .. } | Self::ReadError { .. } => ErrorCategory::Content,
            Self::UpstreamError { .. } | Self::HttpError(_) => ErrorCategory::Upstream,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::TomlError(_) => ErrorCategory::Configuration,
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidArgument { .. } => ErrorSeverity::Low,
            Self::NotFound { .. } => ErrorSeverity::Medium,
            Self::ReadError { .. } | Self::UpstreamError { .. } | Self::HttpError(_) => {
                ErrorSeverity::High
            }
            _ => ErrorSeverity::Critical,
        }
    }

    /// Expected conditions the user can fix or live with. Everything else
    /// is an operator problem and gets logged in full.
    pub fn is_user_recoverable(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::NotFound { .. })
    }

    /// Message shown to the chat user. Operator-facing detail stays in the logs.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InvalidArgument { message } => format!("Girilen değer hatalı: {}", message),
            Self::NotFound { .. } => {
                "Dosya işlemlerinde hata ile karşılaşıldı, sorun yöneticiye bildirildi.".to_string()
            }
            _ => "Bilinmeyen bir hata ile karşılaşıldı ve yöneticiye haber verildi.".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Check the birthdate format (DD.MM.YYYY)",
            ErrorCategory::Content => "Check that the data directory contains the expected content files",
            ErrorCategory::Upstream => "Check network connectivity and API credentials",
            ErrorCategory::Configuration => "Check the environment variables and the config file",
            ErrorCategory::System => "Check file permissions and disk state",
        }
    }
}

pub type Result<T> = std::result::Result<T, KahinError>;
