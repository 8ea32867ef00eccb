use std::error::Error;

/// Base trait for all application errors
pub trait PockError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling
    fn error_code(&self) -> &'static str;

    /// Whether this error should be logged as an error or warning
    fn is_user_error(&self) -> bool {
        false
    }
}

/// Common result type for the application
pub type PockResult<T> = Result<T, Box<dyn PockError>>;

impl PockError for pock_config::ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            pock_config::ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            pock_config::ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            pock_config::ConfigError::LayoutNotFound { .. } => "LAYOUT_NOT_FOUND",
            pock_config::ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            pock_config::ConfigError::ConfigParseError { .. }
                | pock_config::ConfigError::InvalidConfiguration { .. }
                | pock_config::ConfigError::LayoutNotFound { .. }
        )
    }
}
