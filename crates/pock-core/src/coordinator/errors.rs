use crate::errors::PockError;
use crate::updates::UpdateError;

#[derive(Debug, thiserror::Error)]
pub enum CoordinatorError {
    #[error("Pock is already running (pid {pid})")]
    AlreadyRunning { pid: u32 },

    #[error("Pock is not running")]
    NotRunning,

    #[error("Failed to signal process {pid}: {message}")]
    SignalFailed { pid: u32, message: String },

    #[error("Status file '{path}' is unreadable: {message}")]
    StatusCorrupt { path: String, message: String },

    #[error("Failed to watch '{path}': {message}")]
    WatchFailed { path: String, message: String },

    #[error("Configuration error: {source}")]
    Config {
        #[from]
        source: pock_config::ConfigError,
    },

    #[error("Update checker unavailable: {source}")]
    Update {
        #[from]
        source: UpdateError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PockError for CoordinatorError {
    fn error_code(&self) -> &'static str {
        match self {
            CoordinatorError::AlreadyRunning { .. } => "ALREADY_RUNNING",
            CoordinatorError::NotRunning => "NOT_RUNNING",
            CoordinatorError::SignalFailed { .. } => "SIGNAL_FAILED",
            CoordinatorError::StatusCorrupt { .. } => "STATUS_CORRUPT",
            CoordinatorError::WatchFailed { .. } => "WATCH_FAILED",
            CoordinatorError::Config { source } => source.error_code(),
            CoordinatorError::Update { source } => source.error_code(),
            CoordinatorError::Io(_) => "COORDINATOR_IO_ERROR",
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            CoordinatorError::AlreadyRunning { .. } | CoordinatorError::NotRunning => true,
            CoordinatorError::Config { source } => source.is_user_error(),
            _ => false,
        }
    }
}
