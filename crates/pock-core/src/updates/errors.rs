use crate::errors::PockError;

#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("Release feed request failed: {message}")]
    RequestFailed { message: String },

    #[error("Release feed returned HTTP status {status}")]
    HttpStatus { status: u16 },

    #[error("Release feed is malformed: {message}")]
    InvalidFeed { message: String },

    #[error("Invalid version '{version}': {message}")]
    InvalidVersion { version: String, message: String },
}

impl PockError for UpdateError {
    fn error_code(&self) -> &'static str {
        match self {
            UpdateError::RequestFailed { .. } => "UPDATE_REQUEST_FAILED",
            UpdateError::HttpStatus { .. } => "UPDATE_HTTP_STATUS",
            UpdateError::InvalidFeed { .. } => "UPDATE_INVALID_FEED",
            UpdateError::InvalidVersion { .. } => "UPDATE_INVALID_VERSION",
        }
    }

    fn is_user_error(&self) -> bool {
        false
    }
}
