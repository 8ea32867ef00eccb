use crate::errors::PockError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to build root content provider: {message}")]
    ProviderConstructionFailed { message: String },

    #[error("Widget layout unavailable: {source}")]
    LayoutUnavailable {
        #[from]
        source: pock_config::ConfigError,
    },

    #[error("No live session")]
    NoLiveSession,

    #[error("Failed to open customization: {message}")]
    CustomizationFailed { message: String },
}

impl PockError for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            SessionError::ProviderConstructionFailed { .. } => "PROVIDER_CONSTRUCTION_FAILED",
            SessionError::LayoutUnavailable { .. } => "LAYOUT_UNAVAILABLE",
            SessionError::NoLiveSession => "NO_LIVE_SESSION",
            SessionError::CustomizationFailed { .. } => "CUSTOMIZATION_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(
            self,
            SessionError::LayoutUnavailable { .. } | SessionError::NoLiveSession
        )
    }
}
