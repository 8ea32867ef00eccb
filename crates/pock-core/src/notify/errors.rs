use crate::errors::PockError;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Could not launch {program}: {source}")]
    LaunchFailed {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    ToolFailed {
        program: &'static str,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

impl PockError for NotifyError {
    fn error_code(&self) -> &'static str {
        match self {
            NotifyError::LaunchFailed { .. } => "NOTIFY_LAUNCH_FAILED",
            NotifyError::ToolFailed { .. } => "NOTIFY_TOOL_FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_failed_names_program() {
        let error = NotifyError::LaunchFailed {
            program: "notify-send",
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(
            error.to_string(),
            "Could not launch notify-send: no such file"
        );
        assert_eq!(error.error_code(), "NOTIFY_LAUNCH_FAILED");
        assert!(!error.is_user_error());
    }
}
