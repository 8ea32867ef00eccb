use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("home directory not found — set $HOME environment variable")]
    HomeNotFound,
}

/// File name of the user configuration inside `~/.pock/`.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// File name of the widget layout inside `~/.pock/`.
pub const WIDGETS_FILE_NAME: &str = "widgets.toml";

/// Centralized path construction for the `~/.pock/` directory layout.
///
/// Single source of truth for every path under `~/.pock/`. Use `resolve()` in
/// production code and `from_dir()` in tests.
#[derive(Debug, Clone)]
pub struct PockPaths {
    pock_dir: PathBuf,
}

impl PockPaths {
    /// Resolve paths from the user's home directory (`~/.pock`).
    pub fn resolve() -> Result<Self, PathError> {
        let home = dirs::home_dir().ok_or(PathError::HomeNotFound)?;
        Ok(Self {
            pock_dir: home.join(".pock"),
        })
    }

    /// Resolve from the home directory, falling back to `/tmp/.pock` when
    /// `$HOME` cannot be determined.
    pub fn resolve_or_tmp() -> Self {
        Self::resolve().unwrap_or_else(|_| Self::from_dir(PathBuf::from("/tmp/.pock")))
    }

    /// Create paths from an explicit base directory. Use in tests.
    pub fn from_dir(pock_dir: PathBuf) -> Self {
        Self { pock_dir }
    }

    /// The base `~/.pock` directory.
    pub fn pock_dir(&self) -> &Path {
        &self.pock_dir
    }

    // --- Top-level files ---

    pub fn user_config(&self) -> PathBuf {
        self.pock_dir.join(CONFIG_FILE_NAME)
    }

    pub fn widgets_file(&self) -> PathBuf {
        self.pock_dir.join(WIDGETS_FILE_NAME)
    }

    pub fn pid_file(&self) -> PathBuf {
        self.pock_dir.join("pock.pid")
    }

    /// State of the running instance, written by `pock run`.
    pub fn status_file(&self) -> PathBuf {
        self.pock_dir.join("status.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_paths() -> PockPaths {
        PockPaths::from_dir(PathBuf::from("/home/user/.pock"))
    }

    #[test]
    fn test_resolve_returns_ok_when_home_set() {
        // HOME is set in CI and dev environments
        let result = PockPaths::resolve();
        assert!(result.is_ok());
        let paths = result.unwrap();
        assert!(paths.pock_dir().to_string_lossy().contains(".pock"));
    }

    #[test]
    fn test_from_dir() {
        let paths = PockPaths::from_dir(PathBuf::from("/tmp/test-pock"));
        assert_eq!(paths.pock_dir(), Path::new("/tmp/test-pock"));
    }

    #[test]
    fn test_user_config() {
        assert_eq!(
            test_paths().user_config(),
            PathBuf::from("/home/user/.pock/config.toml")
        );
    }

    #[test]
    fn test_widgets_file() {
        assert_eq!(
            test_paths().widgets_file(),
            PathBuf::from("/home/user/.pock/widgets.toml")
        );
    }

    #[test]
    fn test_pid_file() {
        assert_eq!(
            test_paths().pid_file(),
            PathBuf::from("/home/user/.pock/pock.pid")
        );
    }

    #[test]
    fn test_status_file() {
        assert_eq!(
            test_paths().status_file(),
            PathBuf::from("/home/user/.pock/status.json")
        );
    }

    #[test]
    fn test_path_error_display() {
        assert_eq!(
            PathError::HomeNotFound.to_string(),
            "home directory not found — set $HOME environment variable"
        );
    }
}
