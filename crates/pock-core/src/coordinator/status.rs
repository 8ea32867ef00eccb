//! `~/.pock/status.json`: what the running instance is presenting.
//!
//! Written by the coordinator after every state change and removed on
//! shutdown. `pock status` reads it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::errors::CoordinatorError;
use crate::session::SessionSnapshot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceStatus {
    pub pid: u32,
    pub permission_granted: bool,
    pub updates_enabled: bool,
    pub session: Option<SessionSnapshot>,
    pub updated_at: String,
}

fn cleanup_temp_file(temp_file: &Path, original_error: &std::io::Error) {
    if let Err(cleanup_err) = fs::remove_file(temp_file) {
        warn!(
            event = "core.status.temp_file_cleanup_failed",
            temp_file = %temp_file.display(),
            original_error = %original_error,
            cleanup_error = %cleanup_err,
        );
    }
}

/// Replace the status file atomically (temp file + rename).
pub fn write_status(path: &Path, status: &InstanceStatus) -> Result<(), CoordinatorError> {
    let json = serde_json::to_string_pretty(status)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_file = path.with_extension("json.tmp");
    if let Err(e) = fs::write(&temp_file, &json) {
        cleanup_temp_file(&temp_file, &e);
        return Err(e.into());
    }
    if let Err(e) = fs::rename(&temp_file, path) {
        cleanup_temp_file(&temp_file, &e);
        return Err(e.into());
    }
    Ok(())
}

/// `Ok(None)` when no status has been written.
pub fn read_status(path: &Path) -> Result<Option<InstanceStatus>, CoordinatorError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| CoordinatorError::StatusCorrupt {
            path: path.display().to_string(),
            message: e.to_string(),
        })
}

pub fn remove_status(path: &Path) -> Result<(), CoordinatorError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionId;

    fn sample() -> InstanceStatus {
        InstanceStatus {
            pid: 4242,
            permission_granted: false,
            updates_enabled: true,
            session: Some(SessionSnapshot {
                id: SessionId::new(2),
                provider: "widget strip [dock]".to_string(),
                widgets: vec!["dock".to_string()],
                live: true,
                created_at: "2026-01-01T00:00:00+00:00".to_string(),
            }),
            updated_at: "2026-01-01T00:00:01+00:00".to_string(),
        }
    }

    #[test]
    fn test_written_status_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.json");

        write_status(&path, &sample()).unwrap();

        assert_eq!(read_status(&path).unwrap(), Some(sample()));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn test_missing_status_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(read_status(&dir.path().join("status.json")).unwrap(), None);
        remove_status(&dir.path().join("status.json")).unwrap();
    }

    #[test]
    fn test_corrupt_status_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.json");
        fs::write(&path, "{ not json").unwrap();

        let err = read_status(&path).unwrap_err();
        assert!(matches!(err, CoordinatorError::StatusCorrupt { .. }));
    }
}
