//! Pid file for the running `pock run` instance.

use std::fs;
use std::path::Path;

use nix::unistd::Pid;
use tracing::{debug, warn};

use crate::coordinator::CoordinatorError;

/// Write the current process pid to `path`, creating parent directories.
pub fn write_pid_file(path: &Path) -> Result<(), CoordinatorError> {
    let pid = std::process::id();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{}\n", pid))?;
    debug!(event = "core.pid.write_completed", pid = pid, path = %path.display());
    Ok(())
}

/// Read the pid from `path`. `None` if the file is missing or malformed.
pub fn read_pid_file(path: &Path) -> Option<u32> {
    let content = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            warn!(
                event = "core.pid.read_failed",
                path = %path.display(),
                error = %e,
            );
            return None;
        }
    };
    match content.trim().parse::<u32>() {
        Ok(pid) if signal_target(pid).is_some() => Some(pid),
        Ok(pid) => {
            warn!(
                event = "core.pid.out_of_range",
                path = %path.display(),
                pid = pid,
            );
            None
        }
        Err(_) => {
            warn!(
                event = "core.pid.parse_failed",
                path = %path.display(),
                content = %content.trim(),
            );
            None
        }
    }
}

pub fn remove_pid_file(path: &Path) -> Result<(), CoordinatorError> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(event = "core.pid.remove_completed", path = %path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CoordinatorError::Io(e)),
    }
}

/// The single process `pid` names, as a `kill(2)` target.
///
/// `0` addresses the caller's process group and values past `i32::MAX` wrap
/// to negative targets (a group, or `-1` for every process), so both are
/// refused.
pub(crate) fn signal_target(pid: u32) -> Option<Pid> {
    match i32::try_from(pid) {
        Ok(raw) if raw > 0 => Some(Pid::from_raw(raw)),
        _ => None,
    }
}

/// `kill(pid, 0)`: existence check without delivering a signal.
pub fn is_process_alive(pid: u32) -> bool {
    use nix::sys::signal;

    let Some(target) = signal_target(pid) else {
        return false;
    };

    match signal::kill(target, None) {
        Ok(()) => true,
        Err(nix::errno::Errno::ESRCH) => false,
        // EPERM: exists, owned by someone else
        Err(nix::errno::Errno::EPERM) => true,
        Err(_) => false,
    }
}

/// Pid of the live instance recorded at `pid_path`, if any.
///
/// A pid file naming a dead process is removed.
pub fn check_running(pid_path: &Path) -> Option<u32> {
    let pid = read_pid_file(pid_path)?;

    if is_process_alive(pid) {
        Some(pid)
    } else {
        warn!(
            event = "core.pid.stale_detected",
            pid = pid,
            path = %pid_path.display(),
        );
        if let Err(e) = remove_pid_file(pid_path) {
            warn!(
                event = "core.pid.stale_remove_failed",
                pid = pid,
                path = %pid_path.display(),
                error = %e,
            );
        }
        None
    }
}

/// Claim the pid file for this process, refusing if another instance is live.
pub fn acquire_pid_file(pid_path: &Path) -> Result<(), CoordinatorError> {
    if let Some(pid) = check_running(pid_path)
        && pid != std::process::id()
    {
        return Err(CoordinatorError::AlreadyRunning { pid });
    }
    write_pid_file(pid_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_and_read_pid_file() {
        let dir = tempfile::tempdir().unwrap();
        let pid_path = dir.path().join("pock.pid");

        write_pid_file(&pid_path).unwrap();
        assert_eq!(read_pid_file(&pid_path), Some(std::process::id()));
    }

    #[test]
    fn test_read_missing_pid_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_pid_file(&dir.path().join("pock.pid")).is_none());
    }

    #[test]
    fn test_read_corrupt_pid_file() {
        let dir = tempfile::tempdir().unwrap();
        let pid_path = dir.path().join("pock.pid");
        fs::write(&pid_path, "not_a_number\n").unwrap();
        assert!(read_pid_file(&pid_path).is_none());
    }

    #[test]
    fn test_pids_outside_single_process_range_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let pid_path = dir.path().join("pock.pid");

        for content in ["0\n", "4294967295\n", "2147483648\n"] {
            fs::write(&pid_path, content).unwrap();
            assert!(read_pid_file(&pid_path).is_none(), "accepted {content:?}");
            assert!(check_running(&pid_path).is_none(), "running {content:?}");
        }
    }

    #[test]
    fn test_signal_target_bounds() {
        assert!(signal_target(0).is_none());
        assert!(signal_target(u32::MAX).is_none());
        assert!(signal_target(i32::MAX as u32 + 1).is_none());
        assert_eq!(signal_target(1), Some(Pid::from_raw(1)));
        assert_eq!(
            signal_target(i32::MAX as u32),
            Some(Pid::from_raw(i32::MAX))
        );
        assert!(!is_process_alive(0));
        assert!(!is_process_alive(u32::MAX));
    }

    #[test]
    fn test_acquire_over_out_of_range_pid() {
        let dir = tempfile::tempdir().unwrap();
        let pid_path = dir.path().join("pock.pid");
        fs::write(&pid_path, "0\n").unwrap();

        acquire_pid_file(&pid_path).unwrap();
        assert_eq!(read_pid_file(&pid_path), Some(std::process::id()));
    }

    #[test]
    fn test_remove_missing_pid_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        remove_pid_file(&dir.path().join("pock.pid")).unwrap();
    }

    #[test]
    fn test_current_process_is_alive() {
        assert!(is_process_alive(std::process::id()));
        assert!(!is_process_alive(4_294_967));
    }

    #[test]
    fn test_check_running_removes_stale_file() {
        let dir = tempfile::tempdir().unwrap();
        let pid_path = dir.path().join("pock.pid");
        fs::write(&pid_path, "4294967\n").unwrap();

        assert!(check_running(&pid_path).is_none());
        assert!(!pid_path.exists());
    }

    #[test]
    fn test_acquire_over_stale_file() {
        let dir = tempfile::tempdir().unwrap();
        let pid_path = dir.path().join("nested").join("pock.pid");
        fs::create_dir_all(pid_path.parent().unwrap()).unwrap();
        fs::write(&pid_path, "4294967\n").unwrap();

        acquire_pid_file(&pid_path).unwrap();
        assert_eq!(read_pid_file(&pid_path), Some(std::process::id()));
    }

    #[test]
    fn test_acquire_refuses_live_instance() {
        let dir = tempfile::tempdir().unwrap();
        let pid_path = dir.path().join("pock.pid");
        // pid 1 is always alive on unix
        fs::write(&pid_path, "1\n").unwrap();

        let err = acquire_pid_file(&pid_path).unwrap_err();
        assert!(matches!(err, CoordinatorError::AlreadyRunning { pid: 1 }));
    }
}
