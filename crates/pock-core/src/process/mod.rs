//! Process-level plumbing: pid file and signals.

pub mod pid;
pub mod signals;

pub use pid::{acquire_pid_file, check_running, read_pid_file, remove_pid_file};
pub use signals::{ControlRequest, ControlSignals, send_control_request, wait_for_shutdown_signal};
