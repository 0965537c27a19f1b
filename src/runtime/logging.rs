use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

/// Initialize file logging.
///
/// Writing to stderr would corrupt the terminal UI, so events go to
/// `$XDG_STATE_HOME/rondo/rondo.log` (or `~/.local/state/rondo/rondo.log`).
/// The filter is overridable via `RONDO_LOG`. Logging is best-effort: if the
/// file cannot be opened the app runs without it.
pub fn init() {
    let Some(path) = log_file_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_env("RONDO_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
}

/// Compute the log path under `$XDG_STATE_HOME/rondo/rondo.log` or
/// `~/.local/state/rondo/rondo.log` when `XDG_STATE_HOME` is not set.
fn log_file_path() -> Option<PathBuf> {
    let state_home = if let Some(xdg) = std::env::var_os("XDG_STATE_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = std::env::var_os("HOME") {
        Some(PathBuf::from(home).join(".local").join("state"))
    } else {
        None
    };

    state_home.map(|d| d.join("rondo").join("rondo.log"))
}
