//! File-based tracing setup. The terminal belongs to the TUI, so logs go to
//! `$XDG_DATA_HOME/vehcheck/vehcheck.log`.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `vehcheck=debug`).
pub const LOG_ENV: &str = "VEHCHECK_LOG";

/// Returns the default log file path.
pub fn default_log_path() -> io::Result<PathBuf> {
    let dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no XDG data directory"))?;
    Ok(dir.join("vehcheck").join("vehcheck.log"))
}

/// Installs the global subscriber, appending to `path`.
///
/// The filter comes from [`LOG_ENV`], defaulting to `info`.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(io::Error::other)
}
