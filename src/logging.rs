//! Logging setup
//!
//! The terminal is owned by the UI, so log events go to a file next to the
//! cache instead of stderr. The level comes from `KICKOFF_LOG` using
//! `EnvFilter` directives (e.g. `debug` or `kickoff::data=debug,info`).

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives
pub const LOG_ENV: &str = "KICKOFF_LOG";

const LOG_FILE: &str = "kickoff.log";
const DEFAULT_DIRECTIVE: &str = "info";

/// Path of the log file inside `dir`
pub fn log_path(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE)
}

/// Builds the filter from `KICKOFF_LOG`, falling back to `info`
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Installs the global subscriber writing to `<dir>/kickoff.log`
///
/// Returns the log file path. A subscriber that is already installed is left
/// in place.
pub fn init(dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = log_path(dir);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();
    if installed.is_ok() {
        tracing::debug!(path = %path.display(), "logging initialized");
    }

    Ok(path)
}
