//! Platform defaults for the hosts file location and privilege hints.

use std::path::PathBuf;

#[cfg(unix)]
pub mod unix;

#[cfg(windows)]
pub mod windows;

#[cfg(unix)]
use unix as imp;

#[cfg(windows)]
use windows as imp;

/// Env var that overrides the hosts file path (used by tests).
pub const HOSTS_FILE_ENV: &str = "NHLHOSTS_HOSTS_FILE";

/// System hosts file path, unless `NHLHOSTS_HOSTS_FILE` is set.
pub fn default_hosts_path() -> PathBuf {
    if let Ok(path) = std::env::var(HOSTS_FILE_ENV) {
        return PathBuf::from(path);
    }
    PathBuf::from(imp::HOSTS_PATH)
}

/// Message shown when the hosts file cannot be written.
pub fn elevation_hint() -> &'static str {
    imp::ELEVATION_HINT
}

/// Line terminator used when writing the hosts file back.
pub fn line_ending() -> &'static str {
    imp::LINE_ENDING
}
