//! Session settings and path resolution.
//!
//! Supports NHLHOSTS_HOSTS_FILE / NHLHOSTS_DOMAINS_FILE env var overrides for testing.

use std::path::PathBuf;

use crate::domain::TargetSet;
use crate::platform;

/// Env var that overrides the domains file path.
pub const DOMAINS_FILE_ENV: &str = "NHLHOSTS_DOMAINS_FILE";

/// Domains file looked up in the working directory by default.
pub const DEFAULT_DOMAINS_FILE: &str = "domains.txt";

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub hosts_file: PathBuf,
    pub domains_file: PathBuf,
    pub targets: TargetSet,
}

impl Settings {
    /// Explicit values win, then env vars, then platform defaults.
    pub fn resolve(
        targets: TargetSet,
        hosts_file: Option<PathBuf>,
        domains_file: Option<PathBuf>,
    ) -> Self {
        let hosts_file = hosts_file.unwrap_or_else(platform::default_hosts_path);
        let domains_file = domains_file.unwrap_or_else(default_domains_path);
        Self {
            hosts_file,
            domains_file,
            targets,
        }
    }

    /// Settings rooted at the given files (for tests).
    pub fn for_test(hosts_file: impl Into<PathBuf>, domains_file: impl Into<PathBuf>) -> Self {
        Self {
            hosts_file: hosts_file.into(),
            domains_file: domains_file.into(),
            targets: TargetSet::default(),
        }
    }
}

/// Domains file path (respects NHLHOSTS_DOMAINS_FILE).
pub fn default_domains_path() -> PathBuf {
    match std::env::var(DOMAINS_FILE_ENV) {
        Ok(path) => PathBuf::from(path),
        Err(_) => PathBuf::from(DEFAULT_DOMAINS_FILE),
    }
}
