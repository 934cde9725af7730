//! Unix (macOS, Linux) defaults.

pub const HOSTS_PATH: &str = "/etc/hosts";

pub const ELEVATION_HINT: &str =
    "Hosts file not writable. Try running with elevated privileges.\n>> Run me again with sudo";

pub const LINE_ENDING: &str = "\n";
