//! Windows defaults.

pub const HOSTS_PATH: &str = r"C:\Windows\System32\drivers\etc\hosts";

pub const ELEVATION_HINT: &str =
    "Hosts file not writable. Try running with elevated privileges.\n>> Right click on me and Run as Administrator";

pub const LINE_ENDING: &str = "\r\n";
