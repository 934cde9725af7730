//! Hosts file read/write.
//!
//! The file is kept as an ordered list of line records so comments, blank
//! lines and anything we cannot parse survive a rewrite untouched.

use std::fs;
use std::io::{Read, Write};
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::platform;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("read hosts file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("write hosts file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

/// What a single hosts file line holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Comment,
    Blank,
    Entry {
        ip: IpAddr,
        hostnames: Vec<String>,
        /// Trailing `# ...` text, kept when the line is rewritten.
        comment: Option<String>,
    },
    Malformed {
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostsLine {
    pub raw: String,
    pub kind: LineKind,
    /// Bytes as read, for lines that were not valid UTF-8.
    original: Option<Vec<u8>>,
}

impl HostsLine {
    /// Classify one line of the hosts file.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let kind = if trimmed.is_empty() {
            LineKind::Blank
        } else if trimmed.starts_with('#') {
            LineKind::Comment
        } else {
            let (body, comment) = match trimmed.split_once('#') {
                Some((body, rest)) => (body, Some(rest.trim().to_string())),
                None => (trimmed, None),
            };
            let fields: Vec<&str> = body.split_whitespace().collect();
            if fields.len() < 2 {
                LineKind::Malformed {
                    reason: format!("bad hosts line: {trimmed:?}"),
                }
            } else {
                match fields[0].parse::<IpAddr>() {
                    Ok(ip) => LineKind::Entry {
                        ip,
                        hostnames: fields[1..].iter().map(|h| h.to_string()).collect(),
                        comment,
                    },
                    Err(_) => LineKind::Malformed {
                        reason: format!("bad IP address {:?}", fields[0]),
                    },
                }
            }
        };
        Self {
            raw: raw.to_string(),
            kind,
            original: None,
        }
    }

    /// Like [`HostsLine::parse`], but tolerates invalid UTF-8. Such lines are
    /// classified from a lossy decode and written back byte for byte.
    pub fn parse_bytes(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(s) => Self::parse(s),
            Err(_) => {
                let mut line = Self::parse(&String::from_utf8_lossy(bytes));
                line.original = Some(bytes.to_vec());
                line
            }
        }
    }

    /// New mapping line for `ip` and `hostnames`.
    pub fn entry(ip: IpAddr, hostnames: Vec<String>) -> Self {
        let kind = LineKind::Entry {
            ip,
            hostnames,
            comment: None,
        };
        Self {
            raw: render_entry(&kind),
            kind,
            original: None,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self.kind, LineKind::Comment)
    }

    pub fn is_blank(&self) -> bool {
        matches!(self.kind, LineKind::Blank)
    }

    /// Parse error for malformed lines.
    pub fn error(&self) -> Option<&str> {
        match &self.kind {
            LineKind::Malformed { reason } => Some(reason),
            _ => None,
        }
    }

    pub fn ip(&self) -> Option<IpAddr> {
        match &self.kind {
            LineKind::Entry { ip, .. } => Some(*ip),
            _ => None,
        }
    }

    pub fn hostnames(&self) -> &[String] {
        match &self.kind {
            LineKind::Entry { hostnames, .. } => hostnames,
            _ => &[],
        }
    }

    /// Hostname match is case-insensitive, like the resolver's.
    pub fn has_hostname(&self, hostname: &str) -> bool {
        self.hostnames()
            .iter()
            .any(|h| h.eq_ignore_ascii_case(hostname))
    }

    /// Bytes written back for this line.
    pub fn as_bytes(&self) -> &[u8] {
        self.original.as_deref().unwrap_or(self.raw.as_bytes())
    }

    fn refresh_raw(&mut self) {
        self.raw = render_entry(&self.kind);
        self.original = None;
    }
}

fn render_entry(kind: &LineKind) -> String {
    match kind {
        LineKind::Entry {
            ip,
            hostnames,
            comment,
        } => {
            let mut s = format!("{ip}\t{}", hostnames.join(" "));
            if let Some(c) = comment {
                s.push_str(" # ");
                s.push_str(c);
            }
            s
        }
        _ => String::new(),
    }
}

/// In-memory copy of a hosts file. Changes stay in memory until [`flush`].
///
/// [`flush`]: HostsFile::flush
#[derive(Debug, Clone)]
pub struct HostsFile {
    path: PathBuf,
    lines: Vec<HostsLine>,
    dirty: bool,
}

impl HostsFile {
    /// Read and parse the hosts file at `path` (with shared lock).
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let read_err = |source| Error::Read {
            path: path.clone(),
            source,
        };
        let mut file = fs::OpenOptions::new()
            .read(true)
            .open(&path)
            .map_err(read_err)?;
        fs2::FileExt::lock_shared(&file).map_err(read_err)?;
        let mut content = Vec::new();
        file.read_to_end(&mut content).map_err(read_err)?;
        let hosts = Self::from_bytes(path.clone(), &content);
        debug!(
            path = %path.display(),
            lines = hosts.lines.len(),
            "loaded hosts file"
        );
        Ok(hosts)
    }

    /// Build from already-read content.
    pub fn from_content(path: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            path: path.into(),
            lines: content.lines().map(HostsLine::parse).collect(),
            dirty: false,
        }
    }

    /// Build from raw bytes; each line is decoded on its own.
    pub fn from_bytes(path: impl Into<PathBuf>, content: &[u8]) -> Self {
        let lines = if content.is_empty() {
            Vec::new()
        } else {
            content
                .strip_suffix(b"\n")
                .unwrap_or(content)
                .split(|b| *b == b'\n')
                .map(|l| HostsLine::parse_bytes(l.strip_suffix(b"\r").unwrap_or(l)))
                .collect()
        };
        Self {
            path: path.into(),
            lines,
            dirty: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[HostsLine] {
        &self.lines
    }

    /// Lines that are neither comments nor blank (malformed lines included).
    pub fn entries(&self) -> impl Iterator<Item = &HostsLine> {
        self.lines.iter().filter(|l| !l.is_comment() && !l.is_blank())
    }

    /// True if there are changes not yet written.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Check whether `ip` is mapped to `hostname`.
    pub fn has(&self, ip: IpAddr, hostname: &str) -> bool {
        self.lines
            .iter()
            .any(|l| l.ip() == Some(ip) && l.has_hostname(hostname))
    }

    /// Map `hostname` to `ip`. Returns false if the mapping already exists.
    ///
    /// The hostname joins an existing line for `ip` when there is one,
    /// otherwise a new line is appended.
    pub fn add(&mut self, ip: IpAddr, hostname: &str) -> bool {
        if self.has(ip, hostname) {
            return false;
        }
        match self.lines.iter().position(|l| l.ip() == Some(ip)) {
            Some(i) => {
                let line = &mut self.lines[i];
                if let LineKind::Entry { hostnames, .. } = &mut line.kind {
                    hostnames.push(hostname.to_string());
                }
                line.refresh_raw();
            }
            None => self
                .lines
                .push(HostsLine::entry(ip, vec![hostname.to_string()])),
        }
        self.dirty = true;
        true
    }

    /// Drop the `ip` -> `hostname` mapping from every line for `ip`. Returns
    /// how many lines changed.
    ///
    /// A line left without hostnames is removed, or reduced to its trailing
    /// comment when it had one.
    pub fn remove(&mut self, ip: IpAddr, hostname: &str) -> usize {
        let mut changed = 0;
        for line in self.lines.iter_mut().filter(|l| l.ip() == Some(ip)) {
            let LineKind::Entry {
                hostnames, comment, ..
            } = &mut line.kind
            else {
                continue;
            };
            let before = hostnames.len();
            hostnames.retain(|h| !h.eq_ignore_ascii_case(hostname));
            if hostnames.len() == before {
                continue;
            }
            changed += 1;
            if hostnames.is_empty() {
                if let Some(c) = comment.take() {
                    *line = HostsLine::parse(&format!("# {c}"));
                    continue;
                }
            }
            line.refresh_raw();
        }
        if changed > 0 {
            self.lines.retain(|l| match &l.kind {
                LineKind::Entry { hostnames, .. } => !hostnames.is_empty(),
                _ => true,
            });
            self.dirty = true;
        }
        changed
    }

    /// Whether the current user may write the hosts file.
    pub fn is_writable(&self) -> bool {
        fs::OpenOptions::new().append(true).open(&self.path).is_ok()
    }

    /// File contents as they would be written.
    pub fn render(&self) -> Vec<u8> {
        let eol = platform::line_ending().as_bytes();
        let mut out = Vec::new();
        for line in &self.lines {
            out.extend_from_slice(line.as_bytes());
            out.extend_from_slice(eol);
        }
        out
    }

    /// Write changes back: temp file next to the hosts file, then rename.
    ///
    /// Some hosts files are bind mounts (containers) and cannot be replaced;
    /// those are rewritten in place instead.
    pub fn flush(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        let write_err = |source| Error::Write {
            path: self.path.clone(),
            source,
        };
        let content = self.render();

        let guard = fs::OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(write_err)?;
        fs2::FileExt::lock_exclusive(&guard).map_err(write_err)?;

        let tmp = self.temp_path();
        let replaced =
            write_temp(&tmp, &self.path, &content).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = replaced {
            debug!(error = %e, "atomic replace failed, rewriting in place");
            let _ = fs::remove_file(&tmp);
            drop(guard);
            let mut file = fs::OpenOptions::new()
                .write(true)
                .truncate(true)
                .open(&self.path)
                .map_err(write_err)?;
            file.write_all(&content).map_err(write_err)?;
            file.sync_all().map_err(write_err)?;
        }

        info!(path = %self.path.display(), "hosts file written");
        self.dirty = false;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "hosts".to_string());
        self.path.with_file_name(format!(".{name}.nhlhosts.tmp"))
    }
}

fn write_temp(tmp: &Path, original: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut file = fs::File::create(tmp)?;
    file.write_all(content)?;
    file.sync_all()?;
    if let Ok(meta) = fs::metadata(original) {
        fs::set_permissions(tmp, meta.permissions())?;
    }
    Ok(())
}
