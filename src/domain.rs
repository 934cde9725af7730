//! Redirect targets, candidate domains, hostname validation.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

/// NHL.tv authentication host.
pub const NHL_TV: &str = "mf.svc.nhl.com";

/// MLB.tv authentication hosts.
pub const MLB_TV: &[&str] = &["mlb-ws-mf.media.mlb.com", "playback.svcs.mlb.com"];

/// Candidates used when no domains file is present.
pub const DEFAULT_DOMAINS: &[&str] = &["freegamez.ga", "freesports.ddns.net"];

/// Which streaming auth hosts get redirected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TargetSet {
    /// NHL.tv only
    #[default]
    Nhl,
    /// NHL.tv and MLB.tv
    NhlMlb,
}

impl TargetSet {
    /// Hostnames to redirect, in order.
    pub fn hostnames(self) -> Vec<String> {
        let mut hosts = vec![NHL_TV.to_string()];
        if self == TargetSet::NhlMlb {
            hosts.extend(MLB_TV.iter().map(|h| h.to_string()));
        }
        hosts
    }

    /// Human name for menu text.
    pub fn label(self) -> &'static str {
        match self {
            TargetSet::Nhl => "NHL.tv",
            TargetSet::NhlMlb => "NHL.tv/MLB.tv",
        }
    }
}

/// Replacement domains offered in the domain sub-menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDomains(Vec<String>);

impl CandidateDomains {
    pub fn defaults() -> Self {
        Self(DEFAULT_DOMAINS.iter().map(|d| d.to_string()).collect())
    }

    /// Load from `path` (one domain per line). Missing file, or a file with no
    /// usable entries, gives [`CandidateDomains::defaults`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::defaults());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read domains file: {}", path.display()))?;
        let domains = Self::parse(&content);
        if domains.0.is_empty() {
            warn!(path = %path.display(), "no usable domains, using defaults");
            return Ok(Self::defaults());
        }
        info!(domains = ?domains.0, "loaded domains");
        Ok(domains)
    }

    /// Parse domains file content; blank lines and `#` comments are skipped.
    pub fn parse(content: &str) -> Self {
        let mut domains = Vec::new();
        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match validate_hostname(line) {
                Ok(()) => domains.push(line.to_string()),
                Err(e) => warn!("skipping domain {line:?}: {e}"),
            }
        }
        Self(domains)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// Validate hostname format.
pub fn validate_hostname(domain: &str) -> Result<()> {
    if domain.is_empty() {
        anyhow::bail!("empty hostname");
    }
    if domain.len() > 253 {
        anyhow::bail!("invalid hostname: longer than 253 characters");
    }
    if domain.contains("..") {
        anyhow::bail!("invalid hostname: consecutive dots");
    }
    for label in domain.trim_end_matches('.').split('.') {
        if label.is_empty() {
            anyhow::bail!("invalid hostname: empty label");
        }
        if label.len() > 63 {
            anyhow::bail!("invalid hostname: label longer than 63 characters");
        }
        for c in label.chars() {
            if !c.is_ascii_alphanumeric() && c != '-' && c != '_' {
                anyhow::bail!("invalid hostname: illegal char {c:?}");
            }
        }
        if label.starts_with('-') || label.ends_with('-') {
            anyhow::bail!("invalid hostname: label cannot start/end with hyphen");
        }
    }
    Ok(())
}
