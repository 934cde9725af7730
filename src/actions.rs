//! Menu actions: test, add, remove, list.
//!
//! Each action prints its report to `out` and returns a summary for callers.

use anyhow::{Context, Result};
use std::io::Write;
use std::net::IpAddr;
use tracing::info;

use crate::session::Session;

/// Result of checking one target hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub hostname: String,
    /// Hosts file maps the chosen IP to the hostname.
    pub in_hosts_file: bool,
    /// Resolving the hostname returns the chosen IP.
    pub resolves: bool,
}

impl CheckResult {
    pub fn passed(&self) -> bool {
        self.in_hosts_file && self.resolves
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestReport {
    pub ip: IpAddr,
    pub checks: Vec<CheckResult>,
}

impl TestReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(CheckResult::passed)
    }
}

fn verdict(ok: bool) -> &'static str {
    if ok {
        "Passed"
    } else {
        "Failed"
    }
}

/// Check hosts file and live resolution of every target against `ip`.
pub fn test(session: &Session, ip: IpAddr, out: &mut dyn Write) -> Result<TestReport> {
    let mut checks = Vec::new();
    for hostname in session.targets() {
        writeln!(out, "\n>> Checking hosts entry for {hostname}")?;
        let in_hosts_file = session.hosts().has(ip, hostname);
        writeln!(
            out,
            "\t{}: {hostname} has a redirection to {ip}",
            verdict(in_hosts_file)
        )?;

        writeln!(out, ">> Trying to reach {hostname} using {ip}")?;
        let resolved = session
            .resolver()
            .lookup(hostname)
            .with_context(|| format!("check redirection of {hostname}"))?;
        let resolves = resolved.contains(&ip);
        if resolves {
            writeln!(out, "\tPassed: {hostname} redirection is working")?;
        } else {
            writeln!(out, "\tFailed: {hostname} redirection is not working")?;
        }

        checks.push(CheckResult {
            hostname: hostname.clone(),
            in_hosts_file,
            resolves,
        });
    }

    let report = TestReport { ip, checks };
    let passed = report.checks.iter().filter(|c| c.passed()).count();
    writeln!(
        out,
        "\n>> Overall: {} ({passed}/{} hostnames redirected)",
        verdict(report.passed()),
        report.checks.len()
    )?;
    Ok(report)
}

/// Map every target to `ip` and write the hosts file. Returns how many
/// mappings were new.
pub fn add(session: &mut Session, ip: IpAddr, out: &mut dyn Write) -> Result<usize> {
    writeln!(
        out,
        "\n>> Adding hosts entries: {} to {ip}",
        session.target_set().label()
    )?;
    let targets = session.targets().to_vec();
    let mut added = 0;
    for hostname in &targets {
        if session.hosts_mut().add(ip, hostname) {
            added += 1;
        }
    }
    session.hosts_mut().flush()?;
    for hostname in &targets {
        writeln!(out, "\tSuccess: Added {ip} {hostname}")?;
    }
    info!(%ip, added, "added redirections");
    Ok(added)
}

/// Remove every mapping of any target hostname. Returns how many hosts file
/// lines were changed.
pub fn remove(session: &mut Session, out: &mut dyn Write) -> Result<usize> {
    writeln!(
        out,
        "\n>> Removing hosts entries: All references of {}",
        session.target_set().label()
    )?;

    let mut matches: Vec<(IpAddr, String)> = Vec::new();
    for line in session.hosts().entries() {
        let Some(ip) = line.ip() else { continue };
        for hostname in session.targets() {
            if line.has_hostname(hostname) && !matches.contains(&(ip, hostname.clone())) {
                matches.push((ip, hostname.clone()));
            }
        }
    }

    let mut found = 0;
    for (ip, hostname) in &matches {
        let lines = session.hosts_mut().remove(*ip, hostname);
        for _ in 0..lines {
            writeln!(out, "\tSuccess: Removed {ip} {hostname}")?;
        }
        found += lines;
    }

    if found == 0 {
        writeln!(out, "\tNothing found, nothing done")?;
        return Ok(0);
    }
    session.hosts_mut().flush()?;
    writeln!(out, ">> Total removed: {found}")?;
    info!(found, "removed redirections");
    Ok(found)
}

/// Print every non-comment, non-blank line. Returns the count.
pub fn list(session: &Session, out: &mut dyn Write) -> Result<usize> {
    writeln!(out, "\n>> Listing all hosts entries")?;
    let mut total = 0;
    for line in session.hosts().entries() {
        if line.error().is_some() {
            writeln!(out, ">> \t{} is malformed, it might not work!", line.raw)?;
        } else {
            writeln!(out, "\t{}", line.raw)?;
        }
        total += 1;
    }
    writeln!(out, ">> Total: {total}")?;
    Ok(total)
}
