//! Everything one menu session works on, constructed once and passed down.

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::config::Settings;
use crate::dns::Resolver;
use crate::domain::{CandidateDomains, TargetSet};
use crate::hosts::HostsFile;

pub struct Session {
    settings: Settings,
    targets: Vec<String>,
    domains: CandidateDomains,
    hosts: HostsFile,
    resolver: Box<dyn Resolver>,
}

impl Session {
    /// Load the hosts file and candidate domains named by `settings`.
    ///
    /// A hosts file that cannot be read is fatal for the session.
    pub fn open(settings: Settings, resolver: Box<dyn Resolver>) -> Result<Self> {
        let hosts = HostsFile::load(&settings.hosts_file).context("open hosts file")?;
        let domains = CandidateDomains::load(&settings.domains_file)?;
        info!(
            hosts = %settings.hosts_file.display(),
            targets = ?settings.targets,
            "session opened"
        );
        Ok(Self::new(settings, hosts, domains, resolver))
    }

    pub fn new(
        settings: Settings,
        hosts: HostsFile,
        domains: CandidateDomains,
        resolver: Box<dyn Resolver>,
    ) -> Self {
        let targets = settings.targets.hostnames();
        Self {
            settings,
            targets,
            domains,
            hosts,
            resolver,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn target_set(&self) -> TargetSet {
        self.settings.targets
    }

    /// Hostnames being redirected.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn domains(&self) -> &CandidateDomains {
        &self.domains
    }

    pub fn hosts(&self) -> &HostsFile {
        &self.hosts
    }

    pub fn hosts_mut(&mut self) -> &mut HostsFile {
        &mut self.hosts
    }

    pub fn resolver(&self) -> &dyn Resolver {
        self.resolver.as_ref()
    }

    /// After a failed action: write whatever changes were already made.
    pub fn recover(&mut self) {
        if let Err(e) = self.hosts.flush() {
            error!("flush after failure: {e}");
        }
    }
}
