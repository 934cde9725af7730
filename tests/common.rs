//! Shared test helpers.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use nhlhosts::config::Settings;
use nhlhosts::dns::StaticResolver;
use nhlhosts::domain::TargetSet;
use nhlhosts::menu::Prompter;
use nhlhosts::session::Session;

/// Create a temp directory holding a hosts file (and optionally domains.txt).
/// Uses current dir (workspace) so sandbox allows full access.
pub fn temp_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("nhlhosts_test_")
        .tempdir_in(std::env::current_dir().unwrap_or_else(|_| std::path::Path::new(".").into()))
        .expect("temp dir")
}

pub fn ip(s: &str) -> IpAddr {
    s.parse().expect("ip")
}

/// Write `content` as `<dir>/hosts` and return its path.
pub fn write_hosts(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("hosts");
    fs::write(&path, content).unwrap();
    path
}

/// Session over `<dir>/hosts` with no domains file (defaults apply).
pub fn open_session(
    dir: &Path,
    hosts: &str,
    targets: TargetSet,
    resolver: StaticResolver,
) -> Session {
    let hosts_path = write_hosts(dir, hosts);
    let mut settings = Settings::for_test(hosts_path, dir.join("domains.txt"));
    settings.targets = targets;
    Session::open(settings, Box::new(resolver)).unwrap()
}

/// Prompter that answers from a fixed script and records what it was shown.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<usize>,
    pub shown: Vec<(String, Vec<String>)>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[usize]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            shown: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, prompt: &str, items: &[String]) -> anyhow::Result<usize> {
        self.shown.push((prompt.to_string(), items.to_vec()));
        self.answers
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("script exhausted at prompt {prompt:?}"))
    }
}
