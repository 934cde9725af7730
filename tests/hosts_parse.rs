//! Line classification of a realistic hosts file.

mod common;

use nhlhosts::hosts::{HostsFile, LineKind};
use std::fs;

const SAMPLE: &str = "\
# Copyright (c) 1993-2009 Microsoft Corp.
#
127.0.0.1\tlocalhost
::1             localhost ip6-localhost   # loopback

10.0.0.5 mf.svc.nhl.com
garbage-without-ip
300.1.1.1 bad.example
";

#[test]
fn keeps_every_line_in_order() {
    let hosts = HostsFile::from_content("hosts", SAMPLE);
    let raws: Vec<&str> = hosts.lines().iter().map(|l| l.raw.as_str()).collect();
    assert_eq!(raws, SAMPLE.lines().collect::<Vec<_>>());
}

#[test]
fn entries_skip_comments_and_blanks() {
    let hosts = HostsFile::from_content("hosts", SAMPLE);
    assert_eq!(hosts.entries().count(), 5);
    assert_eq!(hosts.entries().filter(|l| l.error().is_some()).count(), 2);
}

#[test]
fn inline_comment_ends_hostnames() {
    let hosts = HostsFile::from_content("hosts", SAMPLE);
    let line = &hosts.lines()[3];
    match &line.kind {
        LineKind::Entry { hostnames, comment, .. } => {
            assert_eq!(hostnames, &["localhost", "ip6-localhost"]);
            assert_eq!(comment.as_deref(), Some("loopback"));
        }
        other => panic!("expected entry, got {other:?}"),
    }
}

#[test]
fn has_is_case_insensitive_on_hostname() {
    let hosts = HostsFile::from_content("hosts", SAMPLE);
    assert!(hosts.has("10.0.0.5".parse().unwrap(), "MF.SVC.NHL.COM"));
    assert!(!hosts.has("10.0.0.6".parse().unwrap(), "mf.svc.nhl.com"));
}

#[test]
fn non_utf8_line_loads_and_survives_rewrite() {
    let dir = common::temp_dir();
    let path = dir.path().join("hosts");
    fs::write(&path, b"# Caf\xe9 network\n127.0.0.1 localhost\n").unwrap();

    let mut hosts = HostsFile::load(&path).unwrap();
    assert_eq!(hosts.lines().len(), 2);
    assert!(hosts.lines()[0].is_comment());
    assert_eq!(hosts.entries().count(), 1);

    hosts.add("10.0.0.5".parse().unwrap(), "mf.svc.nhl.com");
    hosts.flush().unwrap();

    let written = fs::read(&path).unwrap();
    assert!(written.starts_with(b"# Caf\xe9 network"));
    assert!(String::from_utf8_lossy(&written).contains("10.0.0.5\tmf.svc.nhl.com"));
}

#[test]
fn non_utf8_hostname_is_still_an_entry() {
    let hosts = HostsFile::from_bytes("hosts", b"10.0.0.9 caf\xe9.lan\n");
    assert_eq!(hosts.lines()[0].ip(), Some("10.0.0.9".parse().unwrap()));
    assert_eq!(hosts.lines()[0].as_bytes(), b"10.0.0.9 caf\xe9.lan");
}
