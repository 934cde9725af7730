//! Test action: hosts file check and live resolution check.

mod common;

use nhlhosts::actions;
use nhlhosts::dns::StaticResolver;
use nhlhosts::domain::TargetSet;

#[test]
fn existing_mapping_passes_both_checks() {
    let dir = common::temp_dir();
    let ip = common::ip("10.0.0.5");
    let resolver = StaticResolver::new().with("mf.svc.nhl.com", &[ip]);
    let session = common::open_session(
        dir.path(),
        "127.0.0.1 localhost\n10.0.0.5 mf.svc.nhl.com\n",
        TargetSet::Nhl,
        resolver,
    );

    let mut out = Vec::new();
    let report = actions::test(&session, ip, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(report.passed());
    assert!(report.checks[0].in_hosts_file);
    assert!(text.contains("Passed: mf.svc.nhl.com has a redirection to 10.0.0.5"));
    assert!(text.contains("Passed: mf.svc.nhl.com redirection is working"));
    assert!(text.contains("Overall: Passed"));
}

#[test]
fn resolution_matches_any_returned_address() {
    let dir = common::temp_dir();
    let ip = common::ip("10.0.0.5");
    let resolver = StaticResolver::new().with("mf.svc.nhl.com", &[common::ip("1.2.3.4"), ip]);
    let session = common::open_session(dir.path(), "", TargetSet::Nhl, resolver);

    let report = actions::test(&session, ip, &mut std::io::sink()).unwrap();
    assert!(!report.checks[0].in_hosts_file);
    assert!(report.checks[0].resolves);
    assert!(!report.passed());
}

#[test]
fn summary_fails_when_one_target_fails() {
    let dir = common::temp_dir();
    let ip = common::ip("10.0.0.5");
    let mut resolver = StaticResolver::new();
    for host in TargetSet::NhlMlb.hostnames() {
        resolver = resolver.with(&host, &[ip]);
    }
    let session = common::open_session(
        dir.path(),
        "10.0.0.5 mf.svc.nhl.com mlb-ws-mf.media.mlb.com\n",
        TargetSet::NhlMlb,
        resolver,
    );

    let mut out = Vec::new();
    let report = actions::test(&session, ip, &mut out).unwrap();
    assert_eq!(report.checks.len(), 3);
    assert!(report.checks[0].passed());
    assert!(!report.checks[2].in_hosts_file);
    assert!(!report.passed());
    assert!(String::from_utf8(out).unwrap().contains("Overall: Failed (2/3"));
}

#[test]
fn lookup_failure_is_an_error() {
    let dir = common::temp_dir();
    let session = common::open_session(dir.path(), "", TargetSet::Nhl, StaticResolver::new());
    let err = actions::test(&session, common::ip("10.0.0.5"), &mut std::io::sink()).unwrap_err();
    assert!(format!("{err:#}").contains("mf.svc.nhl.com"));
}
