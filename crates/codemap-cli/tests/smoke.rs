use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

#[test]
fn scan_then_stats_reports_discovered_symbols() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(
        tmp.path().join("main.go"),
        "package main\n\nfunc helper() {}\n\nfunc main() {\n\thelper()\n}\n",
    )
    .unwrap();

    Command::cargo_bin("codemap")
        .unwrap()
        .arg("scan")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("nodes:"));

    Command::cargo_bin("codemap")
        .unwrap()
        .arg("stats")
        .arg(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("edges:"));
}

#[test]
fn stats_without_prior_scan_fails_with_hint() {
    let tmp = tempfile::tempdir().unwrap();

    Command::cargo_bin("codemap")
        .unwrap()
        .arg("stats")
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("scan"));
}

#[test]
fn search_finds_scanned_function_by_name() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(tmp.path().join("util.py"), "def transform(x):\n    return x\n").unwrap();

    Command::cargo_bin("codemap")
        .unwrap()
        .arg("scan")
        .arg(tmp.path())
        .assert()
        .success();

    Command::cargo_bin("codemap")
        .unwrap()
        .arg("search")
        .arg(tmp.path())
        .arg("transform")
        .assert()
        .success()
        .stdout(predicate::str::contains("transform"));
}
