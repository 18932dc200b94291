//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help_lists_commands() {
    let mut cmd = Command::cargo_bin("storefront").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"))
        .stdout(predicate::str::contains("seed"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("storefront").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--bind"))
        .stdout(predicate::str::contains("--memory"))
        .stdout(predicate::str::contains("DATABASE_URL"));
}

#[test]
fn test_migrate_help() {
    let mut cmd = Command::cargo_bin("storefront").unwrap();
    cmd.arg("migrate").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--reset"));
}

#[test]
fn test_seed_help() {
    let mut cmd = Command::cargo_bin("storefront").unwrap();
    cmd.arg("seed").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--db-name"));
}

#[test]
fn test_bad_bind_address_is_rejected() {
    let mut cmd = Command::cargo_bin("storefront").unwrap();
    cmd.arg("serve").arg("--memory").arg("--bind").arg("not-an-address");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("storefront").unwrap();
    cmd.arg("frobnicate");

    cmd.assert().failure();
}
