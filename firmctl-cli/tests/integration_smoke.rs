//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn firmctl() -> Command {
    let mut cmd = Command::cargo_bin("firmctl").unwrap();
    cmd.env_remove("DATABASE_URL").current_dir(std::env::temp_dir());
    cmd
}

#[test]
fn test_top_level_help_lists_commands() {
    firmctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    firmctl()
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--database-url"))
        .stdout(predicate::str::contains("--request-timeout"));
}

#[test]
fn test_migrate_requires_database_url() {
    firmctl()
        .arg("migrate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("DATABASE_URL not set"));
}

#[test]
fn test_serve_rejects_bad_bind_address() {
    firmctl()
        .arg("serve")
        .arg("--bind")
        .arg("not-an-address")
        .assert()
        .failure();
}
