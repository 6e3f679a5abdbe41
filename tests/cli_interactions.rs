//! CLI options interaction tests
//!
//! These run the binary without sending any request: every case is rejected
//! before the first probe or exits early.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

/// Helper function to create a test command
fn create_test_cmd() -> Command {
    let mut cmd = Command::cargo_bin("login-timing-probe").unwrap();
    cmd.env_remove("PROBE_URL").env_remove("PROBE_USERNAMES");
    cmd
}

#[test]
fn test_help_lists_options() {
    create_test_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--url"))
        .stdout(predicate::str::contains("--username"))
        .stdout(predicate::str::contains("--failure-policy"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn test_version() {
    create_test_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_color_flags_conflict() {
    create_test_cmd()
        .args(["--color", "--no-color"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_timeout_bounds() {
    for value in ["0", "301", "-1", "+5", "0x10", "ten"] {
        create_test_cmd()
            .args(["--timeout", value])
            .assert()
            .failure()
            .stdout(predicate::str::is_empty());
    }
}

#[test]
fn test_unknown_failure_policy() {
    create_test_cmd()
        .args(["--failure-policy", "retry"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("retry"));
}

#[test]
fn test_unknown_output_format() {
    create_test_cmd()
        .args(["--output", "xml"])
        .assert()
        .failure();
}

#[test]
fn test_invalid_url_is_rejected_before_probing() {
    create_test_cmd()
        .args(["--no-color", "--url", "not a url"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());

    create_test_cmd()
        .args(["--no-color", "--url", "ftp://example.com/login"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("http or https"));
}

#[test]
fn test_empty_username_list_is_rejected() {
    create_test_cmd()
        .args(["--usernames", " , "])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty());

    create_test_cmd()
        .args(["--username", ""])
        .assert()
        .code(1);
}

#[test]
fn test_print_env_example() {
    create_test_cmd()
        .arg("--print-env-example")
        .assert()
        .success()
        .stdout(predicate::str::contains("PROBE_URL="))
        .stdout(predicate::str::contains("PROBE_USERNAMES=michelle.obama,barack.obama"))
        .stdout(predicate::str::contains("PROBE_FAILURE_POLICY=fail-fast"));
}
