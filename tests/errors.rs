use assert_cmd::Command;
use predicates::prelude::*;
use std::time::Duration;

fn bft() -> Command {
    let mut cmd = Command::cargo_bin("bft").unwrap();
    cmd.timeout(Duration::from_secs(5));
    cmd
}

#[test]
fn left_boundary_breach_is_a_runtime_error() {
    bft()
        .arg("<")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Runtime error"))
        .stderr(predicate::str::contains("tape pointer"));
}

#[test]
fn unmatched_open_bracket_is_a_parse_error() {
    bft()
        .arg("[")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unmatched bracket '['"));
}

#[test]
fn unmatched_close_bracket_is_a_parse_error() {
    bft()
        .arg("+]")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unmatched bracket ']'"));
}

#[test]
fn errors_render_a_caret_context_window() {
    bft()
        .arg("++++<")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("at instruction 4"))
        .stderr(predicate::str::contains("^"));
}

#[test]
fn lone_close_bracket_on_zero_cell_succeeds() {
    // Bracket resolution is on demand: a ']' that never fires its backward
    // scan is not an error.
    bft()
        .arg("]")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}
