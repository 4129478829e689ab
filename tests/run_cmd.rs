use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use std::time::Duration;

fn bft() -> Command {
    let mut cmd = Command::cargo_bin("bft").unwrap();
    cmd.timeout(Duration::from_secs(5));
    cmd
}

#[test]
fn positional_code_runs_and_appends_trailing_newline() {
    bft()
        .arg("+++.")
        .assert()
        .success()
        .stdout("\u{3}\n")
        .stderr(predicate::str::is_empty());
}

#[test]
fn positional_code_parts_are_concatenated() {
    bft().arg("++").arg("+.").assert().success().stdout("\u{3}\n");
}

#[test]
fn code_is_read_from_stdin_when_no_args_given() {
    bft()
        .write_stdin("+++.")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("\u{3}"));
}

#[test]
fn input_flag_feeds_the_comma_instruction() {
    // Flags come before the code: the positional CODE is a trailing
    // var-arg, so anything after it is treated as program text.
    bft()
        .arg("--input")
        .arg("AB")
        .arg(",[.,]")
        .assert()
        .success()
        .stdout("AB\n");
}

#[test]
fn code_file_is_loaded_with_file_flag() {
    let mut src = tempfile::NamedTempFile::new().unwrap();
    let hello = "++++++++[>++++[>++>+++>+++>+<<<<-]>+>+>->>+[<]<-]>>.>---.+++++++..+++.>>.<-.<.+++.------.--------.>>+.>++.";
    src.write_all(hello.as_bytes()).unwrap();

    bft()
        .arg("--file")
        .arg(src.path())
        .assert()
        .success()
        .stdout("Hello World!\n\n");
}

#[test]
fn input_file_supplies_raw_bytes() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    input.write_all(b"hi").unwrap();

    bft()
        .arg("--input-file")
        .arg(input.path())
        .arg(",[.,]")
        .assert()
        .success()
        .stdout("hi\n");
}

#[test]
fn comment_characters_in_programs_are_ignored() {
    bft()
        .arg("add three comment: +++ then print .")
        .assert()
        .success()
        .stdout("\u{3}\n");
}

#[test]
fn positional_code_conflicts_with_file_flag() {
    bft()
        .arg("--file")
        .arg("whatever.bf")
        .arg("+++.")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--file"));
}

#[test]
fn input_flag_conflicts_with_input_file_flag() {
    bft()
        .arg("--input")
        .arg("A")
        .arg("--input-file")
        .arg("whatever.txt")
        .arg(",.")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--input-file"));
}

#[test]
fn missing_code_file_fails_with_diagnostic() {
    bft()
        .arg("--file")
        .arg("definitely-not-here.bf")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("failed to read code file"));
}
