//! CLI tests for the cellspan binary

#![allow(deprecated)] // cargo_bin is the standard way to test CLI binaries

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

const SPANNED_DOC: &str = "\
| a | b |
|---|---|
| wide  ||
| x | y |
|_=_| z |
";

fn cellspan() -> Command {
    let mut cmd = Command::cargo_bin("cellspan").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_cli_help() {
    cellspan()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Column and row spans"));
}

#[test]
fn test_cli_info() {
    cellspan()
        .arg("info")
        .assert()
        .success()
        .stdout(predicate::str::contains("Row spans:"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_cli_renders_html_from_stdin() {
    cellspan()
        .write_stdin(SPANNED_DOC)
        .assert()
        .success()
        .stdout(predicate::str::contains("<td colspan=\"2\">wide</td>"))
        .stdout(predicate::str::contains(
            "<td rowspan=\"2\" style=\"vertical-align: bottom\">x</td>",
        ))
        .stdout(predicate::str::contains("_=_").not());
}

#[test]
fn test_cli_json_output() {
    cellspan()
        .args(["--format", "json"])
        .write_stdin(SPANNED_DOC)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"colspan\": 2"))
        .stdout(predicate::str::contains("\"alignments\""));
}

#[test]
fn test_cli_json_input() {
    cellspan()
        .args(["--input-format", "json", "--format", "json"])
        .write_stdin(r#"[[{"content": "a"}, {"content": ""}], [{"content": "b"}, {"content": "c"}]]"#)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"colspan\": 2"));
}

#[test]
fn test_cli_custom_empty_token() {
    cellspan()
        .args(["--empty-token", "%%"])
        .write_stdin("| a | b |\n|---|---|\n| w |%%|")
        .assert()
        .success()
        .stdout(predicate::str::contains("<td colspan=\"2\">w</td>"));
}

#[test]
fn test_cli_rejects_bad_token() {
    cellspan()
        .args(["--empty-token", "a|b"])
        .write_stdin(SPANNED_DOC)
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot contain"));
}

#[test]
fn test_cli_conflict_fails() {
    cellspan()
        .write_stdin("| a |\n|---|\n| x |\n|_^=_|")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Table 1"));
}

#[test]
fn test_cli_check_clean() {
    cellspan()
        .args(["--check", "--no-color"])
        .write_stdin(SPANNED_DOC)
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary: no issues found"));
}

#[test]
fn test_cli_check_reports_errors() {
    cellspan()
        .args(["--check", "--no-color"])
        .write_stdin("| a |\n|---|\n| x |\n|_^=_|")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("error: row span marker '_^=_'"))
        .stdout(predicate::str::contains("--> table 1, row 2, column 1"));
}

#[test]
fn test_cli_warns_on_ragged_rows() {
    let doc = "| a | b |\n|---|---|\n| x | y |\n| z |";

    cellspan()
        .arg("--no-color")
        .write_stdin(doc)
        .assert()
        .success()
        .stderr(predicate::str::contains("warning: row spans 1 column(s), expected 2"));

    cellspan()
        .args(["--no-color", "--quiet"])
        .write_stdin(doc)
        .assert()
        .success()
        .stderr(predicate::str::is_empty());

    cellspan().arg("--strict").write_stdin(doc).assert().failure();
}

#[test]
fn test_cli_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("tables.md");
    let output = dir.path().join("tables.html");
    fs::write(&input, SPANNED_DOC).unwrap();

    cellspan()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let html = fs::read_to_string(&output).unwrap();
    assert!(html.starts_with("<table>"));
    assert!(html.contains("<td>z</td>"));
}

#[test]
fn test_cli_missing_input_file() {
    cellspan()
        .arg("does-not-exist.md")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read does-not-exist.md"));
}
