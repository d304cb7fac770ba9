use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;

#[test]
fn normalize_code_argument() {
    let mut cmd = cargo_bin_cmd!("replfeed");
    cmd.arg("normalize")
        .arg("--line-ending")
        .arg("lf")
        .arg("def f():\n\n    pass\nx = 1\n");

    cmd.assert()
        .success()
        .stdout("def f():\n    pass\n\nx = 1\n");
}

#[test]
fn normalize_reads_stdin() {
    let mut cmd = cargo_bin_cmd!("replfeed");
    cmd.arg("normalize")
        .arg("--line-ending")
        .arg("lf")
        .write_stdin("a = 1\n\n\nb = 2\n\n\n");

    cmd.assert().success().stdout("a = 1\nb = 2\n");
}

#[test]
fn normalize_dash_means_stdin() {
    let mut cmd = cargo_bin_cmd!("replfeed");
    cmd.args(["normalize", "--line-ending", "lf", "-"])
        .write_stdin("if x:\n    y\nz");

    cmd.assert().success().stdout("if x:\n    y\n\nz");
}

#[test]
fn normalize_keeps_trailing_continuation() {
    let mut cmd = cargo_bin_cmd!("replfeed");
    cmd.args(["normalize", "--line-ending", "lf"])
        .arg("def f():\n\n    return 1 + \\\n        2\n");

    cmd.assert()
        .success()
        .stdout("def f():\n    return 1 + \\\n        2\n");
}

#[test]
fn normalize_failure_reports_error() {
    let mut cmd = cargo_bin_cmd!("replfeed");
    cmd.arg("normalize").arg("x = 'abc\n");

    cmd.assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unterminated string literal"));
}

#[test]
fn normalize_passthrough_on_error() {
    let mut cmd = cargo_bin_cmd!("replfeed");
    cmd.args(["normalize", "--on-error", "passthrough"])
        .arg("x = 'abc\n\n");

    cmd.assert().success().stdout("x = 'abc\n\n");
}

#[test]
fn normalize_without_merging() {
    let mut cmd = cargo_bin_cmd!("replfeed");
    cmd.args(["normalize", "--line-ending", "lf", "--no-merge"])
        .arg("import a\nimport b\n");

    cmd.assert().success().stdout("import a\n\nimport b\n");
}

#[test]
fn normalize_with_config_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(file, "[normalize]\nline_ending = \"crlf\"").expect("write config");

    let mut cmd = cargo_bin_cmd!("replfeed");
    cmd.arg("normalize")
        .arg("--config")
        .arg(file.path())
        .arg("def f():\n    pass\nx = 1\n");

    cmd.assert()
        .success()
        .stdout("def f():\r\n    pass\r\n\r\nx = 1\r\n");
}

#[test]
fn flags_override_config_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(file, "[normalize]\nline_ending = \"crlf\"").expect("write config");

    let mut cmd = cargo_bin_cmd!("replfeed");
    cmd.arg("normalize")
        .arg("--config")
        .arg(file.path())
        .args(["--line-ending", "lf"])
        .arg("a\nb\n");

    cmd.assert().success().stdout("a\nb\n");
}

#[test]
fn missing_config_file_fails() {
    let mut cmd = cargo_bin_cmd!("replfeed");
    cmd.args(["normalize", "--config", "/nonexistent/replfeed.toml", "x = 1\n"]);

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn tokens_simple_lists_markers() {
    let mut cmd = cargo_bin_cmd!("replfeed");
    cmd.arg("tokens").arg("a\n\nif x:\n    y\nz\n");

    cmd.assert().success().stdout("NL,2\nDEDENT,5\n");
}

#[test]
fn tokens_json_dumps_stream() {
    let mut cmd = cargo_bin_cmd!("replfeed");
    cmd.args(["tokens", "--format", "json"]).arg("a\n\n");

    cmd.assert().success().stdout(
        predicate::str::contains("\"kind\": \"BLANK_LINE\"")
            .and(predicate::str::contains("\"kind\": \"END_MARKER\"")),
    );
}

#[test]
fn statements_simple_lists_ranges() {
    let mut cmd = cargo_bin_cmd!("replfeed");
    cmd.arg("statements")
        .arg("import a\nimport b\n\ndef f():\n\n    pass\n");

    cmd.assert().success().stdout("1,2\n3,4\n");
}

#[test]
fn statements_json() {
    let mut cmd = cargo_bin_cmd!("replfeed");
    cmd.args(["statements", "--format", "json", "--no-merge"])
        .arg("a\nb\n");

    cmd.assert().success().stdout(
        predicate::str::contains("\"start_line\": 2").and(predicate::str::contains(
            "\"is_single_line\": true",
        )),
    );
}

#[test]
fn rejects_unknown_line_ending() {
    let mut cmd = cargo_bin_cmd!("replfeed");
    cmd.args(["normalize", "--line-ending", "cr", "x\n"]);

    cmd.assert().failure();
}
