use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_both_subcommands() {
    let mut cmd = Command::cargo_bin("bwl-util").expect("binary exists");
    cmd.arg("--help");
    cmd.assert().success().stdout(
        predicate::str::contains("summary").and(predicate::str::contains("archive")),
    );
}

#[test]
fn summary_with_missing_config_file_fails() {
    let mut cmd = Command::cargo_bin("bwl-util").expect("binary exists");
    cmd.args(["summary", "--config", "definitely-not-here.yaml"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn archive_with_missing_config_file_fails() {
    let mut cmd = Command::cargo_bin("bwl-util").expect("binary exists");
    cmd.args(["archive", "--config", "definitely-not-here.yaml"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}
